//! Toolchain registry - explicit, ordered set of built-in adapters.
//!
//! Key principle: registry construction never fails and performs no I/O.
//! Tool availability is checked lazily via `environment_check()`.

use crate::toolchain::{
    ArduinoToolchain, CMakeNativeToolchain, EspIdfToolchain, MicroPythonToolchain,
    PlatformIOToolchain, ToolchainAdapter, ZephyrToolchain,
};

/// Registry of toolchain adapters, in registration order.
///
/// Populated once at startup and then passed by shared reference to the
/// detector and resolver.
pub struct ToolchainRegistry {
    adapters: Vec<Box<dyn ToolchainAdapter>>,
}

impl ToolchainRegistry {
    /// Create a registry with all built-in toolchains.
    pub fn new() -> Self {
        let mut registry = ToolchainRegistry::empty();

        registry.register(Box::new(ArduinoToolchain::new()));
        registry.register(Box::new(PlatformIOToolchain::new()));
        registry.register(Box::new(EspIdfToolchain::new()));
        registry.register(Box::new(MicroPythonToolchain::new()));
        registry.register(Box::new(ZephyrToolchain::new()));
        registry.register(Box::new(CMakeNativeToolchain::new()));

        registry
    }

    /// Create a registry with no adapters.
    pub fn empty() -> Self {
        ToolchainRegistry {
            adapters: Vec::new(),
        }
    }

    /// Register an adapter. An adapter with the same name is replaced in
    /// place, keeping its original position.
    pub fn register(&mut self, adapter: Box<dyn ToolchainAdapter>) {
        match self
            .adapters
            .iter()
            .position(|a| a.name() == adapter.name())
        {
            Some(idx) => self.adapters[idx] = adapter,
            None => self.adapters.push(adapter),
        }
    }

    /// Get an adapter by name.
    pub fn get(&self, name: &str) -> Option<&dyn ToolchainAdapter> {
        self.adapters
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    /// All adapters, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &dyn ToolchainAdapter> + '_ {
        self.adapters.iter().map(|a| a.as_ref())
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl Default for ToolchainRegistry {
    fn default() -> Self {
        Self::new()
    }
}
