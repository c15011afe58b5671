//! Project directory to toolchain resolution.
//!
//! Marker files overlap between build systems (a PlatformIO project often
//! carries `.ino` sources, an ESP-IDF project is also a CMake project), so
//! the order in which adapters are tried is explicit and total.

use std::path::Path;

use crate::toolchain::{CustomToolchain, ToolchainAdapter, ToolchainRegistry};
use crate::util::config::{self, OverrideFile};

/// Adapters tried first, in this order. Registered adapters not listed here
/// are tried afterwards in registration order.
pub const DETECTION_PRIORITY: &[&str] = &["platformio", "espidf", "arduino", "micropython"];

/// The toolchain a project directory resolved to.
#[derive(Debug)]
pub enum ResolvedToolchain<'r> {
    /// Declared by the project's override file
    Override {
        toolchain: CustomToolchain,
        file: OverrideFile,
    },
    /// A registered adapter whose project signature matched
    Detected(&'r dyn ToolchainAdapter),
}

impl<'r> ResolvedToolchain<'r> {
    pub fn adapter(&self) -> &dyn ToolchainAdapter {
        match self {
            ResolvedToolchain::Override { toolchain, .. } => toolchain,
            ResolvedToolchain::Detected(adapter) => *adapter,
        }
    }

    pub fn name(&self) -> &str {
        self.adapter().name()
    }

    pub fn is_override(&self) -> bool {
        matches!(self, ResolvedToolchain::Override { .. })
    }

    /// The override file, when the toolchain came from one.
    pub fn override_file(&self) -> Option<&OverrideFile> {
        match self {
            ResolvedToolchain::Override { file, .. } => Some(file),
            ResolvedToolchain::Detected(_) => None,
        }
    }
}

/// Resolves a directory to a toolchain against a registry.
pub struct ProjectDetector<'r> {
    registry: &'r ToolchainRegistry,
}

impl<'r> ProjectDetector<'r> {
    pub fn new(registry: &'r ToolchainRegistry) -> Self {
        ProjectDetector { registry }
    }

    /// Registered adapters in the order they are tried.
    pub fn priority_order(&self) -> Vec<&'r dyn ToolchainAdapter> {
        let mut order: Vec<&'r dyn ToolchainAdapter> = DETECTION_PRIORITY
            .iter()
            .filter_map(|name| self.registry.get(name))
            .collect();
        order.extend(
            self.registry
                .all()
                .filter(|a| !DETECTION_PRIORITY.contains(&a.name())),
        );
        order
    }

    /// Resolve `dir`.
    ///
    /// An override file declaring compile and upload commands wins
    /// unconditionally. `None` means nothing matched and the caller needs
    /// manual input.
    pub fn resolve(&self, dir: &Path) -> Option<ResolvedToolchain<'r>> {
        if let Some((toolchain, file)) = config::load_custom_toolchain(dir) {
            tracing::debug!(
                "using toolchain `{}` from {}",
                toolchain.name(),
                config::OVERRIDE_FILE
            );
            return Some(ResolvedToolchain::Override { toolchain, file });
        }

        let found = self
            .priority_order()
            .into_iter()
            .find(|adapter| adapter.detect_project(dir));

        match found {
            Some(adapter) => {
                tracing::debug!("detected {} project in {}", adapter.name(), dir.display());
                Some(ResolvedToolchain::Detected(adapter))
            }
            None => {
                tracing::debug!("no toolchain signature matched in {}", dir.display());
                None
            }
        }
    }
}
