//! User-defined toolchain loaded from an `edesto.toml` override file.

use std::path::Path;

use crate::core::board::{Board, BoardInfo};
use crate::toolchain::{Availability, SerialConfig, ToolchainAdapter};

/// Placeholder in the upload command replaced with the serial port.
pub const PORT_PLACEHOLDER: &str = "{port}";

/// A one-off adapter wrapping verbatim commands from the override file.
///
/// It is never registered and never matches a directory on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomToolchain {
    name: String,
    compile: String,
    upload: String,
    baud_rate: u32,
}

impl CustomToolchain {
    pub fn new(
        name: impl Into<String>,
        compile: impl Into<String>,
        upload: impl Into<String>,
        baud_rate: u32,
    ) -> Self {
        CustomToolchain {
            name: name.into(),
            compile: compile.into(),
            upload: upload.into(),
            baud_rate,
        }
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }
}

impl ToolchainAdapter for CustomToolchain {
    fn name(&self) -> &str {
        &self.name
    }

    fn detect_project(&self, _dir: &Path) -> bool {
        false
    }

    fn compile_command(&self, _board: &Board) -> String {
        self.compile.clone()
    }

    fn upload_command(&self, _board: &Board, port: &str) -> String {
        self.upload.replace(PORT_PLACEHOLDER, port)
    }

    fn serial_config(&self, _board: &Board) -> SerialConfig {
        SerialConfig {
            baud_rate: self.baud_rate,
            boot_delay: 3,
        }
    }

    fn board_info(&self, _board: &Board) -> BoardInfo {
        BoardInfo::default()
    }

    fn environment_check(&self) -> Availability {
        Availability::Builtin
    }
}
