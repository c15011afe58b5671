//! Toolchain abstraction for embedded build systems.
//!
//! Each build system (arduino-cli, PlatformIO, ESP-IDF, ...) implements
//! [`ToolchainAdapter`]. Adapters only synthesize command strings and run
//! short read-only probes; compiling and flashing is always left to the
//! external tool.
//!
//! Toolchain detection priority:
//! 1. Override file (`edesto.toml`) in the project directory
//! 2. Project-file signatures, in [`detect::DETECTION_PRIORITY`] order
//! 3. Remaining registered adapters, in registration order

use std::fmt;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::core::board::{Board, BoardInfo, DetectedBoard};

pub mod arduino;
pub mod cmake_native;
pub mod custom;
pub mod detect;
pub mod espidf;
pub mod micropython;
pub mod platformio;
pub mod registry;
pub mod zephyr;

pub use arduino::ArduinoToolchain;
pub use cmake_native::CMakeNativeToolchain;
pub use custom::CustomToolchain;
pub use detect::{ProjectDetector, ResolvedToolchain, DETECTION_PRIORITY};
pub use espidf::EspIdfToolchain;
pub use micropython::MicroPythonToolchain;
pub use platformio::PlatformIOToolchain;
pub use registry::ToolchainRegistry;
pub use zephyr::ZephyrToolchain;

/// Upper bound on any board enumeration subprocess.
pub const DETECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Serial parameters the firmware and the monitor must agree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    pub baud_rate: u32,
    /// Seconds to wait after reset before reading output
    pub boot_delay: u32,
}

/// Whether a toolchain's required external program is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Required tools found
    Available {
        /// What was found, and where
        detail: String,
    },

    /// A required tool is not installed
    Missing {
        /// Name of the missing tool (e.g., "arduino-cli")
        tool: String,
        /// Hint for how to install it
        install_hint: String,
    },

    /// Nothing external is required
    Builtin,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        !matches!(self, Availability::Missing { .. })
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available { detail } => write!(f, "{}", detail),
            Availability::Missing { tool, install_hint } => {
                write!(f, "{} not found. Install: {}", tool, install_hint)
            }
            Availability::Builtin => write!(f, "no external tools required"),
        }
    }
}

/// Why an adapter's board enumeration produced nothing.
///
/// These never cross the board resolver: a failing adapter contributes an
/// empty result instead.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("`{program}` is not installed")]
    ToolMissing { program: String },

    #[error("`{command}` could not be run: {message}")]
    Command { command: String, message: String },

    #[error("`{command}` exited with status {code:?}")]
    Failed { command: String, code: Option<i32> },

    #[error("unexpected output from `{command}`: {source}")]
    MalformedOutput {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Polymorphic behavior of one embedded build system.
///
/// Implementations are stateless apart from configuration fixed at
/// construction, and must return identical results for identical inputs.
pub trait ToolchainAdapter: Send + Sync {
    /// Registry key (e.g., "arduino", "cmake-native").
    fn name(&self) -> &str;

    /// Check whether `dir` looks like a project for this toolchain.
    ///
    /// Read-only; an unreadable or missing marker counts as no match.
    fn detect_project(&self, dir: &Path) -> bool;

    /// Enumerate connected boards with the toolchain's own CLI.
    ///
    /// Identifiers that do not map onto a catalog board are skipped.
    fn detect_boards(&self) -> Result<Vec<DetectedBoard>, DetectionError> {
        Ok(Vec::new())
    }

    fn compile_command(&self, board: &Board) -> String;

    fn upload_command(&self, board: &Board, port: &str) -> String;

    fn monitor_command(&self, _board: &Board, _port: &str) -> Option<String> {
        None
    }

    fn serial_config(&self, board: &Board) -> SerialConfig;

    /// The board metadata this toolchain's documents reference.
    fn board_info(&self, board: &Board) -> BoardInfo;

    /// One-line install or activation instructions, if any are needed.
    fn setup_info(&self, _board: &Board) -> Option<String> {
        None
    }

    /// Check that the required external programs are reachable.
    fn environment_check(&self) -> Availability;

    /// Boards this toolchain can name directly.
    fn boards(&self) -> &[Board] {
        &[]
    }
}

impl fmt::Debug for dyn ToolchainAdapter + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolchainAdapter")
            .field("name", &self.name())
            .finish()
    }
}

/// Check a single required program on PATH.
pub(crate) fn require_program(program: &str, install_hint: &str) -> Availability {
    match crate::util::process::find_executable(program) {
        Some(path) => Availability::Available {
            detail: format!("{} found at {}", program, path.display()),
        },
        None => Availability::Missing {
            tool: program.to_string(),
            install_hint: install_hint.to_string(),
        },
    }
}

/// Run a board enumeration command and return its standard output.
pub(crate) fn run_enumeration(program: &str, args: &[&str]) -> Result<String, DetectionError> {
    let Some(path) = crate::util::process::find_executable(program) else {
        return Err(DetectionError::ToolMissing {
            program: program.to_string(),
        });
    };

    let command = format!("{} {}", program, args.join(" "));
    tracing::debug!("running `{}`", command);

    let output = crate::util::process::ProcessBuilder::new(path)
        .args(args)
        .timeout(DETECTION_TIMEOUT)
        .exec()
        .map_err(|e| DetectionError::Command {
            command: command.clone(),
            message: format!("{:#}", e),
        })?;

    if !output.status.success() {
        return Err(DetectionError::Failed {
            command,
            code: output.status.code(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
