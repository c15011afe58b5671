//! Resolution error types and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::board::DetectedBoard;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// A resolution failure that needs the user's input.
///
/// Failures inside a single adapter never become one of these; only a
/// terminal condition of the whole pass does.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("could not identify the project in {}", dir.display())]
    UnresolvedProject { dir: PathBuf },

    #[error("multiple boards detected")]
    AmbiguousMatch { candidates: Vec<DetectedBoard> },

    #[error("no boards detected")]
    NoBoardsDetected { toolchain: String },

    #[error("no `{board}` found on any port")]
    PortNotFound { board: String },

    #[error("unknown board `{slug}`")]
    UnknownBoard { slug: String, known: Vec<String> },

    #[error("unknown toolchain `{name}`")]
    UnknownToolchain { name: String, known: Vec<String> },

    #[error("a board is required")]
    BoardRequired { reason: String },

    #[error("a serial port is required")]
    PortRequired { board: String },

    #[error("a debug probe interface is required for JTAG upload")]
    ProbeRequired,

    #[error("`{board}` has no known JTAG target")]
    JtagTargetRequired { board: String },

    #[error("`{tool}` not found")]
    MissingTool { tool: String, install_hint: String },

    #[error("{} already exists", path.display())]
    OutputExists { path: PathBuf },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            ResolveError::UnresolvedProject { .. } => diag
                .with_context("no edesto.toml, no known project files, and no boards detected")
                .with_suggestion(suggestions::PASS_BOARD_AND_PORT)
                .with_suggestion(suggestions::OVERRIDE_FILE),

            ResolveError::AmbiguousMatch { candidates } => {
                let mut diag = diag;
                for c in candidates {
                    diag = diag.with_context(format!(
                        "{} ({}) on {} via {}",
                        c.board.name, c.board.slug, c.port, c.toolchain_name
                    ));
                }
                diag.with_suggestion(suggestions::PASS_BOARD_AND_PORT)
            }

            ResolveError::NoBoardsDetected { toolchain } => diag
                .with_context(format!("detected a {} project", toolchain))
                .with_suggestion("Check that the board is plugged in and powered")
                .with_suggestion(suggestions::PASS_BOARD_AND_PORT),

            ResolveError::PortNotFound { .. } => diag
                .with_suggestion("Check that the board is plugged in")
                .with_suggestion("Pass the port explicitly with `--port`"),

            ResolveError::UnknownBoard { known, .. } => diag
                .with_context(format!("supported boards: {}", known.join(", ")))
                .with_suggestion(suggestions::LIST_BOARDS),

            ResolveError::UnknownToolchain { known, .. } => diag
                .with_context(format!("supported toolchains: {}", known.join(", ")))
                .with_suggestion(suggestions::OVERRIDE_FILE),

            ResolveError::BoardRequired { reason } => diag
                .with_context(reason.clone())
                .with_suggestion("Pass the board with `--board <slug>`")
                .with_suggestion(suggestions::LIST_BOARDS),

            ResolveError::PortRequired { board } => diag
                .with_context(format!("{} is flashed over serial", board))
                .with_suggestion("Pass the port with `--port`")
                .with_suggestion("Or flash through a debug probe with `--upload jtag`"),

            ResolveError::ProbeRequired => diag
                .with_suggestion("Pass the probe with `--probe stlink`, `--probe jlink` or `--probe cmsis-dap`"),

            ResolveError::JtagTargetRequired { .. } => diag
                .with_suggestion("Pass the OpenOCD target config name with `--target` (e.g., stm32f4x)"),

            ResolveError::MissingTool { install_hint, .. } => diag
                .with_suggestion(format!("Install it: {}", install_hint))
                .with_suggestion(suggestions::RUN_DOCTOR),

            ResolveError::OutputExists { path } => diag
                .with_location(path.clone())
                .with_suggestion(suggestions::FORCE),
        }
    }
}
