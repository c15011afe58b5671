//! The fully-resolved input to document rendering.

use crate::core::board::{Board, BoardInfo};
use crate::core::debug_tool::{DebugTool, DebugToolSet};
use crate::ops::overlay::JtagOverlay;
use crate::toolchain::ToolchainAdapter;

/// Everything the document needs, resolved up front.
///
/// Constructing one is the last step of detection; rendering reads it and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisContext {
    pub board_name: String,
    pub toolchain_name: String,
    /// Serial port, if one is attached
    pub port: Option<String>,
    pub baud_rate: u32,
    pub compile_command: String,
    pub upload_command: String,
    pub monitor_command: Option<String>,
    /// Seconds between flashing and reading output
    pub boot_delay: u32,
    pub setup_info: Option<String>,
    pub board_info: BoardInfo,
    /// Detected debugging tools
    pub debug_tools: DebugToolSet,
    pub jtag: Option<JtagOverlay>,
}

impl SynthesisContext {
    fn base(adapter: &dyn ToolchainAdapter, board: &Board, port: Option<&str>) -> Self {
        let serial = adapter.serial_config(board);
        SynthesisContext {
            board_name: board.name.clone(),
            toolchain_name: adapter.name().to_string(),
            port: port.map(str::to_string),
            baud_rate: serial.baud_rate,
            compile_command: adapter.compile_command(board),
            upload_command: port
                .map(|p| adapter.upload_command(board, p))
                .unwrap_or_default(),
            monitor_command: port.and_then(|p| adapter.monitor_command(board, p)),
            boot_delay: serial.boot_delay,
            setup_info: adapter.setup_info(board),
            board_info: adapter.board_info(board),
            debug_tools: DebugToolSet::new(),
            jtag: None,
        }
    }

    /// Context for flashing over a serial port.
    pub fn serial(adapter: &dyn ToolchainAdapter, board: &Board, port: &str) -> Self {
        Self::base(adapter, board, Some(port))
    }

    /// Context for flashing through a debug probe, optionally with a serial
    /// port for monitoring.
    pub fn jtag(
        adapter: &dyn ToolchainAdapter,
        board: &Board,
        overlay: &JtagOverlay,
        port: Option<&str>,
    ) -> Self {
        let mut ctx = Self::base(adapter, board, port);
        overlay.apply(&mut ctx, port);
        ctx
    }

    /// Add detected tools to the active set.
    pub fn with_debug_tools(mut self, tools: &DebugToolSet) -> Self {
        for tool in tools.iter() {
            self.debug_tools.insert(tool);
        }
        self
    }

    /// Tools the document covers, in canonical order. Serial output is
    /// covered exactly when a port is attached.
    pub fn active_tools(&self) -> Vec<DebugTool> {
        DebugTool::ALL
            .into_iter()
            .filter(|tool| match tool {
                DebugTool::Serial => self.port.is_some(),
                other => self.debug_tools.contains(*other),
            })
            .collect()
    }
}
