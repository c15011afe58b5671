//! JTAG/SWD upload path.
//!
//! An overlay swaps the adapter's serial upload command for a one-shot
//! OpenOCD flash. Compilation is never touched.

use crate::core::debug_tool::DebugTool;
use crate::synth::SynthesisContext;

/// Program that drives the debug probe.
pub const JTAG_PROGRAM: &str = "openocd";

/// Firmware image flashed when none is configured.
pub const DEFAULT_FIRMWARE: &str = "build/firmware.elf";

/// Probe interface plus target chip, as OpenOCD config names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JtagOverlay {
    /// Interface config name (e.g., "stlink", "jlink", "cmsis-dap")
    pub interface: String,
    /// Target config name (e.g., "stm32f4x", "esp32")
    pub target: String,
    /// Firmware artifact handed to `program`
    pub firmware: String,
}

impl JtagOverlay {
    pub fn new(interface: impl Into<String>, target: impl Into<String>) -> Self {
        JtagOverlay {
            interface: interface.into(),
            target: target.into(),
            firmware: DEFAULT_FIRMWARE.to_string(),
        }
    }

    pub fn with_firmware(mut self, firmware: impl Into<String>) -> Self {
        self.firmware = firmware.into();
        self
    }

    /// The flash command.
    pub fn upload_command(&self) -> String {
        format!(
            "{} -f interface/{}.cfg -f target/{}.cfg -c \"program {} verify reset exit\"",
            JTAG_PROGRAM, self.interface, self.target, self.firmware
        )
    }

    /// Replace the context's upload path with this overlay.
    ///
    /// The JTAG probe always joins the active tools. A port, when given, is
    /// attached for monitoring only.
    pub fn apply(&self, ctx: &mut SynthesisContext, port: Option<&str>) {
        ctx.upload_command = self.upload_command();
        ctx.debug_tools.insert(DebugTool::JtagProbe);
        if let Some(port) = port {
            ctx.port = Some(port.to_string());
        }
        ctx.jtag = Some(self.clone());
    }
}
