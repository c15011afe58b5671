//! Skill document synthesis.
//!
//! Rendering is a pure function of a [`SynthesisContext`]: sections are
//! rendered in a fixed order and only non-empty ones are joined. Nothing
//! here touches the filesystem or runs a process.

pub mod context;
pub mod sections;
pub mod snippets;

pub use context::SynthesisContext;
pub use snippets::unresolved_placeholders;

/// Render the full document.
pub fn render(ctx: &SynthesisContext) -> String {
    let parts: Vec<String> = sections::SECTIONS
        .iter()
        .filter_map(|section| section(ctx))
        .collect();

    let mut doc = parts.join("\n\n");
    doc.push('\n');
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::BoardCatalog;
    use crate::core::debug_tool::{DebugTool, DebugToolSet};
    use crate::ops::overlay::JtagOverlay;
    use crate::toolchain::{CustomToolchain, ToolchainRegistry};

    fn all_tools() -> DebugToolSet {
        DebugTool::ALL.into_iter().collect()
    }

    fn heading_positions(doc: &str, headings: &[&str]) -> Vec<usize> {
        headings
            .iter()
            .filter_map(|h| doc.find(&format!("\n{}", h)))
            .collect()
    }

    #[test]
    fn test_render_is_idempotent() {
        let board = BoardCatalog::global().get("esp32").unwrap();
        let registry = ToolchainRegistry::new();
        let ctx = SynthesisContext::serial(registry.get("arduino").unwrap(), board, "/dev/ttyUSB0")
            .with_debug_tools(&all_tools());
        assert_eq!(render(&ctx), render(&ctx));
    }

    #[test]
    fn test_no_placeholders_for_any_catalog_context() {
        let registry = ToolchainRegistry::new();
        let overlay = JtagOverlay::new("stlink", "stm32f4x");
        for board in BoardCatalog::global().all() {
            for adapter in registry.all() {
                let serial = SynthesisContext::serial(adapter, board, "/dev/ttyUSB0")
                    .with_debug_tools(&all_tools());
                let jtag = SynthesisContext::jtag(adapter, board, &overlay, None)
                    .with_debug_tools(&all_tools());
                for ctx in [serial, jtag] {
                    let doc = render(&ctx);
                    assert!(
                        unresolved_placeholders(&doc).is_empty(),
                        "{} / {}: {:?}",
                        board.slug,
                        adapter.name(),
                        unresolved_placeholders(&doc)
                    );
                }
            }
        }
    }

    #[test]
    fn test_braced_user_values_render_verbatim() {
        let board = BoardCatalog::global().get("rp2040").unwrap();
        let registry = ToolchainRegistry::new();
        let arduino = registry.get("arduino").unwrap();

        let overlay = JtagOverlay::new("cmsis-dap", "rp2040").with_firmware("build/{app}.elf");
        let doc = render(
            &SynthesisContext::jtag(arduino, board, &overlay, None).with_debug_tools(&all_tools()),
        );
        assert!(doc.contains("program build/{app}.elf verify reset exit"));
        let leftover = unresolved_placeholders(&doc);
        assert!(!leftover.is_empty());
        assert!(leftover.iter().all(|token| *token == "{app}"));

        let ctx = SynthesisContext::serial(arduino, board, "/dev/serial/by-id/{board}-if00")
            .with_debug_tools(&all_tools());
        let doc = render(&ctx);
        assert!(doc.contains("serial.Serial('/dev/serial/by-id/{board}-if00', 115200, timeout=1)"));
        assert!(doc.contains("Port `/dev/serial/by-id/{board}-if00` not found"));
    }

    #[test]
    fn test_no_port_omits_serial_and_troubleshooting() {
        let board = BoardCatalog::global().get("rp2040").unwrap();
        let registry = ToolchainRegistry::new();
        let overlay = JtagOverlay::new("cmsis-dap", "rp2040");
        let ctx = SynthesisContext::jtag(registry.get("arduino").unwrap(), board, &overlay, None)
            .with_debug_tools(&all_tools());
        let doc = render(&ctx);

        assert!(!doc.contains("### Serial Output"));
        assert!(!doc.contains("**Serial output**"));
        assert!(!doc.contains("## Troubleshooting"));
        assert!(doc.contains("### Logic Analyzer"));
        assert!(doc.contains("### Oscilloscope"));
    }

    #[test]
    fn test_jtag_header_names_probe_and_target() {
        let board = BoardCatalog::global().get("esp32s3").unwrap();
        let registry = ToolchainRegistry::new();
        let overlay = JtagOverlay::new("jlink", "esp32s3");
        for port in [None, Some("/dev/ttyUSB0")] {
            let ctx = SynthesisContext::jtag(registry.get("espidf").unwrap(), board, &overlay, port);
            let doc = render(&ctx);
            let header = doc.split("\n## Commands").next().unwrap();
            assert!(!header.contains("via USB"));
            assert!(header.contains("jlink"));
            assert!(header.contains("esp32s3"));
        }
    }

    #[test]
    fn test_scenario_jtag_without_port() {
        let board = BoardCatalog::global().get("stm32-nucleo").unwrap();
        let registry = ToolchainRegistry::new();
        let overlay = JtagOverlay::new("stlink", "stm32f4x");
        let ctx = SynthesisContext::jtag(registry.get("cmake-native").unwrap(), board, &overlay, None);

        assert_eq!(
            ctx.upload_command,
            "openocd -f interface/stlink.cfg -f target/stm32f4x.cfg -c \"program build/firmware.elf verify reset exit\""
        );
        let doc = render(&ctx);
        assert!(!doc.contains("### Serial Output"));
        assert!(doc.contains("### JTAG/SWD Debugging (OpenOCD)"));
    }

    #[test]
    fn test_scenario_serial_only() {
        let board = BoardCatalog::global().get("arduino-uno").unwrap();
        let registry = ToolchainRegistry::new();
        let ctx = SynthesisContext::serial(registry.get("arduino").unwrap(), board, "/dev/ttyACM0")
            .with_debug_tools(&DebugToolSet::new());
        let doc = render(&ctx);

        assert!(doc.contains("### Serial Output"));
        assert!(doc.contains("**Serial output**"));
        assert!(!doc.contains("### Logic Analyzer"));
        assert!(!doc.contains("### JTAG/SWD"));
        assert!(!doc.contains("### Oscilloscope"));
        assert!(!doc.contains("**Logic analyzer**"));
        assert!(doc.contains("serial.Serial('/dev/ttyACM0', 9600, timeout=1)"));
        assert!(doc.contains("## Troubleshooting"));
    }

    #[test]
    fn test_section_order_is_fixed() {
        let headings = [
            "## Hardware",
            "## Setup",
            "## Commands",
            "## Development Loop",
            "## Debugging",
            "## Datasheets",
            "## ESP32-Specific Information",
            "## Troubleshooting",
        ];
        let board = BoardCatalog::global().get("esp32").unwrap();
        let registry = ToolchainRegistry::new();
        let ctx = SynthesisContext::serial(registry.get("arduino").unwrap(), board, "/dev/ttyUSB0")
            .with_debug_tools(&all_tools());
        let doc = render(&ctx);

        let positions = heading_positions(&doc, &headings);
        assert_eq!(positions.len(), headings.len());
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let tools = heading_positions(
            &doc,
            &[
                "### Serial Output",
                "### Logic Analyzer",
                "### JTAG/SWD",
                "### Oscilloscope",
            ],
        );
        assert_eq!(tools.len(), 4);
        assert!(tools.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_custom_board_has_no_empty_headings() {
        let custom = CustomToolchain::new("custom", "make build", "make flash PORT={port}", 115200);
        let board = crate::core::board::Board::custom("Custom Board", 115200);
        let doc = render(&SynthesisContext::serial(&custom, &board, "/dev/ttyUSB0"));

        assert!(doc.contains("make flash PORT=/dev/ttyUSB0"));
        assert!(!doc.contains("-Specific Information"));
        assert!(!doc.contains("## Setup"));
        assert!(!doc.contains("\n\n\n"));
        assert!(doc.ends_with('\n'));
    }
}
