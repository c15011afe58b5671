//! Document sections.
//!
//! Each section is a pure function of the context that returns `None` when
//! it has nothing to say, so a heading is never emitted without a body.

use std::fmt::Write as _;

use crate::core::debug_tool::DebugTool;
use crate::ops::overlay::DEFAULT_FIRMWARE;
use crate::synth::snippets::{self, fill};
use crate::synth::SynthesisContext;

/// A section renderer.
pub type Section = fn(&SynthesisContext) -> Option<String>;

/// All sections, in document order.
pub const SECTIONS: &[Section] = &[
    header,
    setup,
    commands,
    development_loop,
    debugging,
    datasheets,
    board_reference,
    troubleshooting,
];

pub fn header(ctx: &SynthesisContext) -> Option<String> {
    let mut out = format!("# Embedded Development: {}\n\n", ctx.board_name);

    match (&ctx.jtag, &ctx.port) {
        (Some(jtag), _) => {
            let _ = writeln!(
                out,
                "You are developing firmware for a {} connected through a {} debug probe (JTAG/SWD, OpenOCD target `{}`).",
                ctx.board_name, jtag.interface, jtag.target
            );
        }
        (None, Some(_)) => {
            let _ = writeln!(
                out,
                "You are developing firmware for a {} connected via USB.",
                ctx.board_name
            );
        }
        (None, None) => {
            let _ = writeln!(out, "You are developing firmware for a {}.", ctx.board_name);
        }
    }

    out.push_str("\n## Hardware\n");
    let _ = writeln!(out, "- Board: {}", ctx.board_name);
    if let Some(jtag) = &ctx.jtag {
        let _ = writeln!(out, "- Debug probe: {}", jtag.interface);
        let _ = writeln!(out, "- Target: {}", jtag.target);
    }
    if let Some(port) = &ctx.port {
        let label = if ctx.jtag.is_some() {
            "Monitor port"
        } else {
            "Port"
        };
        let _ = writeln!(out, "- {}: {}", label, port);
    }
    let _ = writeln!(out, "- Framework: {}", ctx.toolchain_name);
    let _ = write!(out, "- Baud rate: {}", ctx.baud_rate);

    Some(out)
}

pub fn setup(ctx: &SynthesisContext) -> Option<String> {
    let info = ctx.setup_info.as_deref()?;
    Some(format!("## Setup\n\n{}", info))
}

pub fn commands(ctx: &SynthesisContext) -> Option<String> {
    let mut out = format!(
        "## Commands\n\nCompile:\n```\n{}\n```\n\nFlash:\n```\n{}\n```",
        ctx.compile_command, ctx.upload_command
    );
    if let Some(monitor) = &ctx.monitor_command {
        let _ = write!(out, "\n\nMonitor:\n```\n{}\n```", monitor);
    }
    Some(out)
}

pub fn development_loop(ctx: &SynthesisContext) -> Option<String> {
    Some(format!(
        "## Development Loop

Every time you change code, follow this exact sequence:

1. Edit your firmware source files
2. Compile: `{}`
3. If compile fails, read the errors, fix them, and recompile. Do NOT flash broken code.
4. Flash: `{}`
5. Wait {} seconds for the board to reboot.
6. **Validate your changes** using the debugging tools below.
7. If validation fails, go back to step 1 and iterate.",
        ctx.compile_command, ctx.upload_command, ctx.boot_delay
    ))
}

fn guide_line(tool: DebugTool) -> &'static str {
    match tool {
        DebugTool::Serial => {
            "- **Serial output**: firmware state, log messages and sensor readings. Start here."
        }
        DebugTool::LogicAnalyzer => {
            "- **Logic analyzer**: bus timing and protocol decoding (I2C, SPI, UART), GPIO edges."
        }
        DebugTool::JtagProbe => {
            "- **JTAG/SWD**: breakpoints, stepping, registers and memory, hard faults and crashes."
        }
        DebugTool::Oscilloscope => {
            "- **Oscilloscope**: analog levels, PWM duty cycle, rise times and signal integrity."
        }
    }
}

fn jtag_subsection(ctx: &SynthesisContext) -> String {
    if let Some(jtag) = &ctx.jtag {
        return fill(
            snippets::JTAG_CONFIGURED,
            &[
                ("interface", &jtag.interface),
                ("target", &jtag.target),
                ("firmware", &jtag.firmware),
            ],
        );
    }
    match &ctx.board_info.jtag_target {
        Some(target) => fill(
            snippets::JTAG_BOARD_TARGET,
            &[("target", target), ("firmware", DEFAULT_FIRMWARE)],
        ),
        None => snippets::JTAG_GENERIC.to_string(),
    }
}

fn subsection(ctx: &SynthesisContext, tool: DebugTool) -> Option<String> {
    match tool {
        DebugTool::Serial => {
            let port = ctx.port.as_deref()?;
            let baud = ctx.baud_rate.to_string();
            let delay = ctx.boot_delay.to_string();
            Some(fill(
                snippets::SERIAL,
                &[("port", port), ("baud_rate", &baud), ("boot_delay", &delay)],
            ))
        }
        DebugTool::LogicAnalyzer => Some(snippets::LOGIC_ANALYZER.to_string()),
        DebugTool::JtagProbe => Some(jtag_subsection(ctx)),
        DebugTool::Oscilloscope => Some(snippets::OSCILLOSCOPE.to_string()),
    }
}

pub fn debugging(ctx: &SynthesisContext) -> Option<String> {
    let tools = ctx.active_tools();
    if tools.is_empty() {
        return None;
    }

    let mut out = String::from(
        "## Debugging\n\nThis is how you verify your code is actually working on the device. Pick the tool that answers your question:\n\n",
    );
    let guide: Vec<&str> = tools.iter().map(|t| guide_line(*t)).collect();
    out.push_str(&guide.join("\n"));

    for tool in tools {
        if let Some(text) = subsection(ctx, tool) {
            out.push_str("\n\n");
            out.push_str(&text);
        }
    }
    Some(out)
}

pub fn datasheets(_ctx: &SynthesisContext) -> Option<String> {
    Some(snippets::DATASHEETS.to_string())
}

/// `http_server` → `Http Server`.
fn title_case(tag: &str) -> String {
    tag.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn board_reference(ctx: &SynthesisContext) -> Option<String> {
    let info = &ctx.board_info;
    if !info.has_reference_content() {
        return None;
    }

    let mut out = format!("## {}-Specific Information", ctx.board_name);

    if let Some(caps) = &info.capabilities {
        out.push_str("\n\n### Capabilities");
        for cap in caps {
            let _ = write!(out, "\n- {}", title_case(cap));
        }
    }
    if let Some(includes) = &info.includes {
        out.push_str("\n\n### Includes");
        for (cap, include) in includes {
            let _ = write!(out, "\n- {}: `{}`", title_case(cap), include);
        }
    }
    if let Some(pins) = &info.pins {
        out.push_str("\n\n### Default Pins");
        for (name, number) in pins {
            let _ = write!(out, "\n- {}: {}", title_case(name), number);
        }
    }
    if let Some(notes) = &info.pin_notes {
        out.push_str("\n\n### Pin Reference");
        for note in notes {
            let _ = write!(out, "\n- {}", note);
        }
    }
    if let Some(pitfalls) = &info.pitfalls {
        out.push_str("\n\n### Common Pitfalls");
        for pitfall in pitfalls {
            let _ = write!(out, "\n- {}", pitfall);
        }
    }
    Some(out)
}

pub fn troubleshooting(ctx: &SynthesisContext) -> Option<String> {
    let port = ctx.port.as_deref()?;
    let baud = ctx.baud_rate.to_string();
    let delay = ctx.boot_delay.to_string();
    Some(fill(
        snippets::TROUBLESHOOTING,
        &[("port", port), ("baud_rate", &baud), ("boot_delay", &delay)],
    ))
}
