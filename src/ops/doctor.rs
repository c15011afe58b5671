//! Environment health checks.
//!
//! The `doctor` command verifies that the external programs each toolchain
//! shells out to are installed, that a board is plugged in, and which
//! optional debugging tools are available.
//!
//! ## Usage
//!
//! ```bash
//! edesto doctor           # Quick check
//! edesto doctor --verbose # Detailed output
//! ```
//!
//! ## Checks Performed
//!
//! - One check per registered toolchain (arduino-cli, pio, idf.py, ...)
//! - USB serial devices (`/dev/ttyUSB*`, `/dev/ttyACM*`, `/dev/cu.usb*`)
//! - pyserial, used by the serial capture snippet
//! - Debugging tools (optional): Saleae automation, OpenOCD, PyVISA

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::core::debug_tool::DebugTool;
use crate::ops::debug_tools::{ProbeCheck, ToolProbe};
use crate::toolchain::{ToolchainAdapter, ToolchainRegistry};
use crate::util::fs::glob_paths;

/// Device paths USB serial adapters show up under.
pub const SERIAL_PORT_PATTERNS: &[&str] = &["/dev/ttyUSB*", "/dev/ttyACM*", "/dev/cu.usb*"];

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Items found by the check, printed under it
    pub details: Vec<String>,

    /// How long the check took
    pub duration: Duration,

    /// Whether this check is required or optional
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            details: Vec::new(),
            duration: Duration::ZERO,
            required: true,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            passed: false,
            ..CheckResult::pass(name, message)
        }
    }

    /// Mark this check as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,

    /// Total time taken
    pub total_duration: Duration,

    /// Environment information
    pub environment: HashMap<String, String>,
}

impl DoctorReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        DoctorReport {
            checks: Vec::new(),
            total_duration: Duration::ZERO,
            environment: HashMap::new(),
        }
    }

    /// Add a check result.
    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// Check if all required checks passed.
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    /// Get the count of passed checks.
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get the count of failed checks.
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    /// Get the count of required failed checks.
    pub fn required_failed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .count()
    }
}

impl Default for DoctorReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Run every check against the live environment.
pub fn doctor(registry: &ToolchainRegistry, probe: &dyn ToolProbe) -> DoctorReport {
    let start = Instant::now();
    let mut report = DoctorReport::new();

    report
        .environment
        .insert("os".to_string(), std::env::consts::OS.to_string());
    report
        .environment
        .insert("arch".to_string(), std::env::consts::ARCH.to_string());

    for adapter in registry.all() {
        report.add(check_toolchain(adapter));
    }

    let ports_start = Instant::now();
    report.add(check_serial_ports(&glob_paths(SERIAL_PORT_PATTERNS)).with_duration(ports_start.elapsed()));

    report.add(check_pyserial(probe));

    for tool in DebugTool::ALL {
        if let Some(check) = check_debug_tool(tool, probe) {
            report.add(check);
        }
    }

    report.total_duration = start.elapsed();
    report
}

/// Check one toolchain's required programs.
pub fn check_toolchain(adapter: &dyn ToolchainAdapter) -> CheckResult {
    let start = Instant::now();
    let availability = adapter.environment_check();
    let result = if availability.is_available() {
        CheckResult::pass(adapter.name(), availability.to_string())
    } else {
        CheckResult::fail(adapter.name(), availability.to_string())
    };
    result.with_duration(start.elapsed())
}

/// Check that at least one USB serial device exists.
pub fn check_serial_ports(ports: &[PathBuf]) -> CheckResult {
    if ports.is_empty() {
        return CheckResult::fail(
            "Serial ports",
            "No serial ports detected. Is a board connected via USB?",
        );
    }
    CheckResult::pass("Serial ports", format!("{} serial port(s) found", ports.len()))
        .with_details(ports.iter().map(|p| p.display().to_string()).collect())
}

fn check_pyserial(probe: &dyn ToolProbe) -> CheckResult {
    let start = Instant::now();
    let result = if probe.python_module_importable("serial") {
        CheckResult::pass("pyserial", "pyserial installed")
    } else {
        CheckResult::fail("pyserial", "pyserial not installed. Run: pip install pyserial")
    };
    result.with_duration(start.elapsed())
}

fn tool_label(tool: DebugTool) -> &'static str {
    match tool {
        DebugTool::Serial => "Serial",
        DebugTool::LogicAnalyzer => "Saleae Logic 2 (logic2-automation)",
        DebugTool::JtagProbe => "OpenOCD (JTAG/SWD)",
        DebugTool::Oscilloscope => "Oscilloscope (pyvisa)",
    }
}

/// Optional check for one auto-detected debugging tool.
fn check_debug_tool(tool: DebugTool, probe: &dyn ToolProbe) -> Option<CheckResult> {
    let check = ProbeCheck::for_tool(tool)?;
    let start = Instant::now();
    let result = if check.run(probe) {
        CheckResult::pass(tool_label(tool), format!("{} found", check.describe()))
    } else {
        CheckResult::fail(
            tool_label(tool),
            format!("{} not found. Install: {}", check.describe(), check.install_hint()),
        )
    };
    Some(result.with_duration(start.elapsed()).optional())
}

/// Format the doctor report for display.
pub fn format_report(report: &DoctorReport, verbose: bool) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "edesto doctor");
    let _ = writeln!(output, "=============\n");

    if verbose {
        let unknown = "unknown".to_string();
        let _ = writeln!(output, "Environment:");
        let _ = writeln!(
            output,
            "  OS: {} ({})\n",
            report.environment.get("os").unwrap_or(&unknown),
            report.environment.get("arch").unwrap_or(&unknown)
        );
    }

    let (required, optional): (Vec<&CheckResult>, Vec<&CheckResult>) =
        report.checks.iter().partition(|c| c.required);

    let _ = writeln!(output, "Checks:");
    for check in required {
        write_check(&mut output, check, verbose);
    }

    if !optional.is_empty() {
        let _ = writeln!(output, "\nDebug tools (optional):");
        for check in optional {
            write_check(&mut output, check, verbose);
        }
    }

    let _ = writeln!(output);

    let passed = report.passed_count();
    let failed = report.failed_count();
    let required_failed = report.required_failed_count();

    let _ = writeln!(output, "Summary: {} passed, {} failed", passed, failed);

    if !report.all_required_passed() {
        let _ = writeln!(
            output,
            "\nWarning: {} required check(s) failed. Fix the issues above.",
            required_failed
        );
    } else if failed > 0 {
        let _ = writeln!(
            output,
            "\nAll required checks passed. {} optional check(s) failed.",
            failed
        );
    } else {
        let _ = writeln!(output, "\nAll checks passed. Ready for embedded development.");
    }

    output
}

fn write_check(output: &mut String, check: &CheckResult, verbose: bool) {
    let status = if check.passed { "[OK]" } else { "[!!]" };
    let _ = writeln!(output, "  {} {}: {}", status, check.name, check.message);
    for detail in &check.details {
        let _ = writeln!(output, "       {}", detail);
    }
    if verbose {
        let _ = writeln!(output, "       ({:.0?})", check.duration);
    }
}
