//! Debugging tool detection.
//!
//! Each tool is found by one independent check. A check that fails, hangs
//! or cannot run counts as "not present" and never affects the others.

use std::time::Duration;

use crate::core::debug_tool::{DebugTool, DebugToolSet};
use crate::ops::overlay::JTAG_PROGRAM;
use crate::util::process::{find_executable, ProcessBuilder};

/// Upper bound on a single Python import probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Python interpreters tried, in order.
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// How a tool's presence is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeCheck {
    /// A Python package can be imported
    PythonModule(&'static str),
    /// A program is on PATH
    Program(&'static str),
}

impl ProbeCheck {
    /// The check that detects `tool`, if it is auto-detected at all.
    pub fn for_tool(tool: DebugTool) -> Option<ProbeCheck> {
        match tool {
            DebugTool::Serial => None,
            DebugTool::LogicAnalyzer => Some(ProbeCheck::PythonModule("saleae")),
            DebugTool::JtagProbe => Some(ProbeCheck::Program(JTAG_PROGRAM)),
            DebugTool::Oscilloscope => Some(ProbeCheck::PythonModule("pyvisa")),
        }
    }

    /// Run the check.
    pub fn run(&self, probe: &dyn ToolProbe) -> bool {
        match self {
            ProbeCheck::PythonModule(module) => probe.python_module_importable(module),
            ProbeCheck::Program(program) => probe.program_on_path(program),
        }
    }

    /// What is checked, for reports.
    pub fn describe(&self) -> String {
        match self {
            ProbeCheck::PythonModule(module) => format!("Python package `{}`", module),
            ProbeCheck::Program(program) => format!("`{}` on PATH", program),
        }
    }

    /// Install hint for reports.
    pub fn install_hint(&self) -> String {
        match self {
            ProbeCheck::PythonModule(module) => format!("pip install {}", module),
            ProbeCheck::Program(program) => format!("install {} from your package manager", program),
        }
    }
}

/// Environment queries behind tool detection.
pub trait ToolProbe {
    fn python_module_importable(&self, module: &str) -> bool;

    fn program_on_path(&self, program: &str) -> bool;
}

/// Probes the real environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl ToolProbe for SystemProbe {
    fn python_module_importable(&self, module: &str) -> bool {
        let Some(python) = PYTHON_CANDIDATES.iter().find_map(|p| find_executable(p)) else {
            tracing::debug!("no Python interpreter on PATH");
            return false;
        };

        let import = format!("import {}", module);
        match ProcessBuilder::new(&python)
            .args(["-c", import.as_str()])
            .timeout(PROBE_TIMEOUT)
            .exec()
        {
            Ok(output) => output.status.success(),
            Err(e) => {
                tracing::debug!("probe for `{}` failed: {:#}", module, e);
                false
            }
        }
    }

    fn program_on_path(&self, program: &str) -> bool {
        find_executable(program).is_some()
    }
}

/// Detects which debugging tools are available.
pub struct DebugToolDetector<'p> {
    probe: &'p dyn ToolProbe,
}

impl<'p> DebugToolDetector<'p> {
    pub fn new(probe: &'p dyn ToolProbe) -> Self {
        DebugToolDetector { probe }
    }

    /// Run every check. Serial is never auto-detected: it depends on the
    /// resolved port, not on installed software.
    pub fn detect(&self) -> DebugToolSet {
        let found: DebugToolSet = DebugTool::ALL
            .into_iter()
            .filter(|tool| {
                ProbeCheck::for_tool(*tool).is_some_and(|check| check.run(self.probe))
            })
            .collect();
        tracing::debug!(
            "debug tools: {}",
            found.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
        );
        found
    }
}
