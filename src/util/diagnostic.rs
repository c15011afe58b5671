//! User-friendly diagnostic messages.
//!
//! Every resolution failure names what was missing and what to run next.

use std::fmt;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when nothing identified the project.
    pub const PASS_BOARD_AND_PORT: &str =
        "Pass the board and port explicitly: `edesto init --board <slug> --port <port>`";

    /// Suggestion when a board slug is unknown.
    pub const LIST_BOARDS: &str = "Run `edesto boards` to see supported boards";

    /// Suggestion when a required external tool is missing.
    pub const RUN_DOCTOR: &str = "Run `edesto doctor` to check your environment";

    /// Suggestion when generated files would be overwritten.
    pub const FORCE: &str = "Re-run with `--force` to overwrite existing files";

    /// Suggestion for a custom build system.
    pub const OVERRIDE_FILE: &str =
        "Declare a custom toolchain in edesto.toml: `edesto config set toolchain.compile \"make\"`";
}

/// An error message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let prefix = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };
        let _ = writeln!(output, "{}: {}", prefix, self.message);

        if let Some(ref path) = self.location {
            let _ = writeln!(output, "  --> {}", path.display());
        }

        for ctx in &self.context {
            let _ = writeln!(output, "  - {}", ctx);
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            let _ = writeln!(output, "{}: consider:", help_prefix);
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                let _ = writeln!(output, "  {}. {}", i + 1, suggestion);
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
