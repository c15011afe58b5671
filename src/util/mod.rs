//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod errors;
pub mod fs;
pub mod process;

pub use config::OverrideFile;
pub use diagnostic::Diagnostic;
pub use errors::ResolveError;
