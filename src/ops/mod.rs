//! High-level operations.
//!
//! This module contains the implementation of edesto commands.

pub mod boards;
pub mod debug_tools;
pub mod doctor;
pub mod overlay;
pub mod skill;

pub use boards::BoardResolver;
pub use debug_tools::{DebugToolDetector, SystemProbe, ToolProbe};
pub use doctor::{doctor, format_report, CheckResult, DoctorReport};
pub use overlay::JtagOverlay;
pub use skill::{generate, init, write_documents, GenerateOptions, Generated, UploadMethod};
