//! edesto - toolchain and board resolution for embedded firmware projects
//!
//! This crate detects which build system a firmware project uses, which
//! board is attached and how it is flashed, and renders a skill document
//! that tells a coding agent how to compile, flash and validate firmware.

pub mod core;
pub mod ops;
pub mod synth;
pub mod toolchain;
pub mod util;

pub use core::{Board, BoardCatalog, DebugTool, DebugToolSet, DetectedBoard};
pub use synth::{render, SynthesisContext};
pub use toolchain::{ToolchainAdapter, ToolchainRegistry};
pub use util::errors::ResolveError;
