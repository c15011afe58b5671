//! Core data structures for edesto.
//!
//! This module contains the foundational types used throughout the crate:
//! - Boards and the built-in board catalog
//! - Debug tool capabilities

pub mod board;
pub mod catalog;
pub mod debug_tool;

pub use board::{Board, BoardInfo, BoardPackage, DetectedBoard};
pub use catalog::BoardCatalog;
pub use debug_tool::{DebugTool, DebugToolSet};
