//! Command implementations

pub mod boards;
pub mod completions;
pub mod config;
pub mod doctor;
pub mod init;
