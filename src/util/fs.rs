//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Check whether `dir` directly contains a file with the given extension.
///
/// Unreadable directories count as not containing one.
pub fn has_file_with_extension(dir: &Path, ext: &str) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries.flatten().any(|entry| {
        let path = entry.path();
        path.is_file() && path.extension().is_some_and(|e| e == ext)
    })
}

/// Check whether the file at `path` contains any of `needles`.
///
/// A missing or unreadable file contains nothing.
pub fn file_contains_any(path: &Path, needles: &[&str]) -> bool {
    match fs::read_to_string(path) {
        Ok(content) => needles.iter().any(|n| content.contains(n)),
        Err(_) => false,
    }
}

/// Expand absolute glob patterns into the paths that currently exist.
pub fn glob_paths(patterns: &[&str]) -> Vec<PathBuf> {
    let mut results = Vec::new();

    for pattern in patterns {
        let entries = match glob(pattern) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("invalid glob pattern {}: {}", pattern, e);
                continue;
            }
        };
        for entry in entries {
            match entry {
                Ok(path) => results.push(path),
                Err(e) => tracing::debug!("glob error: {}", e),
            }
        }
    }

    results.sort();
    results.dedup();
    results
}
