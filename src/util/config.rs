//! Project override file support.
//!
//! A project may carry an `edesto.toml` that preempts automatic detection:
//!
//! ```toml
//! [toolchain]
//! name = "nrf-make"
//! compile = "make build"
//! upload = "make flash PORT={port}"
//!
//! [serial]
//! port = "/dev/ttyUSB0"
//! baud_rate = 115200
//!
//! [jtag]
//! board = "stm32-nucleo"
//! interface = "stlink"
//! target = "stm32f4x"
//! ```
//!
//! `[jtag].board` records which board the probe setup belongs to. A setup
//! saved for one board is never applied to another.
//!
//! Reads go through `serde`; writes go through `toml_edit` so comments and
//! hand formatting survive.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{value, DocumentMut, Item, Table};

use crate::ops::overlay::JtagOverlay;
use crate::toolchain::CustomToolchain;
use crate::util::fs;

/// Name of the override file in a project directory.
pub const OVERRIDE_FILE: &str = "edesto.toml";

/// Baud rate used when `[serial].baud_rate` is not set.
pub const DEFAULT_BAUD_RATE: u32 = 115200;

/// Toolchain name used when `[toolchain].name` is not set.
pub const DEFAULT_TOOLCHAIN_NAME: &str = "custom";

/// Parsed `edesto.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideFile {
    pub toolchain: ToolchainSection,
    pub serial: SerialSection,
    pub jtag: JtagSection,
}

/// `[toolchain]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSection {
    pub name: Option<String>,
    pub compile: Option<String>,
    /// May contain `{port}`
    pub upload: Option<String>,
}

/// `[serial]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialSection {
    pub port: Option<String>,
    pub baud_rate: Option<u32>,
}

/// `[jtag]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JtagSection {
    /// Board slug the setup was saved for
    pub board: Option<String>,
    pub interface: Option<String>,
    pub target: Option<String>,
    pub firmware: Option<String>,
}

impl OverrideFile {
    /// Path of the override file inside `dir`.
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(OVERRIDE_FILE)
    }

    /// Load the override file. `Ok(None)` when the file does not exist.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = Self::path(dir);
        if !path.is_file() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let file = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(file))
    }

    /// Load the override file, treating a malformed file as absent.
    pub fn load_or_default(dir: &Path) -> Self {
        Self::load(dir)
            .unwrap_or_else(|e| {
                tracing::warn!("ignoring {}: {:#}", OVERRIDE_FILE, e);
                None
            })
            .unwrap_or_default()
    }

    /// The custom toolchain declared by `[toolchain]`, if it names both a
    /// compile and an upload command.
    pub fn custom_toolchain(&self) -> Option<CustomToolchain> {
        let compile = self.toolchain.compile.as_deref()?;
        let upload = self.toolchain.upload.as_deref()?;
        let name = self
            .toolchain
            .name
            .as_deref()
            .unwrap_or(DEFAULT_TOOLCHAIN_NAME);
        Some(CustomToolchain::new(name, compile, upload, self.baud_rate()))
    }

    /// The JTAG overlay declared by `[jtag]`, if complete.
    pub fn jtag_overlay(&self) -> Option<JtagOverlay> {
        let overlay = JtagOverlay::new(
            self.jtag.interface.as_deref()?,
            self.jtag.target.as_deref()?,
        );
        Some(match self.jtag.firmware.as_deref() {
            Some(firmware) => overlay.with_firmware(firmware),
            None => overlay,
        })
    }

    /// The `[jtag]` section, unless it was saved for a different board.
    pub fn jtag_for(&self, board: &str) -> Option<&JtagSection> {
        match self.jtag.board.as_deref() {
            Some(saved) if saved != board => None,
            _ => Some(&self.jtag),
        }
    }

    pub fn port(&self) -> Option<&str> {
        self.serial.port.as_deref().filter(|p| !p.is_empty())
    }

    pub fn baud_rate(&self) -> u32 {
        self.serial.baud_rate.unwrap_or(DEFAULT_BAUD_RATE)
    }
}

/// Load the project's custom toolchain override, if any.
///
/// A file that fails to parse, or whose `[toolchain]` section lacks a
/// compile or upload command, yields no override.
pub fn load_custom_toolchain(dir: &Path) -> Option<(CustomToolchain, OverrideFile)> {
    let file = OverrideFile::load_or_default(dir);

    match file.custom_toolchain() {
        Some(toolchain) => Some((toolchain, file)),
        None => {
            if file.toolchain != ToolchainSection::default() {
                tracing::warn!(
                    "ignoring [toolchain] in {}: both `compile` and `upload` are required",
                    OVERRIDE_FILE
                );
            }
            None
        }
    }
}

fn split_key(key: &str) -> Result<(&str, &str)> {
    match key.split_once('.') {
        Some((section, name)) if !section.is_empty() && !name.is_empty() => Ok((section, name)),
        _ => bail!("key must be dotted (section.key), got: {}", key),
    }
}

fn read_table(dir: &Path) -> Result<Option<toml::Table>> {
    let path = OverrideFile::path(dir);
    if !path.is_file() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&path)?;
    let table = contents
        .parse::<toml::Table>()
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(table))
}

/// Render a TOML value the way users typed it: strings bare, others as TOML.
pub fn display_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Look up a dotted key such as `serial.baud_rate`.
pub fn get_value(dir: &Path, key: &str) -> Result<Option<String>> {
    let (section, name) = split_key(key)?;
    let Some(table) = read_table(dir)? else {
        return Ok(None);
    };
    Ok(table
        .get(section)
        .and_then(|s| s.get(name))
        .map(display_value))
}

/// All values as flat `section.key` pairs, in file order.
pub fn list_values(dir: &Path) -> Result<Vec<(String, String)>> {
    let Some(table) = read_table(dir)? else {
        return Ok(Vec::new());
    };

    let mut values = Vec::new();
    for (section, item) in &table {
        match item {
            toml::Value::Table(inner) => {
                for (key, v) in inner {
                    values.push((format!("{}.{}", section, key), display_value(v)));
                }
            }
            other => values.push((section.clone(), display_value(other))),
        }
    }
    Ok(values)
}

fn load_document(path: &Path) -> Result<DocumentMut> {
    if !path.exists() {
        return Ok(DocumentMut::new());
    }
    let contents = fs::read_to_string(path)?;
    contents
        .parse::<DocumentMut>()
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn ensure_table<'a>(doc: &'a mut DocumentMut, section: &str) -> Result<&'a mut Table> {
    if !doc.contains_key(section) {
        doc[section] = Item::Table(Table::new());
    }
    doc[section]
        .as_table_mut()
        .with_context(|| format!("`{}` in {} is not a table", section, OVERRIDE_FILE))
}

/// Set a dotted key, creating the file and section as needed.
///
/// Integer-looking values are stored as integers.
pub fn set_value(dir: &Path, key: &str, raw: &str) -> Result<()> {
    let (section, name) = split_key(key)?;
    let path = OverrideFile::path(dir);
    let mut doc = load_document(&path)?;

    let table = ensure_table(&mut doc, section)?;
    table[name] = match raw.parse::<i64>() {
        Ok(n) => value(n),
        Err(_) => value(raw),
    };

    fs::write_string(&path, &doc.to_string())
}

/// Persist a board's JTAG configuration, plus the monitoring port when one
/// is known.
pub fn save_jtag(
    dir: &Path,
    board: &str,
    overlay: &JtagOverlay,
    port: Option<&str>,
    baud: u32,
) -> Result<()> {
    let path = OverrideFile::path(dir);
    let mut doc = load_document(&path)?;

    let jtag = ensure_table(&mut doc, "jtag")?;
    jtag["board"] = value(board);
    jtag["interface"] = value(overlay.interface.as_str());
    jtag["target"] = value(overlay.target.as_str());
    if overlay.firmware != crate::ops::overlay::DEFAULT_FIRMWARE {
        jtag["firmware"] = value(overlay.firmware.as_str());
    }

    if let Some(port) = port {
        let serial = ensure_table(&mut doc, "serial")?;
        serial["port"] = value(port);
        serial["baud_rate"] = value(i64::from(baud));
    }

    fs::write_string(&path, &doc.to_string())
}
