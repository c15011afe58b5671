//! Skill document generation: resolve toolchain, board and port, then render.
//!
//! Resolution and rendering are separate phases. Everything that can fail
//! or touch the environment happens before the [`SynthesisContext`] exists.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Result};

use crate::core::board::{Board, DetectedBoard};
use crate::core::catalog::BoardCatalog;
use crate::ops::boards::{detect_with, BoardResolver};
use crate::ops::debug_tools::{DebugToolDetector, ToolProbe};
use crate::ops::overlay::{JtagOverlay, JTAG_PROGRAM};
use crate::synth::{self, SynthesisContext};
use crate::toolchain::{ProjectDetector, ResolvedToolchain, ToolchainAdapter, ToolchainRegistry};
use crate::util::config::{self, OverrideFile};
use crate::util::errors::ResolveError;
use crate::util::fs;

/// The primary output file.
pub const SKILLS_FILE: &str = "SKILLS.md";

/// Identical copies for other coding assistants.
pub const COPY_FILES: &[&str] = &["CLAUDE.md", ".cursorrules", "AGENTS.md"];

/// Name shown for boards of override-file projects.
pub const CUSTOM_BOARD_NAME: &str = "Custom Board";

const OPENOCD_INSTALL_HINT: &str = "https://openocd.org/pages/getting-openocd.html";

/// How firmware reaches the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadMethod {
    /// The toolchain's own upload over a serial port
    #[default]
    Serial,
    /// OpenOCD through a JTAG/SWD probe
    Jtag,
}

impl fmt::Display for UploadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadMethod::Serial => write!(f, "serial"),
            UploadMethod::Jtag => write!(f, "jtag"),
        }
    }
}

impl FromStr for UploadMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "serial" => Ok(UploadMethod::Serial),
            "jtag" => Ok(UploadMethod::Jtag),
            other => bail!("unknown upload method `{}` (expected serial or jtag)", other),
        }
    }
}

/// Inputs to [`generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Project directory
    pub dir: PathBuf,
    /// Toolchain name, bypassing project detection
    pub toolchain: Option<String>,
    /// Board slug
    pub board: Option<String>,
    /// Serial port
    pub port: Option<String>,
    /// Upload method. `None` uses JTAG when the override file has a
    /// complete `[jtag]` section, serial otherwise.
    pub upload: Option<UploadMethod>,
    /// JTAG probe interface (e.g., "stlink")
    pub probe: Option<String>,
    /// OpenOCD target, when the board has none or it should be overridden
    pub target: Option<String>,
}

/// A rendered document and the values it was resolved from.
#[derive(Debug, Clone)]
pub struct Generated {
    pub context: SynthesisContext,
    pub text: String,
    pub board: Board,
    pub port: Option<String>,
    pub jtag: Option<JtagOverlay>,
}

/// Resolve everything and render the document. Nothing is written.
pub fn generate(
    registry: &ToolchainRegistry,
    probe: &dyn ToolProbe,
    opts: &GenerateOptions,
) -> Result<Generated> {
    let resolved = resolve_toolchain(registry, opts)?;
    let overrides = match (resolved.as_ref().and_then(|r| r.override_file()), &opts.toolchain) {
        (Some(file), _) => file.clone(),
        (None, Some(_)) => OverrideFile::load_or_default(&opts.dir),
        // Detection already warned about a malformed file.
        (None, None) => OverrideFile::load(&opts.dir).ok().flatten().unwrap_or_default(),
    };

    let upload = match opts.upload {
        Some(method) => method,
        None => saved_upload_method(&overrides, opts),
    };
    tracing::debug!("upload method: {}", upload);

    let resolver = BoardResolver::new(registry);
    let context = match upload {
        UploadMethod::Jtag => jtag_context(&resolver, probe, resolved.as_ref(), &overrides, opts)?,
        UploadMethod::Serial => serial_context(&resolver, registry, resolved.as_ref(), &overrides, opts)?,
    };

    let (context, board) = context;
    let context = context.with_debug_tools(&DebugToolDetector::new(probe).detect());
    let text = synth::render(&context);

    Ok(Generated {
        port: context.port.clone(),
        jtag: context.jtag.clone(),
        board,
        text,
        context,
    })
}

/// JTAG when the override file holds a complete probe setup for the
/// requested board, serial otherwise.
fn saved_upload_method(overrides: &OverrideFile, opts: &GenerateOptions) -> UploadMethod {
    if overrides.jtag_overlay().is_none() {
        return UploadMethod::Serial;
    }
    let saved_board = overrides.jtag.board.as_deref();
    match opts.board.as_deref() {
        Some(board) if overrides.jtag_for(board).is_none() => {
            tracing::info!(
                "not using the JTAG setup in {}: it was saved for {}",
                config::OVERRIDE_FILE,
                saved_board.unwrap_or("another board")
            );
            UploadMethod::Serial
        }
        _ => {
            tracing::info!(
                "flashing over JTAG as saved in {} (pass `--upload serial` to override)",
                config::OVERRIDE_FILE
            );
            UploadMethod::Jtag
        }
    }
}

fn resolve_toolchain<'r>(
    registry: &'r ToolchainRegistry,
    opts: &GenerateOptions,
) -> Result<Option<ResolvedToolchain<'r>>, ResolveError> {
    match opts.toolchain.as_deref() {
        Some(name) => match registry.get(name) {
            Some(adapter) => Ok(Some(ResolvedToolchain::Detected(adapter))),
            None => Err(ResolveError::UnknownToolchain {
                name: name.to_string(),
                known: registry.names().into_iter().map(str::to_string).collect(),
            }),
        },
        None => Ok(ProjectDetector::new(registry).resolve(&opts.dir)),
    }
}

/// The resolved toolchain, else the first adapter that knows the board.
fn pick_adapter<'a>(
    resolver: &BoardResolver<'a>,
    resolved: Option<&'a ResolvedToolchain<'a>>,
    board: &Board,
) -> Result<&'a dyn ToolchainAdapter, ResolveError> {
    if let Some(resolved) = resolved {
        return Ok(resolved.adapter());
    }
    resolver
        .adapter_for_board(board)
        .ok_or_else(|| ResolveError::UnknownBoard {
            slug: board.slug.clone(),
            known: BoardCatalog::global()
                .slugs()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
}

fn jtag_context<'a>(
    resolver: &BoardResolver<'a>,
    probe: &dyn ToolProbe,
    resolved: Option<&'a ResolvedToolchain<'a>>,
    overrides: &OverrideFile,
    opts: &GenerateOptions,
) -> Result<(SynthesisContext, Board), ResolveError> {
    let slug = opts
        .board
        .as_deref()
        .or(overrides.jtag.board.as_deref())
        .ok_or_else(|| ResolveError::BoardRequired {
            reason: "JTAG upload needs to know the board".to_string(),
        })?;
    let board = resolver.find_board(slug)?;
    let saved = overrides.jtag_for(&board.slug);

    let interface = opts
        .probe
        .as_deref()
        .or(saved.and_then(|s| s.interface.as_deref()))
        .ok_or(ResolveError::ProbeRequired)?;
    let target = opts
        .target
        .as_deref()
        .or(saved.and_then(|s| s.target.as_deref()))
        .or(board.jtag_target.as_deref())
        .ok_or_else(|| ResolveError::JtagTargetRequired {
            board: board.name.clone(),
        })?;

    if !probe.program_on_path(JTAG_PROGRAM) {
        return Err(ResolveError::MissingTool {
            tool: JTAG_PROGRAM.to_string(),
            install_hint: OPENOCD_INSTALL_HINT.to_string(),
        });
    }

    let mut overlay = JtagOverlay::new(interface, target);
    if let Some(firmware) = saved.and_then(|s| s.firmware.as_deref()) {
        overlay = overlay.with_firmware(firmware);
    }
    let port = opts.port.as_deref().or(overrides.port());

    let adapter = pick_adapter(resolver, resolved, board)?;
    tracing::info!(
        "{} via {} probe, target {} ({})",
        board.name,
        overlay.interface,
        overlay.target,
        adapter.name()
    );
    Ok((
        SynthesisContext::jtag(adapter, board, &overlay, port),
        board.clone(),
    ))
}

fn serial_context<'a>(
    resolver: &BoardResolver<'a>,
    registry: &'a ToolchainRegistry,
    resolved: Option<&'a ResolvedToolchain<'a>>,
    overrides: &OverrideFile,
    opts: &GenerateOptions,
) -> Result<(SynthesisContext, Board), ResolveError> {
    let is_override = resolved.is_some_and(|r| r.is_override());

    let (board, port, adapter) = match (opts.board.as_deref(), opts.port.as_deref()) {
        (Some(slug), Some(port)) => {
            let board = resolver.find_board(slug)?.clone();
            let adapter = pick_adapter(resolver, resolved, &board)?;
            (board, port.to_string(), adapter)
        }

        (Some(slug), None) => {
            let board = resolver.find_board(slug)?.clone();
            match overrides.port().filter(|_| is_override) {
                Some(port) => {
                    let adapter = pick_adapter(resolver, resolved, &board)?;
                    (board, port.to_string(), adapter)
                }
                None => {
                    let detected = find_port(resolver, resolved, &board)?;
                    let adapter = adapter_for_detected(resolver, registry, resolved, &detected)?;
                    tracing::info!("detected {} on {}", board.name, detected.port);
                    (board, detected.port, adapter)
                }
            }
        }

        (None, Some(port)) => match resolved.filter(|r| r.is_override()) {
            Some(resolved) => {
                let board = Board::custom(CUSTOM_BOARD_NAME, overrides.baud_rate());
                (board, port.to_string(), resolved.adapter())
            }
            None => {
                return Err(ResolveError::BoardRequired {
                    reason: format!("cannot tell which board is on {}", port),
                })
            }
        },

        (None, None) => match resolved.filter(|r| r.is_override()) {
            Some(resolved) => {
                let port = overrides.port().ok_or_else(|| ResolveError::PortRequired {
                    board: CUSTOM_BOARD_NAME.to_string(),
                })?;
                let board = Board::custom(CUSTOM_BOARD_NAME, overrides.baud_rate());
                (board, port.to_string(), resolved.adapter())
            }
            None => {
                let detected = single_detected(resolver, resolved, opts)?;
                let adapter = adapter_for_detected(resolver, registry, resolved, &detected)?;
                tracing::info!("detected {} on {}", detected.board.name, detected.port);
                (detected.board, detected.port, adapter)
            }
        },
    };

    Ok((SynthesisContext::serial(adapter, &board, &port), board))
}

/// The resolved toolchain, else the one whose enumeration found the board.
fn adapter_for_detected<'a>(
    resolver: &BoardResolver<'a>,
    registry: &'a ToolchainRegistry,
    resolved: Option<&'a ResolvedToolchain<'a>>,
    detected: &DetectedBoard,
) -> Result<&'a dyn ToolchainAdapter, ResolveError> {
    match (resolved, registry.get(&detected.toolchain_name)) {
        (Some(resolved), _) => Ok(resolved.adapter()),
        (None, Some(adapter)) => Ok(adapter),
        (None, None) => pick_adapter(resolver, None, &detected.board),
    }
}

/// `board` as reported by the resolved toolchain, or by every toolchain
/// when none was resolved.
fn find_port(
    resolver: &BoardResolver<'_>,
    resolved: Option<&ResolvedToolchain<'_>>,
    board: &Board,
) -> Result<DetectedBoard, ResolveError> {
    let detected = match resolved {
        Some(resolved) => detect_with(resolved.adapter()),
        None => resolver.detect_all(),
    };
    detected
        .into_iter()
        .find(|d| d.board.slug == board.slug)
        .ok_or_else(|| ResolveError::PortNotFound {
            board: board.slug.clone(),
        })
}

fn single_detected(
    resolver: &BoardResolver<'_>,
    resolved: Option<&ResolvedToolchain<'_>>,
    opts: &GenerateOptions,
) -> Result<DetectedBoard, ResolveError> {
    let mut detected = resolver.detect_all();
    match detected.len() {
        0 => match resolved {
            Some(resolved) => Err(ResolveError::NoBoardsDetected {
                toolchain: resolved.name().to_string(),
            }),
            None => Err(ResolveError::UnresolvedProject {
                dir: opts.dir.clone(),
            }),
        },
        1 => Ok(detected.remove(0)),
        _ => {
            for (port, reports) in BoardResolver::port_conflicts(&detected) {
                tracing::warn!("{} toolchains report a board on {}", reports.len(), port);
            }
            Err(ResolveError::AmbiguousMatch {
                candidates: detected,
            })
        }
    }
}

/// Write the document to `SKILLS.md` and its copies.
///
/// Refuses to overwrite an existing `SKILLS.md` unless `force` is set.
pub fn write_documents(dir: &Path, text: &str, force: bool) -> Result<Vec<PathBuf>> {
    let skills = dir.join(SKILLS_FILE);
    if skills.exists() && !force {
        return Err(ResolveError::OutputExists { path: skills }.into());
    }

    let mut written = Vec::with_capacity(1 + COPY_FILES.len());
    for name in std::iter::once(SKILLS_FILE).chain(COPY_FILES.iter().copied()) {
        let path = dir.join(name);
        fs::write_string(&path, text)?;
        written.push(path);
    }
    Ok(written)
}

/// Generate, write the documents, and persist a JTAG setup.
pub fn init(
    registry: &ToolchainRegistry,
    probe: &dyn ToolProbe,
    opts: &GenerateOptions,
    force: bool,
) -> Result<(Generated, Vec<PathBuf>)> {
    let generated = generate(registry, probe, opts)?;
    let written = write_documents(&opts.dir, &generated.text, force)?;

    if let Some(overlay) = &generated.jtag {
        config::save_jtag(
            &opts.dir,
            &generated.board.slug,
            overlay,
            generated.port.as_deref(),
            generated.context.baud_rate,
        )?;
        tracing::debug!("saved JTAG setup to {}", config::OVERRIDE_FILE);
    }

    Ok((generated, written))
}
