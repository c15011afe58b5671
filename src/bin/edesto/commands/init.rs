//! `edesto init` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::InitArgs;
use edesto::ops::{skill, GenerateOptions, SystemProbe};
use edesto::ToolchainRegistry;

/// Map parsed arguments onto generation options.
pub fn generate_options(args: &InitArgs) -> GenerateOptions {
    GenerateOptions {
        dir: args.path.clone().unwrap_or_else(|| PathBuf::from(".")),
        toolchain: args.toolchain.clone(),
        board: args.board.clone(),
        port: args.port.clone(),
        upload: args.upload.map(Into::into),
        probe: args.probe.clone(),
        target: args.target.clone(),
    }
}

pub fn execute(args: InitArgs) -> Result<()> {
    let registry = ToolchainRegistry::new();
    let opts = generate_options(&args);

    let (generated, written) = skill::init(&registry, &SystemProbe, &opts, args.force)?;

    let connection = match (&generated.jtag, &generated.port) {
        (Some(jtag), _) => format!("via {} ({})", jtag.interface, jtag.target),
        (None, Some(port)) => format!("on {}", port),
        (None, None) => String::new(),
    };
    eprintln!(
        "   Generated {} for {} {}",
        skill::SKILLS_FILE,
        generated.board.name,
        connection
    );

    let copies: Vec<String> = written
        .iter()
        .skip(1)
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    eprintln!("     Also created: {}", copies.join(", "));

    if generated.jtag.is_some() {
        eprintln!("       Saved JTAG setup to {}", edesto::util::config::OVERRIDE_FILE);
    }

    Ok(())
}
