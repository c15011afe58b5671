//! edesto CLI - skill documents for embedded firmware projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use edesto::util::diagnostic;
use edesto::ResolveError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ResolveError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("edesto=debug")
    } else {
        EnvFilter::new("edesto=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Init(args) => commands::init::execute(args),
        Commands::Boards(args) => commands::boards::execute(args),
        Commands::Doctor => commands::doctor::execute(cli.verbose),
        Commands::Config(args) => commands::config::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
