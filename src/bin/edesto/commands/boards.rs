//! `edesto boards` command

use anyhow::Result;

use crate::cli::BoardsArgs;
use edesto::{ResolveError, ToolchainAdapter, ToolchainRegistry};

/// Adapters to list, in registration order.
fn selected<'r>(
    registry: &'r ToolchainRegistry,
    name: Option<&str>,
) -> Result<Vec<&'r dyn ToolchainAdapter>, ResolveError> {
    match name {
        Some(name) => match registry.get(name) {
            Some(adapter) => Ok(vec![adapter]),
            None => Err(ResolveError::UnknownToolchain {
                name: name.to_string(),
                known: registry.names().into_iter().map(str::to_string).collect(),
            }),
        },
        None => Ok(registry.all().collect()),
    }
}

/// The board listing, grouped by toolchain.
pub fn format_boards(adapters: &[&dyn ToolchainAdapter]) -> String {
    let total: usize = adapters.iter().map(|a| a.boards().len()).sum();
    let mut out = format!("Supported boards ({}):\n\n", total);

    for adapter in adapters {
        let boards = adapter.boards();
        if boards.is_empty() {
            continue;
        }
        out.push_str(&format!("  {}:\n", adapter.name()));
        for board in boards {
            out.push_str(&format!("    {:<20} {}\n", board.slug, board.name));
        }
        out.push('\n');
    }
    out
}

pub fn execute(args: BoardsArgs) -> Result<()> {
    let registry = ToolchainRegistry::new();
    let adapters = selected(&registry, args.toolchain.as_deref())?;
    print!("{}", format_boards(&adapters));
    Ok(())
}
