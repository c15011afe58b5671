//! `edesto config` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::{ConfigArgs, ConfigCommands};
use edesto::util::config::{self, OVERRIDE_FILE};

pub fn execute(args: ConfigArgs) -> Result<()> {
    let dir = args.path.unwrap_or_else(|| PathBuf::from("."));

    match args.command {
        ConfigCommands::Get { key } => match config::get_value(&dir, &key)? {
            Some(value) => println!("{}", value),
            None => anyhow::bail!("`{}` is not set in {}", key, OVERRIDE_FILE),
        },
        ConfigCommands::Set { key, value } => {
            config::set_value(&dir, &key, &value)?;
            eprintln!("     Updated {} in {}", key, OVERRIDE_FILE);
        }
        ConfigCommands::List => {
            for (key, value) in config::list_values(&dir)? {
                println!("{} = {}", key, value);
            }
        }
    }

    Ok(())
}
