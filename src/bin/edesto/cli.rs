//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use edesto::ops::UploadMethod;

/// edesto - generate agent skill documents for embedded firmware projects
#[derive(Parser)]
#[command(name = "edesto")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect the toolchain and board, then write SKILLS.md and its copies
    Init(InitArgs),

    /// List supported boards
    Boards(BoardsArgs),

    /// Check the environment for embedded development
    Doctor,

    /// Read or edit edesto.toml
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// How firmware reaches the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UploadArg {
    /// The toolchain's upload over a serial port
    Serial,
    /// OpenOCD through a JTAG/SWD debug probe
    Jtag,
}

impl From<UploadArg> for UploadMethod {
    fn from(arg: UploadArg) -> Self {
        match arg {
            UploadArg::Serial => UploadMethod::Serial,
            UploadArg::Jtag => UploadMethod::Jtag,
        }
    }
}

#[derive(Args)]
pub struct InitArgs {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Board slug (see `edesto boards`)
    #[arg(short, long)]
    pub board: Option<String>,

    /// Serial port (e.g., /dev/ttyUSB0)
    #[arg(short, long)]
    pub port: Option<String>,

    /// Toolchain, skipping project detection
    #[arg(long)]
    pub toolchain: Option<String>,

    /// Upload method
    #[arg(long, value_enum)]
    pub upload: Option<UploadArg>,

    /// Debug probe interface for JTAG upload (stlink, jlink, cmsis-dap)
    #[arg(long)]
    pub probe: Option<String>,

    /// OpenOCD target config name, when the board has none
    #[arg(long)]
    pub target: Option<String>,

    /// Overwrite existing SKILLS.md
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct BoardsArgs {
    /// Only boards of this toolchain
    #[arg(long)]
    pub toolchain: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Project directory (defaults to the current directory)
    #[arg(long, global = true)]
    pub path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print a value (e.g., serial.port)
    Get {
        /// Dotted key
        key: String,
    },

    /// Set a value, creating edesto.toml if needed
    Set {
        /// Dotted key
        key: String,
        /// Value; integers are stored as integers
        value: String,
    },

    /// Print every value
    List,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
