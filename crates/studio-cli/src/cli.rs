use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use studio_gate::DEFAULT_PRIVILEGED_ORG;

#[derive(Parser)]
#[command(
    name = "studio",
    about = "Studio ledger: materials in, wands out",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Ledger state file, created on first write
    #[arg(long, global = true, default_value = "studio-state.json")]
    pub state: PathBuf,

    /// Contract configuration (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Invoke a contract operation and persist its writes
    Invoke(InvokeArgs),
    /// List materials in stock
    Materials,
    /// List wands and their production history
    Wands,
    /// Check wand quantities and stock levels for inconsistencies
    Audit,
    /// List the operations the contract serves
    Operations,
}

#[derive(Args)]
pub struct InvokeArgs {
    /// Organization (MSP id) of the invoking identity
    #[arg(long, default_value = DEFAULT_PRIVILEGED_ORG)]
    pub msp: String,

    /// Operation name, e.g. addMaterial
    pub function: String,

    /// Positional operation arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
