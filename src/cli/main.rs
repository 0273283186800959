use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser)]
#[clap(
    version,
    about = "Daily-note navigation for a SiYuan-compatible kernel"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Kernel base URL for this invocation (overrides the config file)
    #[clap(long)]
    pub url: Option<String>,

    /// Kernel API token for this invocation (overrides the config file)
    #[clap(long)]
    pub token: Option<String>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the dailynav application
    #[clap(subcommand)]
    pub command: Commands,
}
