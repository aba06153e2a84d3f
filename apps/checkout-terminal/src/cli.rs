//! Command-line flags for the checkout terminal.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Default, Parser)]
#[command(
    name = "checkout",
    version,
    about = "Single-till checkout terminal",
    long_about = "Ring up line items, finish sales and keep a sales history file.\n\n\
                  Type `help` at the prompt for the list of commands."
)]
pub struct Cli {
    /// Config file to read instead of the platform default checkout.toml.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the sales history and log files.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}
