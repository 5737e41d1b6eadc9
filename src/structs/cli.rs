use std::path::PathBuf;
use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "issue-explorer")]
#[clap(about = "Projects migration issues onto workspace markers and browses them as a grouped tree", long_about = None)]
pub struct Cli {
    /// Configuration file, defaults to ~/.issue-explorer/config.toml
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}
