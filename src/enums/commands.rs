use std::path::PathBuf;
use clap::Subcommand;
use crate::structs::marker::MarkerId;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Check the configuration for problems
    Validate,
    /// Generate markers from an analysis results file, replacing the existing ones
    Import {
        /// JSON results: an analysis batch or a plain list of issues
        results: PathBuf,
        /// Name recorded on every marker when the file is a plain issue list
        #[clap(short, long)]
        configuration: Option<String>,
    },
    /// Print the grouped issue tree
    Tree {
        /// Comma separated grouping levels, overriding the configuration
        #[clap(short, long)]
        group_by: Option<String>,
        /// Show every level instead of the top groups only
        #[clap(short, long)]
        expand: bool,
    },
    /// Show where an issue sits in the tree and what opening it leads to
    Reveal {
        marker: MarkerId,
    },
    /// Mark the issue behind a marker as fixed
    Fix {
        marker: MarkerId,
    },
    /// Delete a single marker
    Delete {
        marker: MarkerId,
    },
    /// Delete every marker in the workspace
    Clear,
}
