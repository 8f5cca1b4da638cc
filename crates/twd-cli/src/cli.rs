//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

use twd_core::Tag;

/// Compare tracked time between Timewarrior tags.
///
/// Queries `timew` for the time recorded against each tag and reports the
/// absolute difference, or the grand total across all tracked activity.
#[derive(Debug, Parser)]
#[command(name = "twd", version, about, long_about = None)]
pub struct Cli {
    /// Report the grand total across all tracked activity.
    #[arg(short = 't', long, conflicts_with = "tags")]
    pub total: bool,

    /// Two tags to compare.
    #[arg(
        value_names = ["TAG1", "TAG2"],
        num_args = 2,
        required_unless_present = "total"
    )]
    pub tags: Vec<Tag>,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
