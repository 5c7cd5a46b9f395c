use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::Provider;

#[derive(Parser, Debug)]
#[command(
    name = "overseer",
    version,
    about = "Human approval gates for nested multi-agent teams"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the two-level team demonstration and print the workflow report
    Run {
        /// Model name (e.g., "gpt-4", "llama3.2")
        #[arg(short, long)]
        model: Option<String>,

        /// Model provider backing the group chats
        #[arg(short, long, value_enum)]
        provider: Option<Provider>,

        /// Maximum rounds per group chat
        #[arg(long)]
        max_round: Option<usize>,

        /// Path to config file (overrides ./overseer.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip the engine and only walk the intervention points
        #[arg(long)]
        offline: bool,

        /// Stop at the first team whose conversation fails
        #[arg(long)]
        strict: bool,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
    /// List every team with its agents and intervention points
    Teams,
}
