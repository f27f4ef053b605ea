use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::search::DEFAULT_MAX_SUGGESTIONS;

#[derive(Parser)]
#[command(name = "labsearch")]
#[command(about = "labsearch - Look up laboratory tests by name or synonym.")]
#[command(version = env!("VERSION"))]
pub struct Cli {
    /// Path to one or more config files (merged in order).
    #[arg(long, default_value = "config.toml", action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    /// Path to the CSV dataset. Overrides `data.path` in the config.
    #[arg(long)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },

    /// Search the dataset and print ranked results as JSON lines.
    Search {
        /// Search query.
        query: String,
    },

    /// Print autocomplete suggestions for a partial query as JSON lines.
    Suggest {
        /// Partial query.
        query: String,

        /// Maximum number of suggestions.
        #[arg(long, default_value_t = DEFAULT_MAX_SUGGESTIONS)]
        max: usize,
    },
}
