use clap::{Parser, Subcommand};
use dispensary::model::EntryId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dispensary", bin_name = "dispensary", version)]
#[command(about = "Browse and manage a pharmacy catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON seed catalog to start from instead of the built-in one
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub seed: Option<PathBuf>,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalog entries, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Case-insensitive text to find in names and descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Only entries carrying at least one of these tags (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Only entries in this category (exact match)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one or more entries in full
    #[command(alias = "v")]
    Show {
        /// Entry ids (e.g. 1 3)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<EntryId>,
    },

    /// List all tags in use
    Tags,

    /// List known categories
    Categories,

    /// Start an interactive session (search, filters, create, edit, delete)
    Shell,
}
