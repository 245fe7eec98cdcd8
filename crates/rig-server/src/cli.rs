use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `rigd` binary.
#[derive(Debug, Parser)]
#[command(name = "rigd", version, about = "rig - test-bench inventory and script suite backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra config file, layered above ./rig.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind address (defaults to server.bind)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Mirror a repository and rescan its catalog
    Sync {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        #[arg(long, default_value = "main")]
        branch: String,
    },
    /// Re-derive catalog fields from stored module docs
    Backfill,
    /// Create an admin account
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Open the database and apply migrations
    Migrate,
}
