use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "devlog")]
#[command(about = "Publish engineering activity with client identities masked", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database (overrides config)
    #[arg(long, global = true, env = "DEVLOG_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mask a post JSON file and print the result
    Mask {
        /// Path to the post JSON
        file: PathBuf,

        /// Render for an authenticated (internal) viewer
        #[arg(long)]
        authenticated: bool,

        /// The file holds a JSON array of posts
        #[arg(long)]
        list: bool,
    },

    /// Manage repositories
    #[command(subcommand)]
    Repo(RepoCommands),

    /// Manage project mappings
    #[command(subcommand)]
    Mapping(MappingCommands),
}

#[derive(Subcommand)]
pub enum RepoCommands {
    /// Register a repository
    Add {
        /// Repository name
        name: String,
    },

    /// Soft-delete a repository
    Remove {
        /// Repository name
        name: String,
    },

    /// List repositories
    List,
}

#[derive(Subcommand)]
pub enum MappingCommands {
    /// Create or update a mapping
    Set {
        /// Repository name
        repository: String,

        /// Name shown to authenticated viewers
        #[arg(long)]
        display: String,

        /// Name shown to anonymous viewers (default: generated pseudonym)
        #[arg(long)]
        mask: Option<String>,
    },

    /// Delete a mapping
    Remove {
        /// Repository name
        repository: String,
    },

    /// List mappings with the pseudonym anonymous viewers see
    List,
}
