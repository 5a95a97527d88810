//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for linkrotator using clap's derive macros.

use clap::{Parser, Subcommand};

/// Linkrotator - backup link pool rotation service
#[derive(Parser)]
#[command(name = "linkrotator")]
#[command(version)]
#[command(about = "Generate and rotate obfuscated backup links per project", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Get the next backup link for a project (creates the pool on first use)
    Next {
        /// Project identifier
        project_id: String,
    },

    /// Build a fresh link pool and reset the rotation cursor
    Init {
        /// Project identifier
        project_id: String,

        /// Rebuild even if a pool already exists
        #[arg(long)]
        force: bool,
    },

    /// List the pool entries of a project
    List {
        /// Project identifier
        project_id: String,
    },

    /// Show usage statistics for a project's pool
    Stats {
        /// Project identifier
        project_id: String,
    },

    /// Export the pool document to JSON
    Export {
        /// Project identifier
        project_id: String,

        /// Output file path (default: stdout)
        file_path: Option<String>,
    },

    /// Import a pool document from a JSON file
    Import {
        /// Project identifier
        project_id: String,

        /// Input file path
        file_path: String,
    },

    /// Remove a project's pool and cursor
    Clear {
        /// Project identifier
        project_id: String,
    },
}
