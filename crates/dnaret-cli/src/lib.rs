//! dnaret CLI Library
//!
//! Retrieves DNA sequence dataset records from Firestore and exports their
//! sequences to flat text files.
//!
//! # Overview
//!
//! - **Interactive retrieval**: list, prompt, fetch, export (`dnaret`)
//! - **Listing**: show every record in the collection (`dnaret list`)
//! - **Scripted export**: fetch one record by name (`dnaret fetch`)
//! - **Configuration**: show resolved settings (`dnaret config`)

pub mod commands;
pub mod config;
pub mod error;
pub mod firestore;
pub mod progress;
pub mod prompt;
pub mod store;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use store::RecordStore;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// dnaret - DNA sequence retriever
#[derive(Parser, Debug)]
#[command(name = "dnaret")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `retrieve`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the CLI reference as Markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Connection and output overrides shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Firestore project id (skips reading it from the credential file)
    #[arg(long, global = true)]
    pub project_id: Option<String>,

    /// Service-account key file
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Collection holding the sequence records
    #[arg(long, global = true)]
    pub collection: Option<String>,

    /// Firestore database id
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Directory for exported files
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Firestore REST base URL
    #[arg(long, global = true)]
    pub firestore_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List records, ask for a file name and export its sequences
    Retrieve,

    /// List the records in the collection
    List,

    /// Export the sequences of one record without prompting
    Fetch {
        /// Exact `file_name` of the record
        file_name: String,

        /// Output file name inside the output directory
        #[arg(long)]
        output: Option<String>,
    },

    /// Show the resolved configuration
    Config,
}
