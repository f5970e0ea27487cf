//! Interactive retrieval (`dnaret` / `dnaret retrieve`)
//!
//! Connect, list the collection, ask for a file name, fetch the record and
//! export its sequences. Every failure is reported on stdout and ends the
//! session; nothing is retried and the process still exits successfully.

use crate::commands::{export::export_sequences, fetch::fetch_record, list::list_files};
use crate::config::Config;
use crate::error::Result;
use crate::firestore::FirestoreClient;
use crate::prompt::{self, LineSource};
use crate::store::RecordStore;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Example shown in the prompt
const PROMPT: &str = "Enter the exact file name to retrieve (e.g., dna_sequences_1.jsonl):";

/// Why a session stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    ClientUnavailable,
    NoFiles,
    NoFileName,
    FetchFailed,
    ExportFailed,
}

/// Terminal state of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done(PathBuf),
    Aborted(AbortReason),
}

/// Drive one session against an already connected store
pub async fn session(
    store: &dyn RecordStore,
    output_dir: &Path,
    input: &mut dyn LineSource,
) -> Outcome {
    let files = match list_files(store).await {
        Ok(files) => files,
        Err(e) => {
            error!(error = %e, "Listing failed");
            println!("Error listing files: {}", e);
            Vec::new()
        }
    };

    if files.is_empty() {
        println!("No files found in database");
        return Outcome::Aborted(AbortReason::NoFiles);
    }

    println!();
    println!("Found {} files in database", files.len());

    let line = match input.read_line(PROMPT) {
        Ok(line) => line,
        Err(e) => {
            error!(error = %e, "Reading file name failed");
            println!("{}", e);
            return Outcome::Aborted(AbortReason::NoFileName);
        }
    };

    let file_name = line.trim();
    if file_name.is_empty() {
        println!("No file name provided");
        return Outcome::Aborted(AbortReason::NoFileName);
    }

    println!();
    println!("Retrieving {} from database...", file_name);
    let record = match fetch_record(store, file_name).await {
        Ok(record) => record,
        Err(e) => {
            debug!(error = %e, file_name, "Fetch failed");
            println!("{}", e);
            println!("{} Failed to retrieve file from database", "✗".red());
            return Outcome::Aborted(AbortReason::FetchFailed);
        }
    };

    println!();
    println!("Creating txt file with DNA sequences...");
    match export_sequences(Some(&record), None, output_dir) {
        Ok(summary) => {
            println!();
            println!("{}", "Process completed successfully!".green().bold());
            println!("Output file: {}", summary.path.display());
            Outcome::Done(summary.path)
        }
        Err(e) => {
            error!(error = %e, "Export failed");
            println!("Error creating txt file: {}", e);
            println!("{} Failed to create output file", "✗".red());
            Outcome::Aborted(AbortReason::ExportFailed)
        }
    }
}

/// Run the interactive retrieval
///
/// Takes the configuration as loaded so that invalid settings end the
/// session like any other connection failure.
pub async fn run(config: Result<Config>) -> Result<()> {
    println!("{}", "DNA Sequence Retriever".cyan().bold());
    println!("{}", "=".repeat(30));

    let outcome = match config {
        Ok(config) => match FirestoreClient::connect(&config) {
            Ok(client) => {
                let mut input = prompt::stdin_source();
                session(&client, config.output_dir(), input.as_mut()).await
            }
            Err(e) => {
                error!(error = %e, "Client initialization failed");
                println!("Error initializing Firestore client: {}", e);
                println!(
                    "Make sure to update {} with your actual Firebase credentials",
                    config.credentials_path.display()
                );
                Outcome::Aborted(AbortReason::ClientUnavailable)
            }
        },
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            println!("Error initializing Firestore client: {}", e);
            Outcome::Aborted(AbortReason::ClientUnavailable)
        }
    };

    debug!(?outcome, "Session finished");

    Ok(())
}
