//! `dnaret list` command implementation
//!
//! Enumerates the records in the collection.

use crate::config::Config;
use crate::error::Result;
use crate::firestore::FirestoreClient;
use crate::progress;
use crate::store::RecordStore;
use colored::Colorize;
use dnaret_common::types::RecordSummary;
use tracing::info;

/// List every record, printing its summary, and return the file names in order
pub async fn list_files(store: &dyn RecordStore) -> Result<Vec<String>> {
    let spinner = progress::create_spinner("Listing records...");
    let result = store.list_summaries().await;
    spinner.finish_and_clear();
    let summaries = result?;

    info!(location = %store.location(), count = summaries.len(), "Listed records");

    println!();
    println!("{}", "Available files in database:".cyan().bold());
    println!("{}", "-".repeat(40));

    for summary in &summaries {
        print_summary(summary);
    }

    Ok(summaries.into_iter().map(|s| s.file_name).collect())
}

fn print_summary(summary: &RecordSummary) {
    println!("File: {}", summary.file_name);
    println!("  Sequences: {}", summary.sequences_count);
    println!("  Has target: {}", summary.contains_target_sequence);
    println!();
}

/// Run the `list` subcommand
pub async fn run(config: &Config) -> Result<()> {
    let client = FirestoreClient::connect(config)?;
    let files = list_files(&client).await?;

    if files.is_empty() {
        println!("No files found in database");
    } else {
        println!("Found {} files in database", files.len());
    }

    Ok(())
}
