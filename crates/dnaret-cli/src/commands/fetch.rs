//! `dnaret fetch` command implementation
//!
//! Looks up one record by file name and, for the subcommand, exports it.

use crate::commands::export::export_sequences;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::firestore::FirestoreClient;
use crate::progress;
use crate::store::RecordStore;
use dnaret_common::types::SequenceRecord;
use tracing::info;

/// Fetch the record whose `file_name` equals `file_name`
pub async fn fetch_record(store: &dyn RecordStore, file_name: &str) -> Result<SequenceRecord> {
    let spinner = progress::create_spinner(&format!("Querying {}...", file_name));
    let result = store.find_by_file_name(file_name).await;
    spinner.finish_and_clear();

    let record = result?.ok_or_else(|| CliError::RecordNotFound(file_name.to_string()))?;

    info!(file_name, sequences = record.sequence_len(), "Fetched record");

    println!("Found file: {}", record.file_name);
    println!("Sequences count: {}", record.sequences_count);
    println!("Contains target sequence: {}", record.contains_target_sequence);

    Ok(record)
}

/// Run the `fetch` subcommand
pub async fn run(config: &Config, file_name: &str, output: Option<&str>) -> Result<()> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(CliError::EmptyInput);
    }

    let client = FirestoreClient::connect(config)?;
    let record = fetch_record(&client, file_name).await?;
    export_sequences(Some(&record), output, config.output_dir())?;

    Ok(())
}
