//! Sequence export
//!
//! Writes a record's sequences to a text file as one continuous string.

use crate::error::{CliError, Result};
use crate::progress::format_bytes;
use colored::Colorize;
use dnaret_common::types::SequenceRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// Result of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub sequence_count: usize,
    pub bytes_written: u64,
}

/// Write every sequence in order with no separator; returns bytes written
pub fn write_concatenated<W: Write>(writer: &mut W, record: &SequenceRecord) -> std::io::Result<u64> {
    let mut written = 0u64;
    for entry in &record.sequences {
        writer.write_all(entry.sequence.as_bytes())?;
        written += entry.sequence.len() as u64;
    }
    Ok(written)
}

/// Whether `name` names a file directly inside the output directory
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Export `record` into `output_dir`
///
/// With no `output_filename` (or an empty one) the name is derived from the
/// record's `file_name`. An existing file at the target path is truncated.
pub fn export_sequences(
    record: Option<&SequenceRecord>,
    output_filename: Option<&str>,
    output_dir: &Path,
) -> Result<ExportSummary> {
    let record = record.ok_or(CliError::NoRecord)?;

    let filename = match output_filename.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => record.default_output_filename(),
    };

    if !is_plain_file_name(&filename) {
        return Err(CliError::UnsafeOutputName(filename));
    }

    if let Some(declared) = record.count_mismatch() {
        warn!(
            file_name = %record.file_name,
            declared,
            actual = record.sequence_len(),
            "sequences_count does not match the stored sequences"
        );
    }

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(filename);

    let mut writer = BufWriter::new(File::create(&path)?);
    let bytes_written = write_concatenated(&mut writer, record)?;
    writer.flush()?;

    let summary = ExportSummary {
        path,
        sequence_count: record.sequence_len(),
        bytes_written,
    };

    info!(
        path = %summary.path.display(),
        sequences = summary.sequence_count,
        bytes = summary.bytes_written,
        "Exported sequences"
    );

    println!(
        "{} Successfully created {} with {} DNA sequences ({})",
        "✓".green(),
        summary.path.display(),
        summary.sequence_count,
        format_bytes(summary.bytes_written)
    );

    Ok(summary)
}
