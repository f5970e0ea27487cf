//! Sequence dataset types shared across dnaret
//!
//! Records are produced upstream and only ever read by this workspace.

use crate::error::{DnaretError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Suffix stripped from a record's `file_name` when deriving an export name
pub const SOURCE_SUFFIX: &str = ".jsonl";

/// Suffix appended to derived export file names
pub const EXPORT_SUFFIX: &str = "_sequences.txt";

/// A single DNA sequence entry inside a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceEntry {
    pub sequence: String,
}

impl SequenceEntry {
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
        }
    }
}

/// One dataset document describing a DNA sequence file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Lookup key, expected (not enforced) to be unique
    pub file_name: String,

    /// Declared number of entries in `sequences`
    pub sequences_count: i64,

    /// Whether the upstream scan found the target sequence in this file
    pub contains_target_sequence: bool,

    /// Ordered sequence entries
    #[serde(default)]
    pub sequences: Vec<SequenceEntry>,
}

impl SequenceRecord {
    /// Decode a record from a plain key-value mapping
    pub fn from_mapping(mapping: Map<String, Value>) -> Result<Self> {
        for field in ["file_name", "sequences_count", "contains_target_sequence"] {
            if !mapping.contains_key(field) {
                return Err(DnaretError::MissingField(field.to_string()));
            }
        }

        let name = mapping
            .get("file_name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string();

        serde_json::from_value(Value::Object(mapping))
            .map_err(|e| DnaretError::invalid_record(name, e.to_string()))
    }

    /// Output file name derived from `file_name`
    ///
    /// `dna_sequences_1.jsonl` becomes `dna_sequences_1_sequences.txt`.
    pub fn default_output_filename(&self) -> String {
        let base = self
            .file_name
            .strip_suffix(SOURCE_SUFFIX)
            .unwrap_or(&self.file_name);
        format!("{}{}", base, EXPORT_SUFFIX)
    }

    /// Number of sequence entries actually present
    pub fn sequence_len(&self) -> usize {
        self.sequences.len()
    }

    /// Returns `Some(declared)` when `sequences_count` disagrees with the entries
    pub fn count_mismatch(&self) -> Option<i64> {
        if self.sequences_count == self.sequences.len() as i64 {
            None
        } else {
            Some(self.sequences_count)
        }
    }

    /// Scalar summary of this record
    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            document_id: None,
            file_name: self.file_name.clone(),
            sequences_count: self.sequences_count,
            contains_target_sequence: self.contains_target_sequence,
        }
    }
}

/// Listing view of a record, without its sequences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    /// Database document id, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub file_name: String,
    pub sequences_count: i64,
    pub contains_target_sequence: bool,
}

impl RecordSummary {
    /// Decode a summary from a plain key-value mapping
    pub fn from_mapping(mapping: Map<String, Value>, document_id: Option<String>) -> Result<Self> {
        let field = |key: &str| {
            mapping
                .get(key)
                .ok_or_else(|| DnaretError::MissingField(key.to_string()))
        };

        let file_name = field("file_name")?
            .as_str()
            .ok_or_else(|| DnaretError::invalid_value("file_name", "expected a string"))?
            .to_string();
        let sequences_count = field("sequences_count")?
            .as_i64()
            .ok_or_else(|| DnaretError::invalid_value("sequences_count", "expected an integer"))?;
        let contains_target_sequence = field("contains_target_sequence")?
            .as_bool()
            .ok_or_else(|| {
                DnaretError::invalid_value("contains_target_sequence", "expected a boolean")
            })?;

        Ok(Self {
            document_id,
            file_name,
            sequences_count,
            contains_target_sequence,
        })
    }
}
