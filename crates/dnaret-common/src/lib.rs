//! dnaret Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the dnaret workspace.
//!
//! # Overview
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Centralized `tracing` setup shared by every binary
//! - **Types**: Sequence dataset records as stored in the document database
//!
//! # Example
//!
//! ```no_run
//! use dnaret_common::types::SequenceRecord;
//! use dnaret_common::Result;
//!
//! fn export_name(record: &SequenceRecord) -> Result<String> {
//!     Ok(record.default_output_filename())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{DnaretError, Result};
