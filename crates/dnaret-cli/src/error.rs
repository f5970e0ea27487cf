//! Error types for the dnaret CLI
//!
//! Every variant carries a message a user can act on. The interactive driver
//! prints these and stops; scripted subcommands surface them from `main`.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Credential file missing or unreadable
    #[error("Cannot load credentials from '{path}': {reason}")]
    Credentials { path: String, reason: String },

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or command-line flags.")]
    Config(String),

    /// Firestore answered with an error status
    #[error("Firestore returned {status}: {message}")]
    Firestore { status: u16, message: String },

    /// No document matched the requested file name
    #[error("File '{0}' not found in database")]
    RecordNotFound(String),

    /// Export was asked to write without a record
    #[error("No file data provided")]
    NoRecord,

    /// The user entered nothing at the prompt
    #[error("No file name provided")]
    EmptyInput,

    /// Reading user input failed
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Document did not decode into a sequence record
    #[error("Malformed record: {0}")]
    Record(#[from] dnaret_common::DnaretError),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("Network request failed: {0}. Check your internet connection and Firestore URL.")]
    Http(#[from] reqwest::Error),

    /// Minting an access token from the service-account key failed
    #[error("Failed to obtain an access token: {0}. Check the service account key.")]
    Auth(#[from] gcp_auth::Error),

    /// Export target is not a plain file name inside the output directory
    #[error("Refusing to write '{0}': output name must be a plain file name")]
    UnsafeOutputName(String),
}

impl CliError {
    /// Create a credentials error
    pub fn credentials(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Credentials {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a Firestore API error
    pub fn firestore(status: u16, message: impl Into<String>) -> Self {
        Self::Firestore {
            status,
            message: message.into(),
        }
    }
}
