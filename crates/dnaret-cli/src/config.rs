//! Configuration management for the dnaret CLI
//!
//! Values come from the environment (optionally seeded by a `.env` file) and
//! are then overridden by command-line flags.

use crate::error::{CliError, Result};
use crate::ConnectionArgs;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Service-account key file read when no path is configured
pub const DEFAULT_CREDENTIALS_PATH: &str = "service_account_key.json";

/// Collection holding the sequence dataset documents
pub const DEFAULT_COLLECTION: &str = "DNA";

/// Firestore database id
pub const DEFAULT_DATABASE: &str = "(default)";

/// Directory that receives exported sequence files
pub const DEFAULT_OUTPUT_DIR: &str = "extracted_sequences";

/// Production Firestore REST host
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";

/// Documents requested per list page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Timeout for Firestore requests in seconds
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 300;

/// CLI configuration
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Service-account key file
    pub credentials_path: PathBuf,

    /// Explicit project id; wins over the credential file
    pub project_id: Option<String>,

    /// Firestore database id
    pub database: String,

    /// Collection to list and query
    pub collection: String,

    /// Export directory
    pub output_dir: PathBuf,

    /// Explicit REST base URL
    pub firestore_url: Option<String>,

    /// `host:port` of a local Firestore emulator
    pub emulator_host: Option<String>,

    /// OAuth bearer token sent with every request
    #[serde(skip_serializing)]
    pub access_token: Option<String>,

    /// List page size
    pub page_size: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            project_id: None,
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            firestore_url: None,
            emulator_host: None,
            access_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load config from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = non_empty_var("DNARET_CREDENTIALS") {
            config.credentials_path = PathBuf::from(path);
        }

        config.project_id =
            non_empty_var("DNARET_PROJECT_ID").or_else(|| non_empty_var("GOOGLE_CLOUD_PROJECT"));

        if let Some(database) = non_empty_var("DNARET_DATABASE") {
            config.database = database;
        }

        if let Some(collection) = non_empty_var("DNARET_COLLECTION") {
            config.collection = collection;
        }

        if let Some(dir) = non_empty_var("DNARET_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        config.firestore_url = non_empty_var("DNARET_FIRESTORE_URL");
        config.emulator_host = non_empty_var("FIRESTORE_EMULATOR_HOST");
        config.access_token = non_empty_var("DNARET_ACCESS_TOKEN");

        if let Some(size) = non_empty_var("DNARET_PAGE_SIZE") {
            config.page_size = size
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| CliError::config(format!("invalid DNARET_PAGE_SIZE '{}'", size)))?;
        }

        if let Some(secs) = non_empty_var("DNARET_API_TIMEOUT_SECS") {
            config.timeout_secs = secs.parse().ok().filter(|s| *s > 0).ok_or_else(|| {
                CliError::config(format!("invalid DNARET_API_TIMEOUT_SECS '{}'", secs))
            })?;
        }

        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_args(mut self, args: &ConnectionArgs) -> Self {
        if let Some(ref path) = args.credentials {
            self.credentials_path = path.clone();
        }
        if let Some(ref project) = args.project_id {
            self.project_id = Some(project.clone());
        }
        if let Some(ref database) = args.database {
            self.database = database.clone();
        }
        if let Some(ref collection) = args.collection {
            self.collection = collection.clone();
        }
        if let Some(ref dir) = args.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(ref url) = args.firestore_url {
            self.firestore_url = Some(url.clone());
        }
        self
    }

    /// REST base URL: explicit URL, then emulator, then production
    pub fn base_url(&self) -> String {
        let url = match (&self.firestore_url, &self.emulator_host) {
            (Some(url), _) => url.clone(),
            (None, Some(host)) => format!("http://{}", host),
            (None, None) => DEFAULT_FIRESTORE_URL.to_string(),
        };
        url.trim_end_matches('/').to_string()
    }

    /// Whether requests target a local emulator
    pub fn uses_emulator(&self) -> bool {
        self.firestore_url.is_none() && self.emulator_host.is_some()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
