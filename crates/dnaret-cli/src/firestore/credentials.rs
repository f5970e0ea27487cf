//! Service-account key loading
//!
//! The key identifies the project. When it carries a private key it is also
//! used to mint OAuth tokens for the Firestore API.

use crate::error::{CliError, Result};
use gcp_auth::CustomServiceAccount;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// OAuth scope covering Firestore reads
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// The parts of a Google service-account key file this tool needs
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    private_key: Option<String>,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("key_type", &self.key_type)
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ServiceAccountKey {
    /// Read and parse a key file
    pub fn load(path: &Path) -> Result<Self> {
        let shown = path.display().to_string();

        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::credentials(&shown, e.to_string()))?;

        let key: Self = serde_json::from_str(&content)
            .map_err(|e| CliError::credentials(&shown, e.to_string()))?;

        if key.project_id.trim().is_empty() {
            return Err(CliError::credentials(shown, "project_id is empty"));
        }

        if let Some(ref kind) = key.key_type {
            if kind != "service_account" {
                tracing::warn!(path = %shown, key_type = %kind, "Credential file is not a service account key");
            }
        }

        Ok(key)
    }

    /// Whether the key can sign token requests
    pub fn can_sign(&self) -> bool {
        self.private_key
            .as_deref()
            .is_some_and(|pem| !pem.trim().is_empty())
    }
}

/// Build a token source from the key file at `path`
pub fn token_source(path: &Path) -> Result<CustomServiceAccount> {
    CustomServiceAccount::from_file(path)
        .map_err(|e| CliError::credentials(path.display().to_string(), e.to_string()))
}
