//! HTTP client for the Firestore REST API
//!
//! Built once from [`Config`] and handed to every operation that needs it.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::firestore::credentials::{self, DATASTORE_SCOPE};
use crate::firestore::{endpoints, types::*, ServiceAccountKey};
use crate::store::RecordStore;
use async_trait::async_trait;
use dnaret_common::types::{RecordSummary, SequenceRecord};
use gcp_auth::{CustomServiceAccount, TokenProvider};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// Fields requested when listing; sequences are left out
const SUMMARY_FIELDS: [&str; 3] = ["file_name", "sequences_count", "contains_target_sequence"];

/// How requests are authorized
enum Auth {
    /// Emulator, or no usable credentials
    Anonymous,
    /// Token supplied through `DNARET_ACCESS_TOKEN`
    Static(String),
    /// Tokens minted from the service-account key and cached until expiry
    ServiceAccount(CustomServiceAccount),
}

/// Firestore REST client bound to one project, database and collection
pub struct FirestoreClient {
    client: Client,
    base_url: String,
    project_id: String,
    database: String,
    collection: String,
    auth: Auth,
    page_size: u32,
}

impl FirestoreClient {
    /// Create a client from configuration and the credential file
    ///
    /// An explicit project id makes the credential file optional. A
    /// configured access token wins over minting one from the key, and the
    /// emulator is never sent credentials.
    pub fn connect(config: &Config) -> Result<Self> {
        let wants_token = config.access_token.is_none() && !config.uses_emulator();

        let key = if config.project_id.is_none()
            || (wants_token && config.credentials_path.is_file())
        {
            let key = ServiceAccountKey::load(&config.credentials_path)?;
            debug!(
                project_id = %key.project_id,
                client_email = key.client_email.as_deref().unwrap_or("-"),
                "Loaded service account key"
            );
            Some(key)
        } else {
            None
        };

        let project_id = match (&config.project_id, &key) {
            (Some(id), _) => id.clone(),
            (None, Some(key)) => key.project_id.clone(),
            (None, None) => return Err(CliError::config("no project id configured")),
        };

        let auth = match (&config.access_token, &key) {
            (Some(token), _) => Auth::Static(token.clone()),
            _ if config.uses_emulator() => Auth::Anonymous,
            (None, Some(key)) if key.can_sign() => {
                Auth::ServiceAccount(credentials::token_source(&config.credentials_path)?)
            }
            _ => {
                warn!("No access token or signing key available; requests are sent unauthenticated");
                Auth::Anonymous
            }
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            project_id,
            database: config.database.clone(),
            collection: config.collection.clone(),
            auth,
            page_size: config.page_size,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match self.auth {
            Auth::Anonymous => Ok(request),
            Auth::Static(ref token) => Ok(request.bearer_auth(token)),
            Auth::ServiceAccount(ref account) => {
                let token = account.token(&[DATASTORE_SCOPE]).await?;
                Ok(request.bearer_auth(token.as_str()))
            }
        }
    }

    /// Send a request and turn non-2xx answers into [`CliError::Firestore`]
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorize(request).await?.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(envelope) => match envelope.error.status {
                Some(kind) => format!("{} ({})", envelope.error.message, kind),
                None => envelope.error.message,
            },
            Err(_) if body.is_empty() => status.to_string(),
            Err(_) => body,
        };

        Err(CliError::firestore(status.as_u16(), message))
    }

    /// Fetch one page of the collection
    pub async fn list_documents_page(
        &self,
        page_token: Option<&str>,
        field_mask: &[&str],
    ) -> Result<ListDocumentsResponse> {
        let url = endpoints::collection_url(
            &self.base_url,
            &self.project_id,
            &self.database,
            &self.collection,
        );

        let mut params: Vec<(&str, String)> = vec![("pageSize", self.page_size.to_string())];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        params.extend(field_mask.iter().map(|f| ("mask.fieldPaths", f.to_string())));

        let response = self.send(self.client.get(&url).query(&params)).await?;
        Ok(response.json().await?)
    }

    /// Fetch every document of the collection, following page tokens
    pub async fn list_documents(&self, field_mask: &[&str]) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let page = self.list_documents_page(token.as_deref(), field_mask).await?;
            debug!(count = page.documents.len(), "Fetched document page");
            documents.extend(page.documents);

            match page.next_page_token {
                Some(next) if !next.is_empty() => token = Some(next),
                _ => break,
            }
        }

        Ok(documents)
    }

    /// Run a structured query and return the matching documents in order
    pub async fn run_query(&self, query: StructuredQuery) -> Result<Vec<Document>> {
        let url = endpoints::run_query_url(&self.base_url, &self.project_id, &self.database);
        let request = RunQueryRequest {
            structured_query: query,
        };

        let response = self.send(self.client.post(&url).json(&request)).await?;
        let items: Vec<RunQueryResponse> = response.json().await?;

        Ok(items.into_iter().filter_map(|item| item.document).collect())
    }
}

#[async_trait]
impl RecordStore for FirestoreClient {
    async fn list_summaries(&self) -> Result<Vec<RecordSummary>> {
        let documents = self.list_documents(&SUMMARY_FIELDS).await?;

        documents
            .into_iter()
            .map(|doc| -> Result<RecordSummary> {
                let mapping = doc.to_mapping()?;
                Ok(RecordSummary::from_mapping(mapping, Some(doc.id().to_string()))?)
            })
            .collect()
    }

    async fn find_by_file_name(&self, file_name: &str) -> Result<Option<SequenceRecord>> {
        // Two results are enough to detect a duplicate file name.
        let query = StructuredQuery::field_equals(
            &self.collection,
            "file_name",
            Value::string(file_name),
            Some(2),
        );
        let mut documents = self.run_query(query).await?;

        if documents.len() > 1 {
            warn!(
                file_name,
                chosen = documents[0].id(),
                "Several documents share this file_name; using the first by document name"
            );
        }

        if documents.is_empty() {
            return Ok(None);
        }
        let doc = documents.swap_remove(0);

        debug!(
            document = doc.id(),
            updated = ?doc.update_time,
            "Fetched record document"
        );

        Ok(Some(SequenceRecord::from_mapping(doc.to_mapping()?)?))
    }

    fn location(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents/{}",
            self.project_id, self.database, self.collection
        )
    }
}
