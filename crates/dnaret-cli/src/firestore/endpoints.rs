//! Firestore REST endpoint URL builders

/// Build the documents root for a project database
pub fn documents_url(base_url: &str, project_id: &str, database: &str) -> String {
    format!(
        "{}/v1/projects/{}/databases/{}/documents",
        base_url, project_id, database
    )
}

/// Build the list URL for a collection
pub fn collection_url(base_url: &str, project_id: &str, database: &str, collection: &str) -> String {
    format!(
        "{}/{}",
        documents_url(base_url, project_id, database),
        urlencoding::encode(collection)
    )
}

/// Build the structured query URL
pub fn run_query_url(base_url: &str, project_id: &str, database: &str) -> String {
    format!("{}:runQuery", documents_url(base_url, project_id, database))
}
