//! Firestore client module
//!
//! Minimal REST v1 client for reading sequence dataset documents.

pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod types;

pub use client::FirestoreClient;
pub use credentials::ServiceAccountKey;
pub use types::*;
