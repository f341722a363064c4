//! # Storage Traits
//!
//! Contracts of the external collaborators the domain layer talks to. The
//! record store is the source of truth for sales; the auth provider checks
//! staff credentials. Both can be backed by a hosted service or by the local
//! implementations in this module.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::backend::domain::models::{SaleDraft, SalePatch, SaleRecord};

/// Stream of whole-collection snapshots, delivered in order
pub type SnapshotReceiver = mpsc::UnboundedReceiver<Vec<SaleRecord>>;

/// Document collection holding sale records
///
/// The core never performs partial reads: everything it knows about the
/// collection arrives through `subscribe`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Subscribe to a collection. The current contents are pushed right away,
    /// then a full snapshot after every change.
    async fn subscribe(&self, collection: &str) -> Result<SnapshotReceiver>;

    /// Persist a new record and return the id the store assigned to it
    async fn insert(&self, collection: &str, draft: &SaleDraft) -> Result<String>;

    /// Update a single field of an existing record
    async fn update_fields(&self, collection: &str, id: &str, patch: &SalePatch) -> Result<()>;
}

/// Failures a record store reports with a meaning beyond "unavailable"
///
/// Stores return these inside their `anyhow::Error` so callers can tell them
/// apart with `downcast_ref`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("no document '{id}' in '{collection}'")]
    DocumentNotFound { collection: String, id: String },
}

/// A signed-in staff member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffIdentity {
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Authentication provider unavailable: {0}")]
    Unavailable(String),
}

/// Email/password authentication
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> std::result::Result<StaffIdentity, AuthError>;
}
