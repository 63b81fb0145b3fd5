//! Port interfaces for contact persistence
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for contact operations.

use async_trait::async_trait;
use syncline_domain::{Contact, Result};

/// Trait for contact persistence and retrieval
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Get a contact by its local id
    async fn find_by_id(&self, id: &str) -> Result<Option<Contact>>;

    /// Get a contact by its remote directory id
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Contact>>;

    /// Create or overwrite a contact, keyed on `external_id`.
    ///
    /// Contacts without an external id are rejected with `InvalidInput`.
    /// The write is all-or-nothing: either the full record lands or
    /// nothing changes.
    async fn upsert(&self, contact: Contact) -> Result<()>;

    /// Update an existing contact by local id
    async fn update(&self, contact: Contact) -> Result<()>;
}
