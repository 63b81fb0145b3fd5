//! Contact sync service - core business logic
//!
//! Both operations are single-attempt and fire-and-forget from the caller's
//! point of view: remote failures (transport errors, non-success statuses)
//! are logged and swallowed, never retried. Malformed remote data and local
//! persistence failures propagate.

use std::sync::Arc;

use chrono::Utc;
use syncline_domain::{Result, SynclineError};
use tracing::{debug, error, instrument};

use super::mapping;
use crate::contact::ports::ContactRepository;
use crate::directory_ports::DirectoryClient;

/// Terminal state of a single sync invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Remote data was mapped and persisted (or the push was accepted and
    /// the record stamped)
    Applied,
    /// A remote failure was logged; local state is unchanged
    Skipped,
}

/// Contact sync service
pub struct ContactSyncService {
    directory: Arc<dyn DirectoryClient>,
    contacts: Arc<dyn ContactRepository>,
}

impl ContactSyncService {
    /// Create a new sync service
    pub fn new(directory: Arc<dyn DirectoryClient>, contacts: Arc<dyn ContactRepository>) -> Self {
        Self { directory, contacts }
    }

    /// Fetch a remote user and upsert the matching local contact.
    ///
    /// Idempotent: repeated calls with unchanged remote data converge to
    /// the same local record. When a contact with this external id already
    /// exists, its id, creation timestamp and sync stamp are preserved.
    #[instrument(skip(self))]
    pub async fn sync_contact_from_directory(&self, external_id: &str) -> Result<SyncOutcome> {
        let user = match self.directory.fetch_user(external_id).await {
            Ok(user) => user,
            Err(err) if err.is_remote_failure() => {
                error!(external_id, error = %err, "directory fetch failed; local state unchanged");
                return Ok(SyncOutcome::Skipped);
            }
            Err(err) => return Err(err),
        };

        let mut contact = mapping::contact_from_directory_user(&user)?;

        if let Some(existing) = self.contacts.find_by_external_id(&user.id).await? {
            contact.id = existing.id;
            contact.created_at = existing.created_at;
            contact.last_synced_at = existing.last_synced_at;
        }

        let contact_id = contact.id.clone();
        self.contacts.upsert(contact).await?;

        debug!(external_id, contact_id = %contact_id, "contact upserted from directory");
        Ok(SyncOutcome::Applied)
    }

    /// Push a local contact to the remote directory.
    ///
    /// On acceptance (2xx) the contact's `last_synced_at` is set to the
    /// current date and persisted; on remote failure the record is left
    /// untouched and the failure is only logged.
    #[instrument(skip(self))]
    pub async fn push_contact(&self, contact_id: &str) -> Result<SyncOutcome> {
        let Some(mut contact) = self.contacts.find_by_id(contact_id).await? else {
            return Err(SynclineError::NotFound(format!("contact not found: {contact_id}")));
        };

        let payload = mapping::directory_payload(&contact);

        match self.directory.create_user(&payload).await {
            Ok(remote_id) => {
                debug!(contact_id, remote_id = %remote_id, "contact accepted by directory");
            }
            Err(err) if err.is_remote_failure() => {
                error!(contact_id, error = %err, "directory push failed; local record unchanged");
                return Ok(SyncOutcome::Skipped);
            }
            Err(err) => return Err(err),
        }

        let now = Utc::now();
        contact.last_synced_at = Some(now.date_naive());
        contact.updated_at = now.timestamp();
        self.contacts.update(contact).await?;

        Ok(SyncOutcome::Applied)
    }
}
