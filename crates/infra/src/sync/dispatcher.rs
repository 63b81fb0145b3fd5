//! Fire-and-forget sync dispatch
//!
//! The host application triggers syncs from record lifecycle events and must
//! not block on network I/O. Each invocation runs as an independent tokio
//! task whose completion is not awaited by the caller; failures surface in
//! the logs only. Concurrent invocations for the same external id may race -
//! last write wins.

use std::sync::Arc;

use syncline_core::ContactSyncService;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Dispatches sync invocations onto the tokio runtime
pub struct SyncDispatcher {
    service: Arc<ContactSyncService>,
}

impl SyncDispatcher {
    /// Create a new dispatcher around a shared sync service
    pub fn new(service: Arc<ContactSyncService>) -> Self {
        Self { service }
    }

    /// Dispatch an inbound sync for the given external id.
    ///
    /// The returned handle may be dropped (fire-and-forget) or awaited when
    /// a caller needs completion, e.g. in tests.
    pub fn dispatch_inbound(&self, external_id: String) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            match service.sync_contact_from_directory(&external_id).await {
                Ok(outcome) => {
                    debug!(external_id = %external_id, outcome = ?outcome, "inbound sync finished");
                }
                Err(err) => {
                    error!(external_id = %external_id, error = %err, "inbound sync failed");
                }
            }
        })
    }

    /// Dispatch an outbound push for the given local contact id.
    pub fn dispatch_outbound(&self, contact_id: String) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            match service.push_contact(&contact_id).await {
                Ok(outcome) => {
                    debug!(contact_id = %contact_id, outcome = ?outcome, "outbound sync finished");
                }
                Err(err) => {
                    error!(contact_id = %contact_id, error = %err, "outbound sync failed");
                }
            }
        })
    }
}
