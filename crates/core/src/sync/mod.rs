//! Contact synchronization - core business logic

pub mod mapping;
pub mod service;

pub use service::{ContactSyncService, SyncOutcome};
