//! Sync dispatch

pub mod dispatcher;

pub use dispatcher::SyncDispatcher;
