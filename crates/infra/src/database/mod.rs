//! Database access layer

pub mod contact_repository;
pub mod manager;

pub use contact_repository::SqliteContactRepository;
pub use manager::DbManager;
