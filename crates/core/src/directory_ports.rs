//! User-directory integration port interfaces
//!
//! The remote directory (DummyJSON) is reached through this boundary so the
//! sync service can be exercised without network access.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use syncline_domain::Result;

/// Remote directory user identifier
pub type DirectoryUserId = String;

/// User record as returned by the remote directory.
///
/// `id` is carried as an opaque string: the remote system uses numeric ids
/// by convention, but nothing here relies on that. Payload fields are
/// optional because partial records are valid remote data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryUser {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Date of birth in `YYYY-MM-DD` form, unparsed
    pub birth_date: Option<String>,
    pub address: Option<DirectoryAddress>,
}

/// Postal address nested inside a directory user record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Payload for creating a user in the remote directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDirectoryUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Trait for remote directory operations
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetch a user record by directory id
    async fn fetch_user(&self, id: &str) -> Result<DirectoryUser>;

    /// Create a user in the directory, returning the id assigned remotely
    async fn create_user(&self, user: &NewDirectoryUser) -> Result<DirectoryUserId>;
}
