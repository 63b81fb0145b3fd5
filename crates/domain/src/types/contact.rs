//! CRM contact record
//!
//! Local representation of a person synced with the remote user directory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Contact stored in the local database.
///
/// `external_id` is the remote directory's user identifier and acts as the
/// natural key for upserts: at most one contact exists per external id.
/// `last_synced_at` is stamped only after a successful outbound push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub mailing_street: Option<String>,
    pub mailing_city: Option<String>,
    pub mailing_postal_code: Option<String>,
    pub mailing_state: Option<String>,
    pub mailing_country: Option<String>,
    pub external_id: Option<String>,
    pub last_synced_at: Option<NaiveDate>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Contact {
    /// Create an empty contact with the given id and timestamps.
    pub fn new(id: impl Into<String>, now: i64) -> Self {
        Self {
            id: id.into(),
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            birthdate: None,
            mailing_street: None,
            mailing_city: None,
            mailing_postal_code: None,
            mailing_state: None,
            mailing_country: None,
            external_id: None,
            last_synced_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
