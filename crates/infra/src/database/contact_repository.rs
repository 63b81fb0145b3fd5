//! Contact repository implementation using SQLite
//!
//! Provides persistence for contacts synced with the remote user directory.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Row, ToSql};
use syncline_core::contact::ports::ContactRepository as ContactRepositoryPort;
use syncline_domain::{Contact, Result as DomainResult, SynclineError};
use tokio::task;

use super::manager::DbManager;
use crate::errors::InfraError;

const CONTACT_COLUMNS: &str = "id, first_name, last_name, email, phone, birthdate,
        mailing_street, mailing_city, mailing_postal_code, mailing_state, mailing_country,
        external_id, last_synced_at, created_at, updated_at";

/// SQLite-backed implementation of `ContactRepository`
pub struct SqliteContactRepository {
    db: Arc<DbManager>,
}

impl SqliteContactRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactRepositoryPort for SqliteContactRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Contact>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Contact>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
                params![&id],
                map_contact_row,
            );

            match result {
                Ok(contact) => Ok(Some(contact)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_external_id(&self, external_id: &str) -> DomainResult<Option<Contact>> {
        let db = Arc::clone(&self.db);
        let external_id = external_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Contact>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE external_id = ?1"),
                params![&external_id],
                map_contact_row,
            );

            match result {
                Ok(contact) => Ok(Some(contact)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert(&self, contact: Contact) -> DomainResult<()> {
        if contact.external_id.is_none() {
            return Err(SynclineError::InvalidInput(
                "upsert requires a contact with an external id".into(),
            ));
        }

        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            upsert_contact(&conn, &contact).map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, contact: Contact) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let changed = update_contact(&conn, &contact).map_err(map_sql_error)?;
            if changed == 0 {
                return Err(SynclineError::NotFound(format!(
                    "contact not found: {}",
                    contact.id
                )));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Map a row to a Contact
fn map_contact_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        birthdate: date_column(row, 5)?,
        mailing_street: row.get(6)?,
        mailing_city: row.get(7)?,
        mailing_postal_code: row.get(8)?,
        mailing_state: row.get(9)?,
        mailing_country: row.get(10)?,
        external_id: row.get(11)?,
        last_synced_at: date_column(row, 12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

/// Dates are stored as ISO-8601 TEXT (`YYYY-MM-DD`)
fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|value| {
        NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(err),
            )
        })
    })
    .transpose()
}

fn date_param(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Insert or overwrite a contact, keyed on external_id.
///
/// The conflict clause deliberately leaves `id`, `created_at` and
/// `last_synced_at` untouched: inbound syncs must never move the sync stamp
/// or re-key an existing record.
fn upsert_contact(
    conn: &rusqlite::Connection,
    contact: &Contact,
) -> Result<usize, rusqlite::Error> {
    let birthdate = date_param(contact.birthdate);
    let last_synced_at = date_param(contact.last_synced_at);

    let params: [&dyn ToSql; 15] = [
        &contact.id,
        &contact.first_name,
        &contact.last_name,
        &contact.email,
        &contact.phone,
        &birthdate,
        &contact.mailing_street,
        &contact.mailing_city,
        &contact.mailing_postal_code,
        &contact.mailing_state,
        &contact.mailing_country,
        &contact.external_id,
        &last_synced_at,
        &contact.created_at,
        &contact.updated_at,
    ];

    conn.execute(
        "INSERT INTO contacts (
            id, first_name, last_name, email, phone, birthdate,
            mailing_street, mailing_city, mailing_postal_code, mailing_state, mailing_country,
            external_id, last_synced_at, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
         ON CONFLICT(external_id) DO UPDATE SET
            first_name = excluded.first_name,
            last_name = excluded.last_name,
            email = excluded.email,
            phone = excluded.phone,
            birthdate = excluded.birthdate,
            mailing_street = excluded.mailing_street,
            mailing_city = excluded.mailing_city,
            mailing_postal_code = excluded.mailing_postal_code,
            mailing_state = excluded.mailing_state,
            mailing_country = excluded.mailing_country,
            updated_at = excluded.updated_at",
        params.as_slice(),
    )
}

/// Update a contact by local id, all fields included
fn update_contact(
    conn: &rusqlite::Connection,
    contact: &Contact,
) -> Result<usize, rusqlite::Error> {
    let birthdate = date_param(contact.birthdate);
    let last_synced_at = date_param(contact.last_synced_at);

    let params: [&dyn ToSql; 14] = [
        &contact.first_name,
        &contact.last_name,
        &contact.email,
        &contact.phone,
        &birthdate,
        &contact.mailing_street,
        &contact.mailing_city,
        &contact.mailing_postal_code,
        &contact.mailing_state,
        &contact.mailing_country,
        &contact.external_id,
        &last_synced_at,
        &contact.updated_at,
        &contact.id, // WHERE clause
    ];

    conn.execute(
        "UPDATE contacts SET
            first_name = ?1, last_name = ?2, email = ?3, phone = ?4, birthdate = ?5,
            mailing_street = ?6, mailing_city = ?7, mailing_postal_code = ?8,
            mailing_state = ?9, mailing_country = ?10, external_id = ?11,
            last_synced_at = ?12, updated_at = ?13
         WHERE id = ?14",
        params.as_slice(),
    )
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_sql_error(err: rusqlite::Error) -> SynclineError {
    InfraError::from(err).into()
}

fn map_join_error(err: task::JoinError) -> SynclineError {
    SynclineError::Internal(format!("Task join error: {err}"))
}

// =============================================================================
// Tests
// =============================================================================
