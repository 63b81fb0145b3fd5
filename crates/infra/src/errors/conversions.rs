//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;
use syncline_domain::SynclineError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SynclineError);

impl From<InfraError> for SynclineError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SynclineError> for InfraError {
    fn from(value: SynclineError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSynclineError {
    fn into_syncline(self) -> SynclineError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → SynclineError */
/* -------------------------------------------------------------------------- */

impl IntoSynclineError for SqlError {
    fn into_syncline(self) -> SynclineError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        SynclineError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        SynclineError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        SynclineError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        SynclineError::Database("foreign key constraint violation".into())
                    }
                    _ => SynclineError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => SynclineError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                SynclineError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                SynclineError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                SynclineError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidQuery => SynclineError::Database("invalid SQL query".into()),
            other => SynclineError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_syncline())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → SynclineError */
/* -------------------------------------------------------------------------- */

impl IntoSynclineError for r2d2::Error {
    fn into_syncline(self) -> SynclineError {
        SynclineError::Database(format!("connection pool error: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_syncline())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SynclineError */
/* -------------------------------------------------------------------------- */

impl IntoSynclineError for HttpError {
    fn into_syncline(self) -> SynclineError {
        if self.is_timeout() {
            return SynclineError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return SynclineError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            return SynclineError::RemoteStatus(format!(
                "HTTP {} {}",
                code,
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        SynclineError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_syncline())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
