//! Diesel and pool error mapping into [`ResourceStoreError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ResourceStoreError;

use super::pool::PoolError;

/// Map pool failures to connection errors.
pub(super) fn map_pool_error(error: PoolError) -> ResourceStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ResourceStoreError::connection(message)
        }
    }
}

/// Map Diesel failures to store errors, logging the underlying kind.
///
/// Only dropped connections count as connection errors; everything else is a
/// query error and surfaces as an internal failure.
pub(super) fn map_diesel_error(error: DieselError) -> ResourceStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        ) => ResourceStoreError::connection("database connection error"),
        DieselError::NotFound => ResourceStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => ResourceStoreError::query("database query error"),
        _ => ResourceStoreError::query("database error"),
    }
}

/// Convert a stored counter into the domain's unsigned form.
pub(super) fn to_count(value: i64) -> Result<u64, ResourceStoreError> {
    u64::try_from(value)
        .map_err(|_| ResourceStoreError::query(format!("negative counter in store: {value}")))
}

/// Convert page arithmetic into SQL `LIMIT`/`OFFSET` values.
pub(super) fn to_sql_bound(value: u64) -> Result<i64, ResourceStoreError> {
    i64::try_from(value)
        .map_err(|_| ResourceStoreError::query(format!("page bound out of range: {value}")))
}
