//! Diesel error mapping shared by every record store repository.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{Collection, RecordStoreError};

/// PostgreSQL reports a dropped or never-created table as an unknown error
/// whose message reads `relation "<name>" does not exist`.
fn is_missing_relation(info: &dyn DatabaseErrorInformation) -> bool {
    let message = info.message();
    message.starts_with("relation ") && message.ends_with("does not exist")
}

fn constraint_message(kind: &DatabaseErrorKind, info: &dyn DatabaseErrorInformation) -> String {
    match (info.constraint_name(), info.column_name()) {
        (Some(constraint), _) => format!("{constraint} failed"),
        (None, Some(column)) => format!("{column} is required"),
        (None, None) => match kind {
            DatabaseErrorKind::UniqueViolation => "duplicate record".to_owned(),
            DatabaseErrorKind::ForeignKeyViolation => "referenced record missing".to_owned(),
            _ => "field constraint failed".to_owned(),
        },
    }
}

/// Map a Diesel failure on `collection` to the shared store error.
///
/// Driver messages are only logged; constraint errors carry the constraint
/// or column name so clients can tell which field was rejected.
pub(crate) fn map_diesel_error(error: DieselError, collection: Collection) -> RecordStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, %collection, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            %collection,
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::ClosedConnection => {
                RecordStoreError::connection("database connection error")
            }
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation => {
                RecordStoreError::constraint(collection, constraint_message(&kind, info.as_ref()))
            }
            _ if is_missing_relation(info.as_ref()) => {
                RecordStoreError::missing_collection(collection)
            }
            _ => RecordStoreError::query("database error"),
        },
        DieselError::QueryBuilderError(_) => RecordStoreError::query("database query error"),
        DieselError::DeserializationError(_) => {
            RecordStoreError::query(format!("malformed {collection} row"))
        }
        _ => RecordStoreError::query("database error"),
    }
}

/// Report a row that was read but does not form a valid domain record.
pub(crate) fn malformed_row(collection: Collection, detail: impl std::fmt::Display) -> RecordStoreError {
    tracing::warn!(%collection, %detail, "malformed row in record store");
    RecordStoreError::query(format!("malformed {collection} row"))
}
