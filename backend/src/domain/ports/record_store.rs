//! Shared error vocabulary for every record-store backed repository.
//!
//! All five collections live in the same store, so their adapters report
//! failures through one typed error. The domain maps it to the public
//! taxonomy exactly once, in [`From<RecordStoreError> for Error`].

use std::fmt;

use tracing::warn;

use crate::domain::Error;

use super::define_port_error;

/// Named collection in the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// `users`
    Users,
    /// `salads`
    Salads,
    /// `custom_options`
    CustomOptions,
    /// `orders`
    Orders,
    /// `subscriptions`
    Subscriptions,
}

impl Collection {
    /// Every collection declared by the schema migration.
    pub const ALL: [Self; 5] = [
        Self::Users,
        Self::Salads,
        Self::CustomOptions,
        Self::Orders,
        Self::Subscriptions,
    ];

    /// Collection (table) name in the store.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Salads => "salads",
            Self::CustomOptions => "custom_options",
            Self::Orders => "orders",
            Self::Subscriptions => "subscriptions",
        }
    }

    /// Look a collection up by its store name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// The store could not be reached.
        Connection { message: String } => "record store connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "record store query failed: {message}",
        /// A field constraint declared by the schema rejected the record.
        Constraint { collection: Collection, message: String } =>
            "{collection} constraint violated: {message}",
        /// The collection has not been created.
        MissingCollection { collection: Collection } => "collection `{collection}` not found",
    }
}

impl From<RecordStoreError> for Error {
    fn from(error: RecordStoreError) -> Self {
        match error {
            RecordStoreError::Connection { message } => {
                warn!(%message, "record store unavailable");
                Self::store_unavailable("record store unavailable")
            }
            RecordStoreError::Query { message } => {
                warn!(%message, "record store query failed");
                Self::store_unavailable("record store query failed")
            }
            RecordStoreError::Constraint {
                collection,
                message,
            } => Self::invalid_request(format!("{collection} record rejected: {message}"))
                .with_details(serde_json::json!({
                    "collection": collection.as_str(),
                    "code": "constraint_violation",
                })),
            RecordStoreError::MissingCollection { collection } => {
                Self::not_found(format!("collection `{collection}` not found"))
            }
        }
    }
}
