//! Strongly typed record identifiers.
//!
//! Every collection in the record store keys its rows by a UUID. Wrapping each
//! one in its own newtype stops an order id from being passed where a salad id
//! is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error raised when a string is not a valid record identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be a valid UUID")]
pub struct RecordIdError {
    kind: &'static str,
}

impl RecordIdError {
    /// Name of the identifier that failed to parse.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its hyphenated string form.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, RecordIdError> {
                let raw = raw.as_ref();
                if raw.trim() != raw {
                    return Err(RecordIdError { kind: $kind });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| RecordIdError { kind: $kind })
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = RecordIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

define_record_id!(
    /// Identifier of a record in the `users` collection.
    UserId,
    "user id"
);
define_record_id!(
    /// Identifier of a record in the `salads` collection.
    SaladId,
    "salad id"
);
define_record_id!(
    /// Identifier of a record in the `custom_options` collection.
    OptionId,
    "option id"
);
define_record_id!(
    /// Identifier of a record in the `orders` collection.
    OrderId,
    "order id"
);
define_record_id!(
    /// Identifier of a record in the `subscriptions` collection.
    SubscriptionId,
    "subscription id"
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("not-a-uuid")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn rejects_malformed_ids(#[case] raw: &str) {
        let err = OrderId::new(raw).expect_err("malformed id");
        assert_eq!(err.kind(), "order id");
        assert_eq!(err.to_string(), "order id must be a valid UUID");
    }

    #[rstest]
    fn serialises_as_plain_string() {
        let id = SaladId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        let value = serde_json::to_value(id).expect("serialise");
        assert_eq!(value, serde_json::json!("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
    }
}
