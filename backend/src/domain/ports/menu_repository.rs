//! Port for reading the `salads` and `custom_options` collections.

use async_trait::async_trait;

use crate::domain::{CustomOption, Salad, SaladId};

use super::RecordStoreError;

/// Read access to menu records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// All salads, ordered by name.
    async fn list_salads(&self) -> Result<Vec<Salad>, RecordStoreError>;

    /// All custom options, ordered by category then name.
    async fn list_options(&self) -> Result<Vec<CustomOption>, RecordStoreError>;

    /// Fetch one salad by identifier.
    async fn find_salad(&self, id: &SaladId) -> Result<Option<Salad>, RecordStoreError>;
}
