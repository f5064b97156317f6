//! Port for the `subscriptions` collection.

use async_trait::async_trait;

use crate::domain::{NewSubscription, Subscription, SubscriptionId, UserId};

use super::RecordStoreError;

/// Persistence contract for subscriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert a new subscription; the store assigns `id`.
    async fn insert(
        &self,
        subscription: &NewSubscription,
    ) -> Result<Subscription, RecordStoreError>;

    /// Subscriptions owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: &UserId)
    -> Result<Vec<Subscription>, RecordStoreError>;

    /// Mark a subscription owned by `owner` inactive.
    ///
    /// Returns `None` when no subscription with that id belongs to `owner`.
    async fn deactivate(
        &self,
        id: &SubscriptionId,
        owner: &UserId,
    ) -> Result<Option<Subscription>, RecordStoreError>;
}
