//! Port for the `orders` collection.

use async_trait::async_trait;

use crate::domain::{NewOrder, Order, OrderId, OrderStatus, UserId};

use super::RecordStoreError;

/// Persistence contract for orders.
///
/// Orders are never deleted. Status changes go through
/// [`OrderRepository::update_status`], which only applies when the stored
/// status still equals `expected`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order; the store assigns `id` and `created`.
    async fn insert(&self, order: &NewOrder) -> Result<Order, RecordStoreError>;

    /// Orders owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RecordStoreError>;

    /// Fetch one order by identifier.
    async fn find(&self, id: &OrderId) -> Result<Option<Order>, RecordStoreError>;

    /// Move an order from `expected` to `next`.
    ///
    /// Returns `None` when no order with that id currently has status
    /// `expected`.
    async fn update_status(
        &self,
        id: &OrderId,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<Order>, RecordStoreError>;
}
