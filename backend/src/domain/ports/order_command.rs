//! Driving ports for placing, listing and advancing orders.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{Error, Order, OrderId, OrderStatus, SaladId, User, UserId};

/// Validated order payload from an authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrderRequest {
    /// Principal placing the order.
    pub user_id: UserId,
    /// Chosen salad.
    pub salad_id: SaladId,
    /// Raw category name to option selectors (ids or names).
    pub custom: BTreeMap<String, Vec<String>>,
    /// Whether the order should be delivered.
    pub delivery: bool,
}

/// Administrative request to move an order to its next status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceOrderStatusRequest {
    /// Principal issuing the command; must be an admin.
    pub actor: User,
    /// Order to update.
    pub order_id: OrderId,
    /// Requested status.
    pub status: OrderStatus,
}

/// Order placement use-case.
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Price and persist a new pending order.
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<Order, Error>;

    /// Advance an order through the status state machine.
    async fn advance_status(&self, request: AdvanceOrderStatusRequest) -> Result<Order, Error>;
}

/// Order history use-case.
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Orders owned by `user_id`, newest first.
    async fn list_orders(&self, user_id: &UserId) -> Result<Vec<Order>, Error>;
}
