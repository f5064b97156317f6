//! Driving ports for subscription management.

use async_trait::async_trait;

use crate::domain::{Error, Plan, SaladsPerCycle, Subscription, SubscriptionId, UserId};

/// Validated subscription payload from an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateSubscriptionRequest {
    /// Principal subscribing.
    pub user_id: UserId,
    /// Billing plan.
    pub plan: Plan,
    /// Salads per cycle.
    pub salads_per_cycle: SaladsPerCycle,
}

/// Subscription mutation use-case.
#[async_trait]
pub trait SubscriptionCommand: Send + Sync {
    /// Persist an active subscription starting now.
    async fn create(&self, request: CreateSubscriptionRequest) -> Result<Subscription, Error>;

    /// Stop a subscription owned by `user_id`.
    async fn cancel(&self, user_id: &UserId, id: &SubscriptionId) -> Result<Subscription, Error>;
}

/// Subscription listing use-case.
#[async_trait]
pub trait SubscriptionQuery: Send + Sync {
    /// Subscriptions owned by `user_id`, newest first.
    async fn list_subscriptions(&self, user_id: &UserId) -> Result<Vec<Subscription>, Error>;
}
