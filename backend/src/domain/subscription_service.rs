//! Subscription services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CreateSubscriptionRequest, SubscriptionCommand, SubscriptionQuery, SubscriptionRepository,
};
use crate::domain::{Error, NewSubscription, Subscription, SubscriptionId, UserId};

/// Service implementing the subscription driving ports.
#[derive(Clone)]
pub struct SubscriptionService<S> {
    subscription_repo: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> SubscriptionService<S> {
    /// Create a new service; `clock` stamps `created`.
    pub fn new(subscription_repo: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            subscription_repo,
            clock,
        }
    }
}

#[async_trait]
impl<S> SubscriptionCommand for SubscriptionService<S>
where
    S: SubscriptionRepository,
{
    async fn create(&self, request: CreateSubscriptionRequest) -> Result<Subscription, Error> {
        let draft = NewSubscription::starting_at(
            request.user_id,
            request.plan,
            request.salads_per_cycle,
            self.clock.utc(),
        );
        let subscription = self.subscription_repo.insert(&draft).await?;
        info!(sub_id = %subscription.id, user_id = %subscription.user_id, plan = %subscription.plan, "subscription created");
        Ok(subscription)
    }

    async fn cancel(&self, user_id: &UserId, id: &SubscriptionId) -> Result<Subscription, Error> {
        self.subscription_repo
            .deactivate(id, user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("subscription {id} not found")))
    }
}

#[async_trait]
impl<S> SubscriptionQuery for SubscriptionService<S>
where
    S: SubscriptionRepository,
{
    async fn list_subscriptions(&self, user_id: &UserId) -> Result<Vec<Subscription>, Error> {
        Ok(self.subscription_repo.list_for_user(user_id).await?)
    }
}
