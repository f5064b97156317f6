//! PostgreSQL-backed `SubscriptionRepository` over the `subscriptions`
//! collection.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{Collection, RecordStoreError, SubscriptionRepository};
use crate::domain::{
    NewSubscription, Plan, SaladsPerCycle, Subscription, SubscriptionId, UserId,
};

use super::diesel_error_mapping::{malformed_row, map_diesel_error};
use super::models::{NewSubscriptionRow, SubscriptionRow};
use super::pool::{DbPool, map_pool_error};
use super::schema::subscriptions;

/// Diesel-backed implementation of the `SubscriptionRepository` port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> RecordStoreError {
    map_diesel_error(error, Collection::Subscriptions)
}

fn row_to_subscription(row: SubscriptionRow) -> Result<Subscription, RecordStoreError> {
    let plan = Plan::parse(&row.plan).ok_or_else(|| {
        malformed_row(
            Collection::Subscriptions,
            format_args!("unknown plan `{}`", row.plan),
        )
    })?;
    let salads_per_cycle = SaladsPerCycle::new(i64::from(row.salads_per_cycle))
        .map_err(|err| malformed_row(Collection::Subscriptions, err))?;
    Ok(Subscription {
        id: SubscriptionId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        plan,
        salads_per_cycle,
        active: row.active,
        next_delivery: row.next_delivery,
        created: row.created,
    })
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn insert(
        &self,
        subscription: &NewSubscription,
    ) -> Result<Subscription, RecordStoreError> {
        let new_row = NewSubscriptionRow {
            user_id: *subscription.user_id.as_uuid(),
            plan: subscription.plan.as_str(),
            salads_per_cycle: i32::from(subscription.salads_per_cycle.get()),
            active: subscription.active,
            next_delivery: subscription.next_delivery,
            created: subscription.created,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: SubscriptionRow = diesel::insert_into(subscriptions::table)
            .values(&new_row)
            .returning(SubscriptionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;
        row_to_subscription(row)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Subscription>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SubscriptionRow> = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id.as_uuid()))
            .select(SubscriptionRow::as_select())
            .order_by((subscriptions::created.desc(), subscriptions::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_error)?;
        rows.into_iter().map(row_to_subscription).collect()
    }

    async fn deactivate(
        &self,
        id: &SubscriptionId,
        owner: &UserId,
    ) -> Result<Option<Subscription>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SubscriptionRow> = diesel::update(
            subscriptions::table
                .filter(subscriptions::id.eq(id.as_uuid()))
                .filter(subscriptions::user_id.eq(owner.as_uuid())),
        )
        .set(subscriptions::active.eq(false))
        .returning(SubscriptionRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_error)?;
        row.map(row_to_subscription).transpose()
    }
}
