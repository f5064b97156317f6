//! PostgreSQL-backed `OrderRepository` over the `orders` collection.
//!
//! Status updates filter on the status the caller read, so a concurrent
//! change leaves zero rows updated and the caller sees `None`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{Collection, OrderRepository, RecordStoreError};
use crate::domain::{NewOrder, Order, OrderId, OrderItems, OrderStatus, UserId};

use super::diesel_error_mapping::{malformed_row, map_diesel_error};
use super::models::{NewOrderRow, OrderRow};
use super::pool::{DbPool, map_pool_error};
use super::schema::orders;

/// Diesel-backed implementation of the `OrderRepository` port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> RecordStoreError {
    map_diesel_error(error, Collection::Orders)
}

fn row_to_order(row: OrderRow) -> Result<Order, RecordStoreError> {
    let items: OrderItems =
        serde_json::from_value(row.items).map_err(|err| malformed_row(Collection::Orders, err))?;
    let status = OrderStatus::parse(&row.status).ok_or_else(|| {
        malformed_row(
            Collection::Orders,
            format_args!("unknown status `{}`", row.status),
        )
    })?;
    Ok(Order {
        id: OrderId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        items,
        total: row.total,
        status,
        delivery: row.delivery,
        created: row.created,
    })
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn insert(&self, order: &NewOrder) -> Result<Order, RecordStoreError> {
        let items = serde_json::to_value(&order.items)
            .map_err(|err| RecordStoreError::query(format!("encode order items: {err}")))?;
        let new_row = NewOrderRow {
            user_id: *order.user_id.as_uuid(),
            items: &items,
            total: order.total,
            status: order.status.as_str(),
            delivery: order.delivery,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: OrderRow = diesel::insert_into(orders::table)
            .values(&new_row)
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;
        row_to_order(row)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OrderRow> = orders::table
            .filter(orders::user_id.eq(user_id.as_uuid()))
            .select(OrderRow::as_select())
            .order_by((orders::created.desc(), orders::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_error)?;
        rows.into_iter().map(row_to_order).collect()
    }

    async fn find(&self, id: &OrderId) -> Result<Option<Order>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<OrderRow> = orders::table
            .filter(orders::id.eq(id.as_uuid()))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        row.map(row_to_order).transpose()
    }

    async fn update_status(
        &self,
        id: &OrderId,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<Order>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<OrderRow> = diesel::update(
            orders::table
                .filter(orders::id.eq(id.as_uuid()))
                .filter(orders::status.eq(expected.as_str())),
        )
        .set(orders::status.eq(next.as_str()))
        .returning(OrderRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_error)?;
        row.map(row_to_order).transpose()
    }
}
