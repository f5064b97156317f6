//! Internal Diesel row structs for the five collections.
//!
//! Rows never leave the persistence layer; each repository converts them into
//! domain records and reports malformed rows as query failures.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::schema::{custom_options, orders, salads, subscriptions, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub address: Option<String>,
    pub points: i32,
    pub salad_streak: i32,
    pub role: String,
    #[expect(dead_code, reason = "selected for parity with the table; not surfaced")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = salads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SaladRow {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub ingredients: serde_json::Value,
    pub image: Option<String>,
    pub is_default: bool,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = custom_options)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomOptionRow {
    pub id: Uuid,
    pub category: String,
    pub name: String,
    pub price: Decimal,
    pub available: bool,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: serde_json::Value,
    pub total: Decimal,
    pub status: String,
    pub delivery: bool,
    pub created: DateTime<Utc>,
}

/// Insertable order; `id` and `created` come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub user_id: Uuid,
    pub items: &'a serde_json::Value,
    pub total: Decimal,
    pub status: &'a str,
    pub delivery: bool,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subscriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubscriptionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: String,
    pub salads_per_cycle: i32,
    pub active: bool,
    pub next_delivery: DateTime<Utc>,
    pub created: DateTime<Utc>,
}

/// Insertable subscription; `id` comes from the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub(crate) struct NewSubscriptionRow<'a> {
    pub user_id: Uuid,
    pub plan: &'a str,
    pub salads_per_cycle: i32,
    pub active: bool,
    pub next_delivery: DateTime<Utc>,
    pub created: DateTime<Utc>,
}
