//! PostgreSQL-backed `MenuRepository` over the `salads` and `custom_options`
//! collections.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{Collection, MenuRepository, RecordStoreError};
use crate::domain::{CustomOption, OptionCategory, OptionId, Salad, SaladId};

use super::diesel_error_mapping::{malformed_row, map_diesel_error};
use super::models::{CustomOptionRow, SaladRow};
use super::pool::{DbPool, map_pool_error};
use super::schema::{custom_options, salads};

/// Diesel-backed implementation of the `MenuRepository` port.
#[derive(Clone)]
pub struct DieselMenuRepository {
    pool: DbPool,
}

impl DieselMenuRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_salad(row: SaladRow) -> Result<Salad, RecordStoreError> {
    let ingredients: Vec<String> = serde_json::from_value(row.ingredients)
        .map_err(|err| malformed_row(Collection::Salads, err))?;
    Ok(Salad {
        id: SaladId::from_uuid(row.id),
        name: row.name,
        price: row.price,
        ingredients,
        image: row.image,
        is_default: row.is_default,
    })
}

fn row_to_option(row: CustomOptionRow) -> Result<CustomOption, RecordStoreError> {
    let category = OptionCategory::parse(&row.category).ok_or_else(|| {
        malformed_row(
            Collection::CustomOptions,
            format_args!("unknown category `{}`", row.category),
        )
    })?;
    Ok(CustomOption {
        id: OptionId::from_uuid(row.id),
        category,
        name: row.name,
        price: row.price,
        available: row.available,
    })
}

#[async_trait]
impl MenuRepository for DieselMenuRepository {
    async fn list_salads(&self) -> Result<Vec<Salad>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SaladRow> = salads::table
            .select(SaladRow::as_select())
            .order_by((salads::name.asc(), salads::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Collection::Salads))?;
        rows.into_iter().map(row_to_salad).collect()
    }

    async fn list_options(&self) -> Result<Vec<CustomOption>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CustomOptionRow> = custom_options::table
            .select(CustomOptionRow::as_select())
            .order_by((custom_options::category.asc(), custom_options::name.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Collection::CustomOptions))?;
        rows.into_iter().map(row_to_option).collect()
    }

    async fn find_salad(&self, id: &SaladId) -> Result<Option<Salad>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SaladRow> = salads::table
            .filter(salads::id.eq(id.as_uuid()))
            .select(SaladRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, Collection::Salads))?;
        row.map(row_to_salad).transpose()
    }
}
