//! PostgreSQL-backed `UserRepository` over the `users` collection.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{Collection, RecordStoreError, StoredCredentials, UserRepository};
use crate::domain::{PasswordHash, Role, User, UserId};

use super::diesel_error_mapping::{malformed_row, map_diesel_error};
use super::models::UserRow;
use super::pool::{DbPool, map_pool_error};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

diesel::define_sql_function! {
    /// PostgreSQL `lower(text)`.
    fn lower(value: Text) -> Text;
}

/// Users whose stored email equals `email` ignoring case. Backed by the
/// `users_email_lower_idx` unique index.
fn by_email(email: &str) -> users::BoxedQuery<'static, Pg> {
    users::table
        .filter(lower(users::email).eq(email.to_lowercase()))
        .into_boxed()
}

fn map_error(error: diesel::result::Error) -> RecordStoreError {
    map_diesel_error(error, Collection::Users)
}

fn counter(value: i32, field: &str) -> Result<u32, RecordStoreError> {
    u32::try_from(value)
        .map_err(|_| malformed_row(Collection::Users, format_args!("negative {field}")))
}

fn row_to_user(row: UserRow) -> Result<(User, String), RecordStoreError> {
    let role = Role::parse(&row.role).ok_or_else(|| {
        malformed_row(Collection::Users, format_args!("unknown role `{}`", row.role))
    })?;
    let user = User {
        id: UserId::from_uuid(row.id),
        email: row.email,
        name: row.name,
        address: row.address,
        points: counter(row.points, "points")?,
        salad_streak: counter(row.salad_streak, "salad_streak")?,
        role,
    };
    Ok((user, row.password_hash))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        row.map(|row| row_to_user(row).map(|(user, _)| user))
            .transpose()
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = by_email(email)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let (user, stored_hash) = row_to_user(row)?;
        let password_hash = stored_hash
            .parse::<PasswordHash>()
            .map_err(|err| malformed_row(Collection::Users, err))?;
        Ok(Some(StoredCredentials {
            user,
            password_hash,
        }))
    }
}
