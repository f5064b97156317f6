//! PostgreSQL record store adapters using Diesel ORM.
//!
//! Each collection has a thin repository translating between Diesel rows and
//! domain records. Rows (`models.rs`) and tables (`schema.rs`) stay private
//! to this module. Connections come from a `bb8` pool through
//! `diesel-async`; all failures are reported as
//! [`RecordStoreError`](crate::domain::ports::RecordStoreError).
//!
//! # Example
//!
//! ```ignore
//! use salad_backend::outbound::persistence::{DbPool, DieselMenuRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/salads")).await?;
//! let menu = DieselMenuRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_menu_repository;
mod diesel_order_repository;
mod diesel_subscription_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_menu_repository::DieselMenuRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, run_migrations, run_migrations_blocking};
pub use pool::{DbPool, PoolConfig, PoolError};
