//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by record store adapters.
//! Driving ports (`*Query`, `*Command`, [`LoginService`]) are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod menu_query;
mod menu_repository;
mod order_command;
mod order_repository;
mod principal_query;
mod record_store;
mod subscription_command;
mod subscription_repository;
mod user_repository;

pub use login_service::LoginService;
pub use menu_query::MenuQuery;
#[cfg(test)]
pub use menu_repository::MockMenuRepository;
pub use menu_repository::MenuRepository;
pub use order_command::{AdvanceOrderStatusRequest, OrderCommand, OrderQuery, PlaceOrderRequest};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::OrderRepository;
pub use principal_query::PrincipalQuery;
pub use record_store::{Collection, RecordStoreError};
pub use subscription_command::{
    CreateSubscriptionRequest, SubscriptionCommand, SubscriptionQuery,
};
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::SubscriptionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserRepository};
