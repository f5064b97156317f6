//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed records of the five store collections
//! (users, salads, custom options, orders, subscriptions), the rules that act
//! on them, and the services implementing the driving ports. Nothing here
//! knows about HTTP or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload and taxonomy.
//! - Record types: User, Salad, CustomOption, Order, Subscription.
//! - Services: MenuService, OrderService, SubscriptionService, AccountService.

pub mod ports;

mod account_service;
mod auth;
mod error;
mod ids;
mod loyalty;
mod menu;
mod menu_service;
mod order;
mod order_service;
mod password;
mod subscription;
mod subscription_service;
mod trace_id;
mod user;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{OptionId, OrderId, RecordIdError, SaladId, SubscriptionId, UserId};
pub use self::loyalty::LoyaltySummary;
pub use self::menu::{CustomOption, Menu, OptionCategory, Salad};
pub use self::menu_service::MenuService;
pub use self::order::{
    CustomizationError, NewOrder, Order, OrderItems, OrderStatus, PricedItems,
    StatusTransitionError, price_order,
};
pub use self::order_service::OrderService;
pub use self::password::{PasswordHash, PasswordHashError};
pub use self::subscription::{
    FIRST_DELIVERY_DAYS, NewSubscription, Plan, SALADS_PER_CYCLE_MAX, SALADS_PER_CYCLE_MIN,
    SaladsPerCycle, Subscription, SubscriptionValidationError,
};
pub use self::subscription_service::SubscriptionService;
pub use self::trace_id::TraceId;
pub use self::user::{Role, User};
