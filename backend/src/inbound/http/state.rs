//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    LoginService, MenuQuery, MenuRepository, OrderCommand, OrderQuery, OrderRepository,
    PrincipalQuery, SubscriptionCommand, SubscriptionQuery, SubscriptionRepository,
    UserRepository,
};
use crate::domain::{AccountService, MenuService, OrderService, SubscriptionService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub principals: Arc<dyn PrincipalQuery>,
    pub menu: Arc<dyn MenuQuery>,
    pub orders: Arc<dyn OrderCommand>,
    pub orders_query: Arc<dyn OrderQuery>,
    pub subscriptions: Arc<dyn SubscriptionCommand>,
    pub subscriptions_query: Arc<dyn SubscriptionQuery>,
}

impl HttpState {
    /// Wire the domain services over one adapter per collection group.
    ///
    /// `clock` stamps subscription creation times.
    pub fn from_repositories<M, O, S, U>(
        menu: Arc<M>,
        orders: Arc<O>,
        subscriptions: Arc<S>,
        users: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        M: MenuRepository + 'static,
        O: OrderRepository + 'static,
        S: SubscriptionRepository + 'static,
        U: UserRepository + 'static,
    {
        let accounts = Arc::new(AccountService::new(users));
        let order_service = Arc::new(OrderService::new(Arc::clone(&menu), orders));
        let subscription_service = Arc::new(SubscriptionService::new(subscriptions, clock));
        Self {
            login: accounts.clone(),
            principals: accounts,
            menu: Arc::new(MenuService::new(menu)),
            orders: order_service.clone(),
            orders_query: order_service,
            subscriptions: subscription_service.clone(),
            subscriptions_query: subscription_service,
        }
    }
}
