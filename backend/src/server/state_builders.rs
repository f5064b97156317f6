//! Builders wiring the PostgreSQL adapters into HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use salad_backend::inbound::http::state::HttpState;
use salad_backend::outbound::persistence::{
    DbPool, DieselMenuRepository, DieselOrderRepository, DieselSubscriptionRepository,
    DieselUserRepository,
};

/// Build handler state with every port backed by the shared pool.
pub(super) fn build_http_state(pool: &DbPool) -> HttpState {
    HttpState::from_repositories(
        Arc::new(DieselMenuRepository::new(pool.clone())),
        Arc::new(DieselOrderRepository::new(pool.clone())),
        Arc::new(DieselSubscriptionRepository::new(pool.clone())),
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    )
}
