//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every route below lives under the `/api` scope; health probes sit at the
//! root so orchestrators can reach them without a session.

pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod loyalty;
pub mod menu;
pub mod orders;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod subscriptions;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// JSON extractor configuration shared by every endpoint.
///
/// Decoding failures (malformed JSON, unknown fields, wrong types) become
/// `invalid_request` errors in the usual envelope instead of Actix's plain
/// text response.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| validation::malformed_body_error(err).into())
}

/// Register the `/api` routes on a scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use salad_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(users::login)
        .service(users::logout)
        .service(menu::get_menu)
        .service(orders::place_order)
        .service(orders::list_orders)
        .service(subscriptions::create_subscription)
        .service(subscriptions::list_subscriptions)
        .service(subscriptions::cancel_subscription)
        .service(loyalty::get_loyalty)
        .service(admin::advance_order_status);
}
