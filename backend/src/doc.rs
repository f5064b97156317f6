//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api`, the health probes, the
//! request/response DTOs and the error envelope ([`ErrorSchema`],
//! [`ErrorCodeSchema`]), plus the session cookie security scheme.
//!
//! The document is served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::admin::AdvanceStatusBody;
use crate::inbound::http::loyalty::LoyaltyResponse;
use crate::inbound::http::menu::{MenuResponse, OptionResponse, SaladResponse};
use crate::inbound::http::orders::{
    OrderPlacedResponse, OrderResponse, PlaceOrderBody, Selection,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::subscriptions::{
    CreateSubscriptionBody, SubscriptionCreatedResponse, SubscriptionResponse,
};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Salad ordering API",
        description = "Menu, orders, subscriptions and loyalty for the salad shop."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::menu::get_menu,
        crate::inbound::http::orders::place_order,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::subscriptions::create_subscription,
        crate::inbound::http::subscriptions::list_subscriptions,
        crate::inbound::http::subscriptions::cancel_subscription,
        crate::inbound::http::loyalty::get_loyalty,
        crate::inbound::http::admin::advance_order_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        MenuResponse,
        SaladResponse,
        OptionResponse,
        PlaceOrderBody,
        Selection,
        OrderPlacedResponse,
        OrderResponse,
        CreateSubscriptionBody,
        SubscriptionCreatedResponse,
        SubscriptionResponse,
        LoyaltyResponse,
        AdvanceStatusBody,
    )),
    tags(
        (name = "users", description = "Session login and logout"),
        (name = "menu", description = "Salads and custom options"),
        (name = "orders", description = "Placing and listing orders"),
        (name = "subscriptions", description = "Recurring deliveries"),
        (name = "loyalty", description = "Points and streaks"),
        (name = "admin", description = "Kitchen-side order management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the assembled OpenAPI document.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/login",
            "/api/logout",
            "/api/menu",
            "/api/order",
            "/api/orders",
            "/api/subscriptions",
            "/api/subscriptions/{id}/cancel",
            "/api/loyalty",
            "/api/admin/orders/{id}/status",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
