//! Order HTTP handlers.
//!
//! ```text
//! POST /api/order {"salad_id":"…","custom":{"base":"spinach"},"delivery":true}
//! GET /api/orders
//! ```

use std::collections::BTreeMap;

use actix_web::{get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::PlaceOrderRequest;
use crate::domain::{Error, Order, SaladId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Principal;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_record_id};

/// One option selector or several.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum Selection {
    /// A single option id or name.
    One(String),
    /// Several option ids or names.
    Many(Vec<String>),
}

impl Selection {
    fn into_selectors(self) -> Vec<String> {
        match self {
            Self::One(selector) => vec![selector],
            Self::Many(selectors) => selectors,
        }
    }
}

/// Request body for `POST /api/order`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PlaceOrderBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub salad_id: String,
    /// Option category (`base`, `topping`, `dressing`) to selection.
    #[serde(default)]
    pub custom: BTreeMap<String, Selection>,
    #[serde(default)]
    pub delivery: bool,
}

/// Response body for `POST /api/order`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderPlacedResponse {
    #[schema(example = "Order placed")]
    pub message: String,
    pub order_id: String,
}

/// Stored order as returned to its owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub salad_id: String,
    /// Resolved option names per category.
    pub custom: BTreeMap<String, Vec<String>>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.0)]
    pub total: Decimal,
    #[schema(example = "pending")]
    pub status: String,
    pub delivery: bool,
    /// RFC 3339 creation time.
    pub created: String,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            salad_id: value.items.salad_id.to_string(),
            custom: value
                .items
                .custom
                .into_iter()
                .map(|(category, names)| (category.as_str().to_owned(), names))
                .collect(),
            total: value.total,
            status: value.status.as_str().to_owned(),
            delivery: value.delivery,
            created: value.created.to_rfc3339(),
        }
    }
}

fn parse_place_order(principal: &Principal, body: PlaceOrderBody) -> Result<PlaceOrderRequest, Error> {
    let salad_id: SaladId = parse_record_id(&body.salad_id, FieldName::new("salad_id"))?;
    Ok(PlaceOrderRequest {
        user_id: principal.0.id,
        salad_id,
        custom: body
            .custom
            .into_iter()
            .map(|(category, selection)| (category, selection.into_selectors()))
            .collect(),
        delivery: body.delivery,
    })
}

/// Price and store a pending order for the logged-in user.
#[utoipa::path(
    post,
    path = "/api/order",
    request_body = PlaceOrderBody,
    responses(
        (status = 200, description = "Order placed", body = OrderPlacedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "placeOrder"
)]
#[post("/order")]
pub async fn place_order(
    state: web::Data<HttpState>,
    principal: Principal,
    payload: web::Json<PlaceOrderBody>,
) -> ApiResult<web::Json<OrderPlacedResponse>> {
    let request = parse_place_order(&principal, payload.into_inner())?;
    let order = state.orders.place_order(request).await?;
    Ok(web::Json(OrderPlacedResponse {
        message: "Order placed".to_owned(),
        order_id: order.id.to_string(),
    }))
}

/// List the logged-in user's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Order history", body = [OrderResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<web::Json<Vec<OrderResponse>>> {
    let orders = state.orders_query.list_orders(&principal.0.id).await?;
    Ok(web::Json(orders.into_iter().map(OrderResponse::from).collect()))
}
