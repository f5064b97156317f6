//! Administrative order handlers.
//!
//! ```text
//! PATCH /api/admin/orders/{id}/status {"status":"prepping"}
//! ```

use actix_web::{patch, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::AdvanceOrderStatusRequest;
use crate::domain::{OrderId, OrderStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Principal;
use crate::inbound::http::orders::OrderResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_choice_error, parse_record_id};

const STATUSES: [&str; 4] = ["pending", "prepping", "ready", "delivered"];

/// Request body for the status command.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AdvanceStatusBody {
    /// Must be the immediate successor of the current status.
    #[schema(example = "prepping")]
    pub status: String,
}

/// Move an order to its next status.
#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(("id" = String, Path, description = "Order identifier")),
    request_body = AdvanceStatusBody,
    responses(
        (status = 200, description = "Updated order", body = OrderResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "No such order", body = ErrorSchema),
        (status = 409, description = "Not the next status, or changed concurrently", body = ErrorSchema),
        (status = 500, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "advanceOrderStatus"
)]
#[patch("/admin/orders/{id}/status")]
pub async fn advance_order_status(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
    payload: web::Json<AdvanceStatusBody>,
) -> ApiResult<web::Json<OrderResponse>> {
    let order_id: OrderId = parse_record_id(&path.into_inner(), FieldName::new("id"))?;
    let raw = payload.into_inner().status;
    let status = OrderStatus::parse(&raw)
        .ok_or_else(|| invalid_choice_error(FieldName::new("status"), &raw, &STATUSES))?;
    let order = state
        .orders
        .advance_status(AdvanceOrderStatusRequest {
            actor: principal.into_inner(),
            order_id,
            status,
        })
        .await?;
    Ok(web::Json(OrderResponse::from(order)))
}
