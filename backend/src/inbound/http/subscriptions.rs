//! Subscription HTTP handlers.
//!
//! ```text
//! POST /api/subscriptions {"plan":"weekly","salads_per_cycle":5}
//! GET /api/subscriptions
//! POST /api/subscriptions/{id}/cancel
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateSubscriptionRequest;
use crate::domain::{
    Error, Plan, SALADS_PER_CYCLE_MAX, SALADS_PER_CYCLE_MIN, SaladsPerCycle, Subscription,
    SubscriptionId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Principal;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_choice_error, out_of_range_error, parse_record_id,
};

/// Request body for `POST /api/subscriptions`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateSubscriptionBody {
    /// `weekly` or `monthly`.
    #[schema(example = "weekly")]
    pub plan: String,
    /// Between 1 and 21 inclusive.
    #[schema(example = 5)]
    pub salads_per_cycle: i64,
}

/// Response body for `POST /api/subscriptions`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionCreatedResponse {
    #[schema(example = "Subscription created")]
    pub message: String,
    pub sub_id: String,
}

/// Stored subscription as returned to its owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    pub id: String,
    pub user_id: String,
    #[schema(example = "weekly")]
    pub plan: String,
    pub salads_per_cycle: u8,
    pub active: bool,
    /// RFC 3339 time of the next delivery.
    pub next_delivery: String,
    /// RFC 3339 creation time.
    pub created: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(value: Subscription) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            plan: value.plan.as_str().to_owned(),
            salads_per_cycle: value.salads_per_cycle.get(),
            active: value.active,
            next_delivery: value.next_delivery.to_rfc3339(),
            created: value.created.to_rfc3339(),
        }
    }
}

fn parse_create_subscription(
    principal: &Principal,
    body: CreateSubscriptionBody,
) -> Result<CreateSubscriptionRequest, Error> {
    let plan = Plan::parse(&body.plan).ok_or_else(|| {
        invalid_choice_error(
            FieldName::new("plan"),
            &body.plan,
            &[Plan::Weekly.as_str(), Plan::Monthly.as_str()],
        )
    })?;
    let salads_per_cycle = SaladsPerCycle::new(body.salads_per_cycle).map_err(|_| {
        out_of_range_error(
            FieldName::new("salads_per_cycle"),
            body.salads_per_cycle,
            i64::from(SALADS_PER_CYCLE_MIN),
            i64::from(SALADS_PER_CYCLE_MAX),
        )
    })?;
    Ok(CreateSubscriptionRequest {
        user_id: principal.0.id,
        plan,
        salads_per_cycle,
    })
}

/// Start a subscription for the logged-in user.
#[utoipa::path(
    post,
    path = "/api/subscriptions",
    request_body = CreateSubscriptionBody,
    responses(
        (status = 200, description = "Subscription created", body = SubscriptionCreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["subscriptions"],
    operation_id = "createSubscription"
)]
#[post("/subscriptions")]
pub async fn create_subscription(
    state: web::Data<HttpState>,
    principal: Principal,
    payload: web::Json<CreateSubscriptionBody>,
) -> ApiResult<web::Json<SubscriptionCreatedResponse>> {
    let request = parse_create_subscription(&principal, payload.into_inner())?;
    let subscription = state.subscriptions.create(request).await?;
    Ok(web::Json(SubscriptionCreatedResponse {
        message: "Subscription created".to_owned(),
        sub_id: subscription.id.to_string(),
    }))
}

/// List the logged-in user's subscriptions, newest first.
#[utoipa::path(
    get,
    path = "/api/subscriptions",
    responses(
        (status = 200, description = "Subscriptions", body = [SubscriptionResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["subscriptions"],
    operation_id = "listSubscriptions"
)]
#[get("/subscriptions")]
pub async fn list_subscriptions(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<web::Json<Vec<SubscriptionResponse>>> {
    let subscriptions = state
        .subscriptions_query
        .list_subscriptions(&principal.0.id)
        .await?;
    Ok(web::Json(
        subscriptions
            .into_iter()
            .map(SubscriptionResponse::from)
            .collect(),
    ))
}

/// Stop one of the logged-in user's subscriptions.
#[utoipa::path(
    post,
    path = "/api/subscriptions/{id}/cancel",
    params(("id" = String, Path, description = "Subscription identifier")),
    responses(
        (status = 200, description = "Subscription after cancellation", body = SubscriptionResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such subscription for this user", body = ErrorSchema),
        (status = 500, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["subscriptions"],
    operation_id = "cancelSubscription"
)]
#[post("/subscriptions/{id}/cancel")]
pub async fn cancel_subscription(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<web::Json<SubscriptionResponse>> {
    let id: SubscriptionId = parse_record_id(&path.into_inner(), FieldName::new("id"))?;
    let subscription = state.subscriptions.cancel(&principal.0.id, &id).await?;
    Ok(web::Json(SubscriptionResponse::from(subscription)))
}
