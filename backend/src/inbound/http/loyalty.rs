//! Loyalty balance handler.
//!
//! ```text
//! GET /api/loyalty
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::LoyaltySummary;
use crate::inbound::http::auth::Principal;
use crate::inbound::http::schemas::ErrorSchema;

/// Response body for `GET /api/loyalty`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoyaltyResponse {
    #[schema(example = 120)]
    pub points: u32,
    #[schema(example = 3)]
    pub salad_streak: u32,
}

impl From<LoyaltySummary> for LoyaltyResponse {
    fn from(value: LoyaltySummary) -> Self {
        Self {
            points: value.points,
            salad_streak: value.salad_streak,
        }
    }
}

/// Report the logged-in user's points and streak.
///
/// The values come from the principal loaded for this request.
#[utoipa::path(
    get,
    path = "/api/loyalty",
    responses(
        (status = 200, description = "Loyalty balance", body = LoyaltyResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["loyalty"],
    operation_id = "getLoyalty"
)]
#[get("/loyalty")]
pub async fn get_loyalty(principal: Principal) -> web::Json<LoyaltyResponse> {
    web::Json(LoyaltySummary::from(&principal.0).into())
}
