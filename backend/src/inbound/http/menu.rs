//! Menu HTTP handler.
//!
//! ```text
//! GET /api/menu
//! ```

use actix_web::{get, web};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{CustomOption, Menu, Salad};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Salad as listed on the menu.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaladResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Garden")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 8.5)]
    pub price: Decimal,
    pub ingredients: Vec<String>,
    pub image: Option<String>,
    pub is_default: bool,
}

impl From<Salad> for SaladResponse {
    fn from(value: Salad) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            price: value.price,
            ingredients: value.ingredients,
            image: value.image,
            is_default: value.is_default,
        }
    }
}

/// Custom option as listed on the menu.
#[derive(Debug, Serialize, ToSchema)]
pub struct OptionResponse {
    pub id: String,
    /// One of `base`, `topping`, `dressing`.
    #[schema(example = "base")]
    pub category: String,
    #[schema(example = "Spinach")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 0.5)]
    pub price: Decimal,
    pub available: bool,
}

impl From<CustomOption> for OptionResponse {
    fn from(value: CustomOption) -> Self {
        Self {
            id: value.id.to_string(),
            category: value.category.as_str().to_owned(),
            name: value.name,
            price: value.price,
            available: value.available,
        }
    }
}

/// Response payload for `GET /api/menu`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MenuResponse {
    pub salads: Vec<SaladResponse>,
    pub options: Vec<OptionResponse>,
}

impl From<Menu> for MenuResponse {
    fn from(value: Menu) -> Self {
        Self {
            salads: value.salads.into_iter().map(SaladResponse::from).collect(),
            options: value.options.into_iter().map(OptionResponse::from).collect(),
        }
    }
}

/// Fetch every salad and every custom option.
#[utoipa::path(
    get,
    path = "/api/menu",
    responses(
        (status = 200, description = "Full menu", body = MenuResponse),
        (status = 404, description = "Menu collection missing", body = ErrorSchema),
        (status = 500, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "getMenu",
    security([])
)]
#[get("/menu")]
pub async fn get_menu(state: web::Data<HttpState>) -> ApiResult<web::Json<MenuResponse>> {
    let menu = state.menu.fetch_menu().await?;
    Ok(web::Json(MenuResponse::from(menu)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OptionCategory;
    use crate::domain::ports::Collection;
    use crate::test_support::{InMemoryRecordStore, api_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    fn stocked_store() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        store.seed_salad("Garden", Decimal::new(850, 2));
        store.seed_salad("Caesar", Decimal::new(900, 2));
        store.seed_option(OptionCategory::Dressing, "Ranch", Decimal::new(50, 2), true);
        store.seed_option(OptionCategory::Base, "Spinach", Decimal::ZERO, true);
        store
    }

    async fn get_menu_response(store: &InMemoryRecordStore) -> (StatusCode, Value) {
        let app = actix_test::init_service(api_app(store.http_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/menu").to_request(),
        )
        .await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn menu_is_public_and_ordered() {
        let (status, body) = get_menu_response(&stocked_store()).await;
        assert_eq!(status, StatusCode::OK);
        let salads: Vec<&str> = body["salads"]
            .as_array()
            .expect("salads array")
            .iter()
            .filter_map(|salad| salad["name"].as_str())
            .collect();
        assert_eq!(salads, ["Caesar", "Garden"]);
        assert_eq!(body["salads"][1]["price"], 8.5);
        assert_eq!(body["options"][0]["category"], "base");
        assert_eq!(body["options"][1]["name"], "Ranch");
    }

    #[rstest]
    #[case(Collection::Salads)]
    #[case(Collection::CustomOptions)]
    #[actix_web::test]
    async fn either_query_failing_yields_no_partial_body(#[case] collection: Collection) {
        let store = stocked_store();
        store.fail(collection);
        let (status, body) = get_menu_response(&store).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "store_unavailable");
        assert!(body.get("salads").is_none());
        assert!(body.get("options").is_none());
    }

    #[actix_web::test]
    async fn missing_collection_is_not_found() {
        let store = stocked_store();
        store.drop_collection(Collection::Salads);
        let (status, body) = get_menu_response(&store).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }
}
