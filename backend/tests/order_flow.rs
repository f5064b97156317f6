//! End-to-end journey through the REST API backed by the in-memory store.
//!
//! A customer logs in, reads the menu, orders a customised salad, subscribes
//! and checks their loyalty balance; the kitchen then advances the order.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use salad_backend::domain::{OptionCategory, Role, Salad};
use salad_backend::test_support::{InMemoryRecordStore, api_app, login_request, session_cookie};
use serde_json::{Value, json};

struct Shop {
    store: InMemoryRecordStore,
    salad: Salad,
}

#[fixture]
fn shop() -> Shop {
    let store = InMemoryRecordStore::new();
    let customer = store.seed_user("ada@example.com", "s3cret", Role::Customer);
    store.set_loyalty(&customer.id, 40, 2);
    store.seed_user("chef@example.com", "kitchen", Role::Admin);
    let salad = store.seed_salad("Caesar", Decimal::new(950, 2));
    store.seed_salad("Garden", Decimal::new(800, 2));
    store.seed_option(OptionCategory::Base, "Kale", Decimal::new(75, 2), true);
    store.seed_option(OptionCategory::Topping, "Croutons", Decimal::new(50, 2), true);
    store.seed_option(OptionCategory::Dressing, "Lemon", Decimal::ZERO, true);
    Shop { store, salad }
}

async fn sign_in<S>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(app, login_request(email, password).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    session_cookie(&res).expect("login sets a session cookie")
}

async fn call_json<S>(app: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(app, request).await;
    let status = res.status();
    (status, test::read_body_json(res).await)
}

#[rstest]
#[actix_web::test]
async fn customer_orders_and_kitchen_delivers(shop: Shop) {
    let app = test::init_service(api_app(shop.store.http_state())).await;
    let customer = sign_in(&app, "ada@example.com", "s3cret").await;

    let (status, menu) = call_json(&app, TestRequest::get().uri("/api/menu").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = menu["salads"]
        .as_array()
        .expect("salads array")
        .iter()
        .filter_map(|salad| salad["name"].as_str())
        .collect();
    assert_eq!(names, ["Caesar", "Garden"]);
    assert_eq!(menu["options"].as_array().map(Vec::len), Some(3));

    let (status, placed) = call_json(
        &app,
        TestRequest::post()
            .uri("/api/order")
            .cookie(customer.clone())
            .set_json(json!({
                "salad_id": shop.salad.id.to_string(),
                "custom": { "base": "kale", "topping": ["Croutons"], "dressing": "lemon" },
                "delivery": true
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = placed["order_id"].as_str().expect("order id").to_owned();

    let (status, history) = call_json(
        &app,
        TestRequest::get()
            .uri("/api/orders")
            .cookie(customer.clone())
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history[0]["id"], order_id.as_str());
    assert_eq!(history[0]["status"], "pending");
    assert_eq!(history[0]["total"], 10.75);
    assert_eq!(history[0]["custom"]["base"], json!(["Kale"]));

    let (status, sub) = call_json(
        &app,
        TestRequest::post()
            .uri("/api/subscriptions")
            .cookie(customer.clone())
            .set_json(json!({ "plan": "weekly", "salads_per_cycle": 5 }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(sub["sub_id"].as_str().is_some());

    let (status, loyalty) = call_json(
        &app,
        TestRequest::get()
            .uri("/api/loyalty")
            .cookie(customer.clone())
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loyalty, json!({ "points": 40, "salad_streak": 2 }));

    let (status, _) = call_json(
        &app,
        TestRequest::patch()
            .uri(&format!("/api/admin/orders/{order_id}/status"))
            .cookie(customer)
            .set_json(json!({ "status": "prepping" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let chef = sign_in(&app, "chef@example.com", "kitchen").await;
    let (status, advanced) = call_json(
        &app,
        TestRequest::patch()
            .uri(&format!("/api/admin/orders/{order_id}/status"))
            .cookie(chef)
            .set_json(json!({ "status": "prepping" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(advanced["status"], "prepping");
    assert_eq!(shop.store.orders()[0].status.as_str(), "prepping");
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_session(shop: Shop) {
    let app = test::init_service(api_app(shop.store.http_state())).await;
    let cookie = sign_in(&app, "ada@example.com", "s3cret").await;

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cleared = session_cookie(&res).expect("logout rewrites the cookie");

    let (status, body) = call_json(
        &app,
        TestRequest::get()
            .uri("/api/orders")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn errors_carry_a_trace_identifier(shop: Shop) {
    let app = test::init_service(api_app(shop.store.http_state())).await;

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/order")
            .set_json(json!({ "salad_id": shop.salad.id.to_string() }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = test::read_body_json(res).await;
    assert!(header.is_some());
    assert_eq!(body["traceId"].as_str(), header.as_deref());
}
