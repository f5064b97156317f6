//! Session login and logout handlers.
//!
//! ```text
//! POST /api/login {"email":"ada@example.com","password":"s3cret"}
//! POST /api/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(%user_id, "session established");
    Ok(HttpResponse::Ok().finish())
}

/// Drop the session cookie.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::test_support::{InMemoryRecordStore, login_request, session_cookie};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case("   ", "pw", "email must not be empty", "empty_email")]
    #[case("ada@example.com", "", "password must not be empty", "empty_password")]
    #[actix_web::test]
    async fn blank_credentials_are_rejected(
        #[case] email: &str,
        #[case] password: &str,
        #[case] message: &str,
        #[case] code: &str,
    ) {
        let store = InMemoryRecordStore::new();
        let app = actix_test::init_service(crate::test_support::api_app(store.http_state())).await;

        let res = actix_test::call_service(&app, login_request(email, password).to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], message);
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], code);
    }

    #[rstest]
    #[case("ada@example.com", "wrong")]
    #[case("nobody@example.com", "s3cret")]
    #[actix_web::test]
    async fn bad_credentials_are_unauthorised(#[case] email: &str, #[case] password: &str) {
        let store = InMemoryRecordStore::new();
        store.seed_user("ada@example.com", "s3cret", Role::Customer);
        let app = actix_test::init_service(crate::test_support::api_app(store.http_state())).await;

        let res = actix_test::call_service(&app, login_request(email, password).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(session_cookie(&res).is_none());
    }

    #[actix_web::test]
    async fn login_sets_and_logout_clears_the_cookie() {
        let store = InMemoryRecordStore::new();
        store.seed_user("ada@example.com", "s3cret", Role::Customer);
        let app = actix_test::init_service(crate::test_support::api_app(store.http_state())).await;

        let res = actix_test::call_service(
            &app,
            login_request("Ada@Example.com", "s3cret").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res).expect("session cookie");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cleared = session_cookie(&res).expect("removal cookie");
        assert_eq!(cleared.value(), "");
    }

    #[rstest]
    #[case("ada@example.com")]
    #[case("ADA@EXAMPLE.COM")]
    #[case("Ada@Example.com")]
    #[actix_web::test]
    async fn mixed_case_stored_emails_still_log_in(#[case] typed: &str) {
        let store = InMemoryRecordStore::new();
        let user = store.seed_user("Ada@Example.com", "s3cret", Role::Customer);
        let app = actix_test::init_service(crate::test_support::api_app(store.http_state())).await;

        let res = actix_test::call_service(&app, login_request(typed, "s3cret").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(session_cookie(&res).is_some());
        assert_eq!(user.email, "Ada@Example.com");
    }

    #[actix_web::test]
    async fn unknown_fields_are_rejected_as_invalid_requests() {
        let store = InMemoryRecordStore::new();
        let app = actix_test::init_service(crate::test_support::api_app(store.http_state())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "username": "ada", "password": "pw" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "malformed_body");
    }
}
