use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use nots_pmh_backend::middleware::auth::require_bearer_auth;
use nots_pmh_backend::utils::token::{issue_token, Claims};

const SECRET: &str = "test_secret_key";

fn setup() {
    std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    std::env::set_var("DATABASE_URL", "postgres://localhost/unused");
    std::env::set_var("JWT_SECRET", SECRET);
    let _ = nots_pmh_backend::config::init_config();
}

async fn whoami(Extension(claims): Extension<Claims>) -> Json<serde_json::Value> {
    Json(json!({ "role": claims.role, "email": claims.email }))
}

fn gated_router() -> Router {
    Router::new()
        .route("/protected", get(whoami))
        .layer(middleware::from_fn(require_bearer_auth))
}

#[tokio::test]
async fn missing_token_is_401() {
    setup();
    let res = gated_router()
        .oneshot(Request::get("/protected").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_is_401() {
    setup();
    let res = gated_router()
        .oneshot(
            Request::get("/protected")
                .header("Authorization", "Basic dXNlcjpwdw==")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_401() {
    setup();
    let res = gated_router()
        .oneshot(
            Request::get("/protected")
                .header("Authorization", "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_401() {
    setup();
    let token = issue_token(SECRET, Uuid::new_v4(), "ops@example.com", "operations", -1).unwrap();
    let res = gated_router()
        .oneshot(
            Request::get("/protected")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_401() {
    setup();
    let token = issue_token("other_secret", Uuid::new_v4(), "ops@example.com", "admin", 8).unwrap();
    let res = gated_router()
        .oneshot(
            Request::get("/protected")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_reaches_handler_with_claims() {
    setup();
    let token = issue_token(SECRET, Uuid::new_v4(), "ops@example.com", "operations", 8).unwrap();
    let res = gated_router()
        .oneshot(
            Request::get("/protected")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["role"], "operations");
    assert_eq!(body["email"], "ops@example.com");
}
