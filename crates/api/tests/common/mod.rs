#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use clientpulse_api::auth::jwt::{generate_token, Claims, JwtConfig};
use clientpulse_api::config::ServerConfig;
use clientpulse_api::handlers::share_links::SHARE_PASSWORD_HEADER;
use clientpulse_api::router::build_app_router;
use clientpulse_api::state::AppState;

pub const PUBLIC_BASE_URL: &str = "https://pulse.test";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: PUBLIC_BASE_URL.to_string(),
        jwt: JwtConfig {
            secret: "test-identity-secret".to_string(),
            issuer: None,
            leeway_secs: 0,
        },
    }
}

/// The production router over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Identity token for `sub`, with email `{sub}@example.com`.
pub fn token(sub: &str) -> String {
    token_with_role(sub, None)
}

/// Identity token carrying the `staff` role.
pub fn staff_token(sub: &str) -> String {
    token_with_role(sub, Some("staff"))
}

fn token_with_role(sub: &str, role: Option<&str>) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        email: format!("{sub}@example.com"),
        name: Some(format!("User {sub}")),
        picture: None,
        role: role.map(str::to_string),
        exp: now + 3600,
        iat: now,
        iss: None,
    };
    generate_token(&claims, &test_config().jwt).expect("token generation should succeed")
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

/// Anonymous GET carrying a share-link password header.
pub async fn get_shared(app: Router, uri: &str, password: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(SHARE_PASSWORD_HEADER, password)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST and return `data` of a 201 response.
pub async fn create(app: Router, uri: &str, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app, uri, token, body).await;
    assert_eq!(response.status(), 201, "POST {uri} should create");
    body_json(response).await["data"].clone()
}

/// Make sure the user for `sub` exists and return their id.
pub async fn ensure_user(app: Router, sub: &str) -> i64 {
    let response = get_auth(app, "/api/me", &token(sub)).await;
    assert_eq!(response.status(), 200);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a project owned by `owner_sub` and return its id.
pub async fn create_project(app: Router, owner_sub: &str, name: &str) -> i64 {
    let data = create(app, "/api/projects", &token(owner_sub), serde_json::json!({ "name": name })).await;
    data["id"].as_i64().unwrap()
}

/// Add `member_sub` to a project with `role` via the owner's token.
pub async fn add_member(app: Router, project_id: i64, owner_sub: &str, member_sub: &str, role: &str) -> i64 {
    let user_id = ensure_user(app.clone(), member_sub).await;
    create(
        app,
        &format!("/api/projects/{project_id}/members"),
        &token(owner_sub),
        serde_json::json!({ "user_id": user_id, "role": role }),
    )
    .await;
    user_id
}
