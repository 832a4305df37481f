//! Project lifecycle over HTTP: create, list, get, patch, archive, delete,
//! ownership transfer.

mod common;

use axum::http::StatusCode;
use common::{
    add_member, body_json, create_project, delete_auth, ensure_user, get, get_auth,
    patch_json_auth, post_json_auth, token,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_database(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn requests_without_token_are_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/projects").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert_eq!(json["error"]["message"], "You must be signed in.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn forged_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/projects", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_creates_user_on_first_use(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = ensure_user(app.clone(), "u1").await;
    let second = ensure_user(app.clone(), "u1").await;
    assert_eq!(first, second);

    let json = body_json(get_auth(app, "/api/me", &token("u1")).await).await;
    assert_eq!(json["data"]["email"], "u1@example.com");
    assert_eq!(json["data"]["external_id"], "u1");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_user_on_read_is_user_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;

    let response = get_auth(app, &format!("/api/projects/{project_id}"), &token("stranger")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "USER_NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_trims_and_validates(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/projects",
        &token("u1"),
        json!({ "name": "  Launch  ", "description": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Launch");
    assert!(json["data"]["description"].is_null());
    assert_eq!(json["data"]["is_archived"], false);

    let response =
        post_json_auth(app.clone(), "/api/projects", &token("u1"), json!({ "name": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert!(json["error"]["details"]["field_errors"]["name"].is_array());

    let long = "x".repeat(201);
    let response =
        post_json_auth(app, "/api/projects", &token("u1"), json!({ "name": long })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_body_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response =
        post_json_auth(app, "/api/projects", &token("u1"), json!({ "name": 42 })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_reports_role_per_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let own = create_project(app.clone(), "u1", "Mine").await;
    let shared = create_project(app.clone(), "u2", "Theirs").await;
    add_member(app.clone(), shared, "u2", "u1", "VIEWER").await;
    create_project(app.clone(), "u3", "Unrelated").await;

    let json = body_json(get_auth(app, "/api/projects", &token("u1")).await).await;
    let items = json["data"].as_array().unwrap();

    assert_eq!(items.len(), 2);
    // Newest first.
    assert_eq!(items[0]["id"], shared);
    assert_eq!(items[0]["role"], "VIEWER");
    assert_eq!(items[1]["id"], own);
    assert_eq!(items[1]["role"], "OWNER");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_hides_projects_from_non_members(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    ensure_user(app.clone(), "u2").await;

    let response =
        get_auth(app.clone(), &format!("/api/projects/{project_id}"), &token("u2")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"]["message"],
        "Project not found or not accessible."
    );

    let json = body_json(get_auth(app, &format!("/api/projects/{project_id}"), &token("u1")).await).await;
    assert_eq!(json["data"]["role"], "OWNER");
    assert_eq!(json["data"]["name"], "Demo");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn patch_null_description_clears_it(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project = common::create(
        app.clone(),
        "/api/projects",
        &token("u1"),
        json!({ "name": "Demo", "description": "First draft" }),
    )
    .await;
    let uri = format!("/api/projects/{}", project["id"]);

    let response =
        patch_json_auth(app.clone(), &uri, &token("u1"), json!({ "name": "Renamed" })).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Renamed");
    assert_eq!(json["data"]["description"], "First draft");

    let response =
        patch_json_auth(app.clone(), &uri, &token("u1"), json!({ "description": null })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["description"].is_null());
    assert_eq!(json["data"]["name"], "Renamed");

    let too_long = "d".repeat(2001);
    let response =
        patch_json_auth(app, &uri, &token("u1"), json!({ "description": too_long })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_owner_may_patch(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    add_member(app.clone(), project_id, "u1", "u2", "EDITOR").await;

    let uri = format!("/api/projects/{project_id}");

    let response =
        patch_json_auth(app.clone(), &uri, &token("u2"), json!({ "name": "Hijacked" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get_auth(app, &uri, &token("u1")).await).await;
    assert_eq!(json["data"]["name"], "Demo");
}

/// Demo: viewer cannot archive, owner can, archived project cannot change hands.
#[sqlx::test(migrations = "../db/migrations")]
async fn demo_archive_then_transfer_is_bad_state(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    let u1 = ensure_user(app.clone(), "u1").await;
    let u2 = add_member(app.clone(), project_id, "u1", "u2", "VIEWER").await;
    let uri = format!("/api/projects/{project_id}");

    let response = delete_auth(app.clone(), &uri, &token("u2")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"]["code"], "FORBIDDEN");

    let response = delete_auth(app.clone(), &uri, &token("u1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], project_id);
    assert_eq!(json["data"]["is_archived"], true);

    let response = post_json_auth(
        app.clone(),
        &format!("{uri}/transfer-ownership"),
        &token("u1"),
        json!({ "target_user_id": u2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "BAD_STATE");
    assert_eq!(
        json["error"]["message"],
        "Cannot transfer ownership of an archived project."
    );

    let json = body_json(get_auth(app, &uri, &token("u1")).await).await;
    assert_eq!(json["data"]["owner_id"], u1);
    assert_eq!(json["data"]["is_archived"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn archived_project_can_be_restored(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    let uri = format!("/api/projects/{project_id}");

    delete_auth(app.clone(), &uri, &token("u1")).await;
    let response =
        patch_json_auth(app, &uri, &token("u1"), json!({ "is_archived": false })).await;

    assert_eq!(body_json(response).await["data"]["is_archived"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn transfer_checks_run_in_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    let u1 = ensure_user(app.clone(), "u1").await;
    let outsider = ensure_user(app.clone(), "u3").await;
    let u2 = add_member(app.clone(), project_id, "u1", "u2", "EDITOR").await;
    let uri = format!("/api/projects/{project_id}/transfer-ownership");

    let response =
        post_json_auth(app.clone(), &uri, &token("u2"), json!({ "target_user_id": u2 })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response =
        post_json_auth(app.clone(), &uri, &token("u1"), json!({ "target_user_id": u1 })).await;
    assert_eq!(body_json(response).await["error"]["code"], "INVALID_TARGET");

    let response =
        post_json_auth(app.clone(), &uri, &token("u1"), json!({ "target_user_id": 999_999 }))
            .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        app.clone(),
        &uri,
        &token("u1"),
        json!({ "target_user_id": outsider }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response =
        post_json_auth(app.clone(), "/api/projects/999999/transfer-ownership", &token("u1"), json!({ "target_user_id": u2 }))
            .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn transfer_demotes_previous_owner_to_editor(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    let u2 = add_member(app.clone(), project_id, "u1", "u2", "VIEWER").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/projects/{project_id}/transfer-ownership"),
        &token("u1"),
        json!({ "target_user_id": u2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["owner_id"], u2);

    let json = body_json(get_auth(app.clone(), "/api/projects", &token("u1")).await).await;
    assert_eq!(json["data"][0]["role"], "EDITOR");
    let json = body_json(get_auth(app, "/api/projects", &token("u2")).await).await;
    assert_eq!(json["data"][0]["role"], "OWNER");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn permanent_delete_removes_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    add_member(app.clone(), project_id, "u1", "u2", "EDITOR").await;
    let update = common::create(
        app.clone(),
        &format!("/api/projects/{project_id}/updates"),
        &token("u1"),
        json!({ "title": "Kickoff", "body_md": "Hello" }),
    )
    .await;
    let delete_uri = format!("/api/projects/{project_id}/delete");

    let response = post_json_auth(app.clone(), &delete_uri, &token("u2"), json!({})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(app.clone(), &delete_uri, &token("u1"), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["deleted"], true);

    let response =
        get_auth(app.clone(), &format!("/api/projects/{project_id}"), &token("u1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, &format!("/api/updates/{}", update["id"]), &token("u1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
