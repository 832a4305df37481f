//! Collaborator management over HTTP.

mod common;

use axum::http::StatusCode;
use common::{
    add_member, body_json, create_project, delete_auth, ensure_user, get_auth, patch_json_auth,
    post_json_auth, token,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn members_list_owner_first_with_viewer_flags(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    let u1 = ensure_user(app.clone(), "u1").await;
    let u2 = add_member(app.clone(), project_id, "u1", "u2", "EDITOR").await;
    let u3 = add_member(app.clone(), project_id, "u1", "u3", "VIEWER").await;
    let uri = format!("/api/projects/{project_id}/members");

    let json = body_json(get_auth(app.clone(), &uri, &token("u1")).await).await;
    let members = json["data"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 3);
    assert_eq!(members[0]["user_id"], u1);
    assert_eq!(members[0]["role"], "OWNER");
    assert_eq!(members[1]["user_id"], u2);
    assert_eq!(members[1]["role"], "EDITOR");
    assert_eq!(members[2]["user_id"], u3);
    assert_eq!(json["data"]["viewer"]["role"], "OWNER");
    assert_eq!(json["data"]["viewer"]["can_manage"], true);

    let json = body_json(get_auth(app, &uri, &token("u3")).await).await;
    assert_eq!(json["data"]["viewer"]["role"], "VIEWER");
    assert_eq!(json["data"]["viewer"]["can_manage"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_members_cannot_list_members(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    ensure_user(app.clone(), "u9").await;

    let response =
        get_auth(app, &format!("/api/projects/{project_id}/members"), &token("u9")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_member_by_email_is_case_insensitive(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    let u2 = ensure_user(app.clone(), "u2").await;

    let response = post_json_auth(
        app,
        &format!("/api/projects/{project_id}/members"),
        &token("u1"),
        json!({ "email": "  U2@Example.COM ", "role": "VIEWER" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], u2);
    assert_eq!(json["data"]["role"], "VIEWER");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_member_input_errors(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    let u1 = ensure_user(app.clone(), "u1").await;
    let uri = format!("/api/projects/{project_id}/members");

    let response =
        post_json_auth(app.clone(), &uri, &token("u1"), json!({ "role": "EDITOR" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"]["details"]["field_errors"]["email"][0],
        "A user identifier (id or email) is required."
    );

    let response = post_json_auth(
        app.clone(),
        &uri,
        &token("u1"),
        json!({ "email": "nobody@example.com", "role": "EDITOR" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["message"], "Target user not found.");

    let response = post_json_auth(
        app.clone(),
        &uri,
        &token("u1"),
        json!({ "user_id": u1, "role": "EDITOR" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INVALID_TARGET");
    assert_eq!(json["error"]["message"], "Project owner already has full access.");

    let response = post_json_auth(
        app,
        &uri,
        &token("u1"),
        json!({ "email": "u1@example.com", "role": "OWNER" }),
    )
    .await;
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_owner_manages_members(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    add_member(app.clone(), project_id, "u1", "u2", "EDITOR").await;
    let u3 = ensure_user(app.clone(), "u3").await;

    let response = post_json_auth(
        app,
        &format!("/api/projects/{project_id}/members"),
        &token("u2"),
        json!({ "user_id": u3, "role": "VIEWER" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"]["message"],
        "Only the owner can manage members."
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_role_and_remove(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    let u1 = ensure_user(app.clone(), "u1").await;
    let u2 = add_member(app.clone(), project_id, "u1", "u2", "VIEWER").await;
    let u3 = ensure_user(app.clone(), "u3").await;
    let base = format!("/api/projects/{project_id}/members");

    let response = patch_json_auth(
        app.clone(),
        &format!("{base}/{u2}"),
        &token("u1"),
        json!({ "role": "EDITOR" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "EDITOR");

    let response = patch_json_auth(
        app.clone(),
        &format!("{base}/{u1}"),
        &token("u1"),
        json!({ "role": "VIEWER" }),
    )
    .await;
    assert_eq!(body_json(response).await["error"]["code"], "INVALID_TARGET");

    let response = patch_json_auth(
        app.clone(),
        &format!("{base}/{u3}"),
        &token("u1"),
        json!({ "role": "VIEWER" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &format!("{base}/{u2}"), &token("u1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["removed"], true);

    let response = delete_auth(app.clone(), &format!("{base}/{u2}"), &token("u1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, &format!("/api/projects/{project_id}"), &token("u2")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn candidate_search_excludes_owner_and_members(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(app.clone(), "u1", "Demo").await;
    add_member(app.clone(), project_id, "u1", "u2", "EDITOR").await;
    let u3 = ensure_user(app.clone(), "u3").await;
    let u4 = ensure_user(app.clone(), "u4").await;
    let base = format!("/api/projects/{project_id}/members/search");

    let json = body_json(get_auth(app.clone(), &format!("{base}?q=EXAMPLE"), &token("u1")).await).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![u3, u4]);

    let json = body_json(get_auth(app.clone(), &format!("{base}?q=example&limit=1"), &token("u1")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get_auth(app.clone(), &format!("{base}?q=%20%20"), &token("u1")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(app, &format!("{base}?q=example"), &token("u2")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
