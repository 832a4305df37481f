//! Hand-maintained OpenAPI 3.0 description of the `/api` surface.

use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

/// GET /api/swagger
///
/// The server URL follows the request's `Host` (and `X-Forwarded-Proto`)
/// so the document is usable behind a proxy.
pub async fn swagger(headers: HeaderMap) -> Json<Value> {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost:3000");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    Json(document(&format!("{scheme}://{host}/api")))
}

fn op(summary: &str, tag: &str) -> Value {
    json!({
        "summary": summary,
        "tags": [tag],
        "security": [{ "bearerAuth": [] }],
        "responses": {
            "200": { "$ref": "#/components/responses/Data" },
            "default": { "$ref": "#/components/responses/Error" }
        }
    })
}

fn public_op(summary: &str, tag: &str) -> Value {
    let mut value = op(summary, tag);
    value["security"] = json!([]);
    value
}

fn with_body(mut value: Value, schema: &str) -> Value {
    value["requestBody"] = json!({
        "required": true,
        "content": { "application/json": { "schema": { "$ref": format!("#/components/schemas/{schema}") } } }
    });
    value
}

fn path_param(name: &str) -> Value {
    json!({ "name": name, "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } })
}

fn query_param(name: &str, ty: &str) -> Value {
    json!({ "name": name, "in": "query", "required": false, "schema": { "type": ty } })
}

/// The full document for a given server URL.
pub fn document(server_url: &str) -> Value {
    let id = path_param("id");
    let mut list_waitlist = op("List waitlist entries (staff)", "waitlist");
    list_waitlist["parameters"] = json!([
        query_param("status", "string"),
        query_param("search", "string"),
        query_param("limit", "integer")
    ]);

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "ClientPulse API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Project updates, collaborators and public share links."
        },
        "servers": [{ "url": server_url }],
        "paths": {
            "/me": { "get": op("Resolve the calling user", "users") },
            "/projects": {
                "get": op("List projects owned or joined", "projects"),
                "post": with_body(op("Create a project", "projects"), "CreateProject")
            },
            "/projects/{id}": {
                "parameters": [id.clone()],
                "get": op("Get a project", "projects"),
                "patch": with_body(op("Update a project (owner)", "projects"), "UpdateProject"),
                "delete": op("Archive a project (owner)", "projects")
            },
            "/projects/{id}/delete": {
                "parameters": [id.clone()],
                "post": op("Permanently delete a project (owner)", "projects")
            },
            "/projects/{id}/transfer-ownership": {
                "parameters": [id.clone()],
                "post": with_body(op("Transfer ownership to a collaborator", "projects"), "TransferOwnership")
            },
            "/projects/{id}/members": {
                "parameters": [id.clone()],
                "get": op("List members", "members"),
                "post": with_body(op("Add a member (owner)", "members"), "AddMember")
            },
            "/projects/{id}/members/search": {
                "parameters": [id.clone(), query_param("q", "string"), query_param("limit", "integer")],
                "get": op("Search collaborator candidates (owner)", "members")
            },
            "/projects/{id}/members/{user_id}": {
                "parameters": [id.clone(), path_param("user_id")],
                "patch": with_body(op("Change a member's role (owner)", "members"), "UpdateMemberRole"),
                "delete": op("Remove a member (owner)", "members")
            },
            "/projects/{id}/updates": {
                "parameters": [
                    id.clone(),
                    query_param("status", "string"),
                    query_param("tags", "string"),
                    query_param("page", "integer"),
                    query_param("pageSize", "integer")
                ],
                "get": op("List updates", "updates"),
                "post": with_body(op("Post an update", "updates"), "CreateUpdate")
            },
            "/updates/{id}": {
                "parameters": [id.clone()],
                "get": op("Get an update", "updates"),
                "patch": with_body(op("Edit an update", "updates"), "EditUpdate"),
                "delete": op("Delete an update", "updates")
            },
            "/projects/{id}/share-links": {
                "parameters": [id.clone()],
                "get": op("List share links", "share"),
                "post": with_body(op("Create a share link (owner or editor)", "share"), "CreateShareLink")
            },
            "/share-links/{id}": {
                "parameters": [id.clone()],
                "patch": with_body(op("Update a share link (owner or editor)", "share"), "UpdateShareLink"),
                "delete": op("Delete a share link (owner or editor)", "share")
            },
            "/share/{slug}": {
                "parameters": [
                    { "name": "slug", "in": "path", "required": true, "schema": { "type": "string" } },
                    {
                        "name": "x-share-password",
                        "in": "header",
                        "required": false,
                        "schema": { "type": "string" }
                    },
                    query_param("page", "integer"),
                    query_param("pageSize", "integer")
                ],
                "get": public_op("Public share view", "share")
            },
            "/projects/{id}/clients": {
                "parameters": [id.clone()],
                "get": op("List project clients", "clients"),
                "post": with_body(op("Add a client (owner)", "clients"), "CreateProjectClient")
            },
            "/projects/{id}/clients/search": {
                "parameters": [id.clone(), query_param("q", "string"), query_param("limit", "integer")],
                "get": op("Search the owner's contacts (owner)", "clients")
            },
            "/projects/{id}/clients/{access_id}": {
                "parameters": [id.clone(), path_param("access_id")],
                "patch": with_body(op("Update client access (owner)", "clients"), "UpdateClientAccess"),
                "delete": op("Remove client access (owner)", "clients")
            },
            "/waitlist": {
                "get": list_waitlist,
                "post": with_body(public_op("Join the waitlist", "waitlist"), "CreateWaitlistEntry")
            },
            "/waitlist/{id}": {
                "parameters": [id.clone()],
                "get": op("Waitlist entry with its events (staff)", "waitlist")
            },
            "/waitlist/{id}/status": {
                "parameters": [id.clone()],
                "patch": with_body(op("Change waitlist status (staff)", "waitlist"), "UpdateWaitlistStatus")
            }
        },
        "components": components()
    })
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn components() -> Value {
    let string = json!({ "type": "string" });
    let nullable_string = json!({ "type": "string", "nullable": true });
    let tags = json!({ "type": "array", "items": { "type": "string" } });
    json!({
        "securitySchemes": {
            "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
        },
        "responses": {
            "Data": {
                "description": "Success envelope",
                "content": { "application/json": { "schema": {
                    "type": "object",
                    "properties": { "data": {} },
                    "required": ["data"]
                } } }
            },
            "Error": {
                "description": "Error envelope",
                "content": { "application/json": { "schema": schema_ref("ErrorEnvelope") } }
            }
        },
        "schemas": {
            "ErrorEnvelope": {
                "type": "object",
                "properties": {
                    "error": {
                        "type": "object",
                        "properties": {
                            "code": {
                                "type": "string",
                                "enum": [
                                    "UNAUTHORIZED", "USER_NOT_FOUND", "NOT_FOUND", "FORBIDDEN",
                                    "VALIDATION_ERROR", "BAD_REQUEST", "CONFLICT",
                                    "INVALID_TARGET", "BAD_STATE", "INTERNAL"
                                ]
                            },
                            "message": string,
                            "details": { "type": "object" }
                        },
                        "required": ["code", "message"]
                    }
                }
            },
            "CreateProject": {
                "type": "object",
                "properties": { "name": string, "description": nullable_string },
                "required": ["name"]
            },
            "UpdateProject": {
                "type": "object",
                "properties": {
                    "name": string,
                    "description": nullable_string,
                    "is_archived": { "type": "boolean" }
                }
            },
            "TransferOwnership": {
                "type": "object",
                "properties": { "target_user_id": { "type": "integer", "format": "int64" } },
                "required": ["target_user_id"]
            },
            "AddMember": {
                "type": "object",
                "properties": {
                    "user_id": { "type": "integer", "format": "int64" },
                    "email": string,
                    "role": { "type": "string", "enum": ["EDITOR", "VIEWER"] }
                },
                "required": ["role"]
            },
            "UpdateMemberRole": {
                "type": "object",
                "properties": { "role": { "type": "string", "enum": ["EDITOR", "VIEWER"] } },
                "required": ["role"]
            },
            "CreateUpdate": {
                "type": "object",
                "properties": {
                    "title": string,
                    "body_md": string,
                    "tags": tags,
                    "status": { "type": "string", "enum": ["DRAFT", "PUBLISHED", "ARCHIVED"] }
                },
                "required": ["title", "body_md"]
            },
            "EditUpdate": {
                "type": "object",
                "properties": {
                    "title": string,
                    "body_md": string,
                    "tags": tags,
                    "status": { "type": "string", "enum": ["DRAFT", "PUBLISHED", "ARCHIVED"] }
                }
            },
            "CreateShareLink": {
                "type": "object",
                "properties": {
                    "slug": string,
                    "visibility": { "type": "string", "enum": ["ALL", "PUBLISHED_ONLY"] },
                    "tag_filter": tags,
                    "password": string
                }
            },
            "UpdateShareLink": {
                "type": "object",
                "properties": {
                    "enabled": { "type": "boolean" },
                    "visibility": { "type": "string", "enum": ["ALL", "PUBLISHED_ONLY"] },
                    "tag_filter": tags,
                    "password": nullable_string,
                    "slug": string,
                    "regenerate_slug": { "type": "boolean" }
                }
            },
            "CreateProjectClient": {
                "type": "object",
                "properties": { "email": string, "name": string, "tags": tags },
                "required": ["email"]
            },
            "UpdateClientAccess": {
                "type": "object",
                "properties": {
                    "status": { "type": "string", "enum": ["PENDING", "ACTIVE", "INACTIVE", "REVOKED"] },
                    "tags": tags
                }
            },
            "CreateWaitlistEntry": {
                "type": "object",
                "properties": {
                    "email": string,
                    "full_name": string,
                    "company": string,
                    "goals": string,
                    "source": string,
                    "notes": string,
                    "metadata": { "type": "object" }
                },
                "required": ["email", "full_name"]
            },
            "UpdateWaitlistStatus": {
                "type": "object",
                "properties": {
                    "status": { "type": "string", "enum": ["PENDING", "ENGAGED", "CONVERTED", "OPTED_OUT"] },
                    "notes": string
                },
                "required": ["status"]
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = document("http://example.test/api");
        assert_eq!(doc["openapi"], "3.0.3");
        assert_eq!(doc["servers"][0]["url"], "http://example.test/api");
        for path in ["/projects", "/updates/{id}", "/share/{slug}", "/waitlist", "/projects/{id}/clients"] {
            assert!(doc["paths"].get(path).is_some(), "missing {path}");
        }
    }

    #[test]
    fn public_operations_drop_security() {
        let doc = document("http://example.test/api");
        assert_eq!(doc["paths"]["/share/{slug}"]["get"]["security"], json!([]));
        let share_params = doc["paths"]["/share/{slug}"]["parameters"].as_array().unwrap();
        assert!(share_params
            .iter()
            .any(|p| p["name"] == "x-share-password" && p["in"] == "header"));
        assert!(share_params.iter().all(|p| p["name"] != "password"));
        assert_eq!(doc["paths"]["/waitlist"]["post"]["security"], json!([]));
        assert!(doc["paths"]["/waitlist"]["get"]["parameters"].is_array());
    }
}
