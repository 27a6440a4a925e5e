use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use campus_catalog::CategoryDraft;
use campus_core::CategoryId;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::gate::AccessGate;

pub fn router(gate: &AccessGate) -> Router {
    Router::new()
        .route("/", get(list_categories).layer(gate.require("Category", "Index")))
        .route("/", post(create_category).layer(gate.require("Category", "Create")))
        .route("/:id", get(get_category).layer(gate.require("Category", "Edit")))
        .route("/:id", put(edit_category).layer(gate.require("Category", "Edit")))
        .route("/:id", delete(delete_category).layer(gate.require("Category", "Delete")))
}

fn parse_id(id: &str) -> Result<CategoryId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id")
    })
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_categories().await {
        Ok(categories) => (
            StatusCode::OK,
            Json(serde_json::json!({ "categories": categories })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Json(draft): Json<CategoryDraft>,
) -> axum::response::Response {
    match services.create_category(draft).await {
        Ok(category) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "category": category })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.get_category(id).await {
        Ok(category) => {
            (StatusCode::OK, Json(serde_json::json!({ "category": category }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn edit_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(draft): Json<CategoryDraft>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.edit_category(id, draft).await {
        Ok(category) => {
            (StatusCode::OK, Json(serde_json::json!({ "category": category }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.delete_category(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Category deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
