use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use campus_core::TeacherId;
use campus_enrollment::TeacherProfileDraft;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::gate::AccessGate;

pub fn router(gate: &AccessGate) -> Router {
    Router::new()
        .route("/", get(list_teachers).layer(gate.require("Teacher", "Index")))
        .route("/", post(create_teacher).layer(gate.require("Teacher", "Create")))
        .route("/:id", get(get_teacher).layer(gate.require("Teacher", "Edit")))
        .route("/:id", put(edit_teacher).layer(gate.require("Teacher", "Edit")))
        .route("/:id", delete(delete_teacher).layer(gate.require("Teacher", "Delete")))
}

fn parse_id(id: &str) -> Result<TeacherId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid teacher id")
    })
}

pub async fn list_teachers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_teachers().await {
        Ok(teachers) => {
            (StatusCode::OK, Json(serde_json::json!({ "teachers": teachers }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_teacher(
    Extension(services): Extension<Arc<AppServices>>,
    Json(draft): Json<TeacherProfileDraft>,
) -> axum::response::Response {
    match services.create_teacher(draft).await {
        Ok(teacher) => {
            (StatusCode::CREATED, Json(serde_json::json!({ "teacher": teacher }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_teacher(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.get_teacher(id).await {
        Ok(teacher) => {
            (StatusCode::OK, Json(serde_json::json!({ "teacher": teacher }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn edit_teacher(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(draft): Json<TeacherProfileDraft>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.edit_teacher(id, draft).await {
        Ok(teacher) => {
            (StatusCode::OK, Json(serde_json::json!({ "teacher": teacher }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_teacher(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.delete_teacher(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Teacher deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
