use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use campus_core::StudentId;
use campus_enrollment::StudentDraft;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::gate::AccessGate;

pub fn router(gate: &AccessGate) -> Router {
    Router::new()
        .route("/", get(list_students).layer(gate.require("Student", "Index")))
        .route("/", post(create_student).layer(gate.require("Student", "Create")))
        .route("/:id", get(get_student).layer(gate.require("Student", "Edit")))
        .route("/:id", put(edit_student).layer(gate.require("Student", "Edit")))
        .route("/:id", delete(delete_student).layer(gate.require("Student", "Delete")))
}

fn parse_id(id: &str) -> Result<StudentId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid student id")
    })
}

pub async fn list_students(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_students().await {
        Ok(students) => {
            (StatusCode::OK, Json(serde_json::json!({ "students": students }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_student(
    Extension(services): Extension<Arc<AppServices>>,
    Json(draft): Json<StudentDraft>,
) -> axum::response::Response {
    match services.create_student(draft).await {
        Ok(student) => {
            (StatusCode::CREATED, Json(serde_json::json!({ "student": student }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.get_student(id).await {
        Ok(student) => {
            (StatusCode::OK, Json(serde_json::json!({ "student": student }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn edit_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(draft): Json<StudentDraft>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.edit_student(id, draft).await {
        Ok(student) => {
            (StatusCode::OK, Json(serde_json::json!({ "student": student }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_student(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.delete_student(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Student deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
