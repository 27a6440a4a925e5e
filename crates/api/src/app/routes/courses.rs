use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use campus_core::CourseId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::gate::AccessGate;

pub fn router(gate: &AccessGate) -> Router {
    Router::new()
        .route("/", get(list_courses).layer(gate.require("Course", "Index")))
        .route("/", post(create_course).layer(gate.require("Course", "Create")))
        .route("/:id", get(get_course).layer(gate.require("Course", "Edit")))
        .route("/:id", put(edit_course).layer(gate.require("Course", "Edit")))
        .route("/:id", delete(delete_course).layer(gate.require("Course", "Delete")))
}

fn parse_id(id: &str) -> Result<CourseId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid course id"))
}

pub async fn list_courses(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_courses().await {
        Ok(courses) => {
            (StatusCode::OK, Json(serde_json::json!({ "courses": courses }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_course(
    Extension(services): Extension<Arc<AppServices>>,
    Json(request): Json<dto::CourseRequest>,
) -> axum::response::Response {
    match services.create_course(request).await {
        Ok(course) => {
            (StatusCode::CREATED, Json(serde_json::json!({ "course": course }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_course(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.get_course(id).await {
        Ok(course) => {
            (StatusCode::OK, Json(serde_json::json!({ "course": course }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn edit_course(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(request): Json<dto::CourseRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.edit_course(id, request).await {
        Ok(course) => {
            (StatusCode::OK, Json(serde_json::json!({ "course": course }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_course(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.delete_course(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Course deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
