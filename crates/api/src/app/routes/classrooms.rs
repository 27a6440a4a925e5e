use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use campus_core::ClassRoomId;
use campus_enrollment::ClassRoomDraft;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::gate::AccessGate;

pub fn router(gate: &AccessGate) -> Router {
    Router::new()
        .route("/", get(list_classrooms).layer(gate.require("ClassRoom", "Index")))
        .route("/", post(create_classroom).layer(gate.require("ClassRoom", "Create")))
        .route("/:id", get(classroom_details).layer(gate.require("ClassRoom", "Details")))
        .route("/:id", put(edit_classroom).layer(gate.require("ClassRoom", "Edit")))
        .route("/:id", delete(delete_classroom).layer(gate.require("ClassRoom", "Delete")))
        .route(
            "/:id/students",
            post(add_student_to_class).layer(gate.require("ClassRoom", "AddStudentToClass")),
        )
}

fn parse_id(id: &str) -> Result<ClassRoomId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid classroom id")
    })
}

pub async fn list_classrooms(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_classrooms().await {
        Ok(classrooms) => (
            StatusCode::OK,
            Json(serde_json::json!({ "classrooms": classrooms })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_classroom(
    Extension(services): Extension<Arc<AppServices>>,
    Json(draft): Json<ClassRoomDraft>,
) -> axum::response::Response {
    match services.create_classroom(draft).await {
        Ok(room) => {
            (StatusCode::CREATED, Json(serde_json::json!({ "classroom": room }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// GET /classrooms/:id - the classroom plus its live students.
pub async fn classroom_details(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.classroom_details(id).await {
        Ok((room, students)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "classroom": room, "students": students })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn edit_classroom(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(draft): Json<ClassRoomDraft>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.edit_classroom(id, draft).await {
        Ok(room) => {
            (StatusCode::OK, Json(serde_json::json!({ "classroom": room }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_classroom(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.delete_classroom(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Class deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// POST /classrooms/:id/students - move an existing student into the class.
pub async fn add_student_to_class(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(request): Json<dto::AddStudentRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match services.add_student_to_class(id, request.student_id).await {
        Ok(student) => {
            (StatusCode::OK, Json(serde_json::json!({ "student": student }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
