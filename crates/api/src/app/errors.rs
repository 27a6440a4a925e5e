//! Consistent error responses.
//!
//! Every domain failure is converted here, at the operation boundary; none
//! escapes a handler as a fault. Denials redirect without leaking which
//! grant was missing, and storage failures collapse to one generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use serde_json::json;

use campus_core::DomainError;

use crate::app::services::LoginError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Outcome for every gate denial and for gated surfaces hit anonymously.
pub fn redirect_to_login() -> axum::response::Response {
    Redirect::to("/login").into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(fields) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({
                "error": "validation_failed",
                "fields": fields,
            })),
        )
            .into_response(),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::InUse(msg) => json_error(StatusCode::CONFLICT, "in_use", msg),
        DomainError::Duplicate(field) => {
            json_error(StatusCode::CONFLICT, "duplicate", format!("duplicate {field}"))
        }
        DomainError::Storage(detail) => {
            tracing::error!(error = %detail, "storage failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                "the operation could not be completed, please try again",
            )
        }
    }
}

pub fn login_error_to_response(err: LoginError) -> axum::response::Response {
    match err {
        // One uniform message: unknown email and wrong password are
        // indistinguishable from the outside.
        LoginError::InvalidCredentials => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "Invalid email or password",
        ),
        LoginError::Domain(e) => domain_error_to_response(e),
    }
}
