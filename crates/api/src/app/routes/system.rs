use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};

use crate::app::errors;
use crate::context::SessionContext;

/// GET /health - liveness probe, open to everyone.
pub async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}

/// GET / - the login surface is the default entry point.
pub async fn root(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    if session.is_authenticated() {
        return axum::response::Redirect::to("/dashboard").into_response();
    }
    errors::redirect_to_login()
}

/// GET /dashboard - landing surface after login. Requires authentication
/// but no specific grant; anonymous callers go back to the login page.
pub async fn dashboard(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    if !session.is_authenticated() {
        return errors::redirect_to_login();
    }

    let data = session.data();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "username": data.username,
            "role": data.role,
        })),
    )
        .into_response()
}
