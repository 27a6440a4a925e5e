//! Login, logout, and registration surfaces.
//!
//! These are deliberately outside the access gate: anyone may attempt a
//! login or a registration, and logout must work whatever the session
//! state. Entry points redirect already-authenticated callers to the
//! dashboard instead of re-prompting.

use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use campus_accounts::Registration;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;
use crate::middleware::SESSION_COOKIE;

pub fn router() -> Router {
    Router::new()
        .route("/login", get(login_page))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/register", get(register_page))
        .route("/register", post(register))
}

/// GET /login
pub async fn login_page(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    if session.is_authenticated() {
        return Redirect::to("/dashboard").into_response();
    }
    (
        StatusCode::OK,
        Json(serde_json::json!({ "login": "submit email and password" })),
    )
        .into_response()
}

/// POST /login
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.login(&body.email, &body.password).await {
        Ok((token, data)) => {
            let mut response = (
                StatusCode::OK,
                Json(serde_json::json!({
                    "username": data.username,
                    "role": data.role,
                })),
            )
                .into_response();
            set_session_cookie(&mut response, &token);
            response
        }
        Err(e) => errors::login_error_to_response(e),
    }
}

/// POST /logout
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    if let Some(token) = session.token() {
        services.logout(token).await;
    }

    let mut response = Redirect::to("/login").into_response();
    clear_session_cookie(&mut response);
    response
}

/// GET /register
pub async fn register_page(
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    if session.is_authenticated() {
        return Redirect::to("/dashboard").into_response();
    }
    (
        StatusCode::OK,
        Json(serde_json::json!({ "register": "submit the registration form" })),
    )
        .into_response()
}

/// POST /register
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(form): Json<Registration>,
) -> axum::response::Response {
    match services.register(form).await {
        Ok(account_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "id": account_id,
                "message": "Registration successful! You can now login.",
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

fn set_session_cookie(response: &mut axum::response::Response, token: &str) {
    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
}

fn clear_session_cookie(response: &mut axum::response::Response) {
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
}
