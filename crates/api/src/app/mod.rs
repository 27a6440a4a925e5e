//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring and the record lifecycle operations
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs that need API-side resolution
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use campus_auth::PermissionTable;
use campus_infra::seed_default_admin;

use crate::config::Config;
use crate::gate::AccessGate;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests). Seeds the default admin on an empty account store.
pub async fn build_app(config: Config) -> anyhow::Result<Router> {
    let services = Arc::new(services::AppServices::in_memory(config.session_idle));
    build_app_with(services, &config.admin_password).await
}

/// Wiring over caller-supplied services (alternate store backends, tests).
pub async fn build_app_with(
    services: Arc<services::AppServices>,
    admin_password: &str,
) -> anyhow::Result<Router> {
    seed_default_admin(
        services.accounts.as_ref(),
        services.verifier.as_ref(),
        admin_password,
    )
    .await?;

    let gate = AccessGate::new(Arc::new(PermissionTable::defaults()));
    let session_state = middleware::SessionState {
        sessions: services.sessions.clone(),
    };

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(&gate))
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            session_state,
            middleware::session_middleware,
        )))
}
