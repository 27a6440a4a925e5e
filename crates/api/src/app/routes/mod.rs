use axum::{Router, routing::get};

use crate::gate::AccessGate;

pub mod auth;
pub mod categories;
pub mod classrooms;
pub mod courses;
pub mod students;
pub mod system;
pub mod teachers;

/// Router for everything behind the session middleware. Each gated route
/// declares its (resource, action) pair here; the auth surfaces stay open.
pub fn router(gate: &AccessGate) -> Router {
    Router::new()
        .merge(auth::router())
        .route("/", get(system::root))
        .route("/dashboard", get(system::dashboard))
        .nest("/categories", categories::router(gate))
        .nest("/courses", courses::router(gate))
        .nest("/classrooms", classrooms::router(gate))
        .nest("/students", students::router(gate))
        .nest("/teachers", teachers::router(gate))
}
