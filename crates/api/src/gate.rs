//! The access gate: role-based authorization enforced before dispatch.
//!
//! Every gated route declares its required (resource, action) pair at router
//! construction via [`AccessGate::require`]; the returned layer is the
//! single enforcement point. A denied request is answered with a redirect to
//! the login surface and the inner service is never constructed into the
//! call path, so no side effect of the operation can run — listings
//! included.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tower::{Layer, Service};

use campus_auth::PermissionTable;

use crate::app::errors;
use crate::context::SessionContext;

/// Shared, read-only authorization policy.
///
/// Built once at startup from the static permission table and cloned into
/// every route layer; never mutated afterwards.
#[derive(Clone)]
pub struct AccessGate {
    table: Arc<PermissionTable>,
}

impl AccessGate {
    pub fn new(table: Arc<PermissionTable>) -> Self {
        Self { table }
    }

    /// Declare the (resource, action) pair a route requires.
    pub fn require(&self, resource: &'static str, action: &'static str) -> RequireAction {
        RequireAction {
            table: self.table.clone(),
            resource,
            action,
        }
    }
}

/// Layer produced by [`AccessGate::require`].
#[derive(Clone)]
pub struct RequireAction {
    table: Arc<PermissionTable>,
    resource: &'static str,
    action: &'static str,
}

impl<S> Layer<S> for RequireAction {
    type Service = Gatekeeper<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Gatekeeper {
            inner,
            table: self.table.clone(),
            resource: self.resource,
            action: self.action,
        }
    }
}

/// The enforcement service wrapping one route.
#[derive(Clone)]
pub struct Gatekeeper<S> {
    inner: S,
    table: Arc<PermissionTable>,
    resource: &'static str,
    action: &'static str,
}

impl<S> Service<Request<Body>> for Gatekeeper<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        // Decide before the inner service is touched; anonymous callers and
        // callers whose role lacks the grant never reach the handler.
        let role = req
            .extensions()
            .get::<SessionContext>()
            .map(|ctx| ctx.role_name().to_string())
            .unwrap_or_default();

        let allowed =
            !role.is_empty() && self.table.can_perform_action(&role, self.resource, self.action);

        if !allowed {
            return Box::pin(async move { Ok(errors::redirect_to_login()) });
        }

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(req).await })
    }
}
