use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use campus_infra::SessionStore;

use crate::context::SessionContext;

/// Cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "sid";

#[derive(Clone)]
pub struct SessionState {
    pub sessions: Arc<dyn SessionStore>,
}

/// Resolve the caller's session and attach it to the request.
///
/// Never rejects: an absent, unknown, or idle-expired token simply resolves
/// to the anonymous state, and it is the access gate's job to turn that into
/// a redirect on gated routes.
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = match extract_session_token(req.headers()) {
        Some(token) => match state.sessions.get(&token).await {
            Some(data) => SessionContext::new(token, data),
            None => SessionContext::anonymous(),
        },
        None => SessionContext::anonymous(),
    };

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;

    for pair in header.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if name == SESSION_COOKIE && !value.is_empty() {
            return Some(value.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_str(cookie).unwrap(),
        );
        headers
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let h = headers("theme=dark; sid=abc123; lang=en");
        assert_eq!(extract_session_token(&h).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_or_empty_token_reads_as_none() {
        assert_eq!(extract_session_token(&HeaderMap::new()), None);
        assert_eq!(extract_session_token(&headers("sid=")), None);
        assert_eq!(extract_session_token(&headers("side=abc")), None);
    }
}
