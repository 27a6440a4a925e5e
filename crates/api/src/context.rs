use campus_auth::SessionData;

/// Session context for a request, inserted by the session middleware.
///
/// Present on every request: gated routes read the role from here, the auth
/// routes read the token to clear it on logout. Absent or expired client
/// tokens resolve to the anonymous state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    token: Option<String>,
    data: SessionData,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self {
            token: None,
            data: SessionData::anonymous(),
        }
    }

    pub fn new(token: String, data: SessionData) -> Self {
        Self {
            token: Some(token),
            data,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.is_authenticated()
    }

    /// Role name for gate evaluation; empty means anonymous.
    pub fn role_name(&self) -> &str {
        self.data.role_name()
    }
}
