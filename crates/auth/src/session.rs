use serde::{Deserialize, Serialize};

use campus_core::AccountId;

use crate::Role;

/// Per-client authentication state.
///
/// Two states: anonymous (all fields unset, the default) and authenticated
/// (all fields populated from the account at login). The fields are explicit
/// and typed rather than a string-keyed bag so a missing or misspelled key
/// cannot silently read back as anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub account_id: Option<AccountId>,
    pub username: Option<String>,
    pub role: Option<Role>,
}

impl SessionData {
    /// The anonymous state.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Transition taken on successful login.
    pub fn authenticated(account_id: AccountId, username: impl Into<String>, role: Role) -> Self {
        Self {
            account_id: Some(account_id),
            username: Some(username.into()),
            role: Some(role),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.account_id.is_some()
    }

    /// Role name for gate evaluation; empty means anonymous.
    pub fn role_name(&self) -> &str {
        self.role.map(|r| r.as_str()).unwrap_or("")
    }
}
