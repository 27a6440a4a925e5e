use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_auth::Role;
use campus_core::{AccountId, Entity, SoftDelete, status};

/// A persistent authentication identity.
///
/// Email, username, and phone are unique across **all** accounts, live or
/// not; the store layer enforces this at insert time. The role is assigned
/// once at creation. An account owns zero-or-one student or teacher profile
/// row, linked from the profile side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub role: Role,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// One-way hash; only ever read by the credential verifier.
    pub password_hash: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(
        role: Role,
        username: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        password_hash: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            role,
            username: username.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
            password_hash: password_hash.into(),
            status: status::ACTIVE.to_string(),
            created_at: now,
            deleted_at: None,
        }
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl SoftDelete for Account {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
        self.status = status::DELETED.to_string();
    }
}
