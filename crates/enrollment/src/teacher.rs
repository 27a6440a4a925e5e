use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_core::{AccountId, DomainResult, Entity, FieldErrors, SoftDelete, TeacherId, status};

use crate::student::{email_looks_valid, phone_is_ten_digits};

/// A teacher profile, backed by an [`AccountId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherProfile {
    pub id: TeacherId,
    pub account_id: AccountId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Caller-supplied teacher fields for create/edit.
#[derive(Debug, Clone, Deserialize)]
pub struct TeacherProfileDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub status: Option<String>,
}

impl TeacherProfileDraft {
    fn validate(&self) -> DomainResult<()> {
        let mut errors = FieldErrors::new();
        if self.full_name.trim().is_empty() {
            errors.push("full_name", "Full Name is required");
        }
        if !email_looks_valid(&self.email) {
            errors.push("email", "Invalid email format");
        }
        if !phone_is_ten_digits(&self.phone) {
            errors.push("phone", "Phone number must be 10 digits");
        }
        errors.into_result()
    }
}

impl TeacherProfile {
    pub fn create(
        account_id: AccountId,
        draft: TeacherProfileDraft,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        draft.validate()?;
        Ok(Self {
            id: TeacherId::new(),
            account_id,
            full_name: draft.full_name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone,
            address: draft.address,
            status: draft.status.unwrap_or_else(|| status::ACTIVE.to_string()),
            created_at: now,
            updated_at: None,
            deleted_at: None,
        })
    }

    pub fn apply(&mut self, draft: TeacherProfileDraft, now: DateTime<Utc>) -> DomainResult<()> {
        draft.validate()?;
        self.full_name = draft.full_name.trim().to_string();
        self.email = draft.email.trim().to_string();
        self.phone = draft.phone;
        self.address = draft.address;
        if let Some(status) = draft.status {
            self.status = status;
        }
        self.updated_at = Some(now);
        Ok(())
    }
}

impl Entity for TeacherProfile {
    type Id = TeacherId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl SoftDelete for TeacherProfile {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
        self.status = status::DELETED.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_edit() {
        let draft = TeacherProfileDraft {
            full_name: "Bob Jones".to_string(),
            email: "bob@example.com".to_string(),
            phone: "0987654321".to_string(),
            address: None,
            status: None,
        };
        let mut teacher = TeacherProfile::create(AccountId::new(), draft.clone(), Utc::now()).unwrap();
        assert!(teacher.is_live());

        let mut edit = draft;
        edit.full_name = "Robert Jones".to_string();
        teacher.apply(edit, Utc::now()).unwrap();
        assert_eq!(teacher.full_name, "Robert Jones");
    }
}
