use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_core::{
    AccountId, ClassRoomId, CourseId, DomainResult, Entity, FieldErrors, SoftDelete, StudentId,
    status,
};

/// A student profile, backed by an [`AccountId`].
///
/// References at most one classroom and at most one course. Email and phone
/// are unique among live students *of the same classroom*; two students in
/// different classrooms may share either. The cross-record check lives in
/// the lifecycle service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub account_id: AccountId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub class_room_id: Option<ClassRoomId>,
    pub course_id: Option<CourseId>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Caller-supplied student fields for create/edit.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub class_room_id: Option<ClassRoomId>,
    pub course_id: Option<CourseId>,
    pub status: Option<String>,
}

impl StudentDraft {
    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = FieldErrors::new();
        if self.full_name.trim().is_empty() {
            errors.push("full_name", "Full Name is required");
        }
        if self.email.trim().is_empty() {
            errors.push("email", "Email is required");
        } else if !email_looks_valid(&self.email) {
            errors.push("email", "Invalid email format");
        }
        if !phone_is_ten_digits(&self.phone) {
            errors.push("phone", "Phone number must be 10 digits");
        }
        errors.into_result()
    }
}

pub(crate) fn email_looks_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && !domain.starts_with('.') && domain.contains('.')
}

pub(crate) fn phone_is_ten_digits(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

impl Student {
    pub fn create(
        account_id: AccountId,
        draft: StudentDraft,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        draft.validate()?;
        Ok(Self {
            id: StudentId::new(),
            account_id,
            full_name: draft.full_name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone,
            address: draft.address,
            class_room_id: draft.class_room_id,
            course_id: draft.course_id,
            status: draft.status.unwrap_or_else(|| status::ACTIVE.to_string()),
            created_at: now,
            updated_at: None,
            deleted_at: None,
        })
    }

    pub fn apply(&mut self, draft: StudentDraft, now: DateTime<Utc>) -> DomainResult<()> {
        draft.validate()?;
        self.full_name = draft.full_name.trim().to_string();
        self.email = draft.email.trim().to_string();
        self.phone = draft.phone;
        self.address = draft.address;
        self.class_room_id = draft.class_room_id;
        self.course_id = draft.course_id;
        if let Some(status) = draft.status {
            self.status = status;
        }
        self.updated_at = Some(now);
        Ok(())
    }

    /// Reassign the student to a classroom. Per-class duplicate checks are
    /// the caller's responsibility (they need the classroom's other
    /// students).
    pub fn assign_class(&mut self, class_room_id: ClassRoomId, now: DateTime<Utc>) {
        self.class_room_id = Some(class_room_id);
        self.updated_at = Some(now);
    }
}

impl Entity for Student {
    type Id = StudentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl SoftDelete for Student {
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

    fn draft() -> StudentDraft {
        StudentDraft {
            full_name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
            phone: "0123456789".to_string(),
            address: None,
            class_room_id: None,
            course_id: None,
            status: None,
        }
    }

    #[test]
    fn create_succeeds_for_valid_draft() {
        let student = Student::create(AccountId::new(), draft(), Utc::now()).unwrap();
        assert_eq!(student.status, status::ACTIVE);
        assert!(student.is_live());
    }

    #[test]
    fn bad_email_and_phone_fail_field_validation() {
        let mut d = draft();
        d.email = "not-an-email".to_string();
        d.phone = "123".to_string();

        let err = Student::create(AccountId::new(), d, Utc::now()).unwrap_err();
        let campus_core::DomainError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        let named: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert!(named.contains(&"email"));
        assert!(named.contains(&"phone"));
    }

    #[test]
    fn assign_class_touches_updated_at() {
        let mut student = Student::create(AccountId::new(), draft(), Utc::now()).unwrap();
        let class = ClassRoomId::new();

        student.assign_class(class, Utc::now());

        assert_eq!(student.class_room_id, Some(class));
        assert!(student.updated_at.is_some());
    }

    #[test]
    fn email_validation_is_structural() {
        assert!(email_looks_valid("a@x.com"));
        assert!(!email_looks_valid("a@x"));
        assert!(!email_looks_valid("@x.com"));
        assert!(!email_looks_valid("ax.com"));
    }
}
