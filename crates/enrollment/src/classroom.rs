use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_core::{ClassRoomId, DomainResult, Entity, FieldErrors, SoftDelete, TeacherId, status};

/// A classroom. Students reference it; email/phone uniqueness among students
/// is scoped to the classroom they share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRoom {
    pub id: ClassRoomId,
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: Option<TeacherId>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Caller-supplied classroom fields for create/edit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassRoomDraft {
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: Option<TeacherId>,
    pub status: Option<String>,
}

impl ClassRoomDraft {
    fn validate(&self) -> DomainResult<()> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.push("name", "Class name is required");
        }
        errors.into_result()
    }
}

impl ClassRoom {
    pub fn create(draft: ClassRoomDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        draft.validate()?;
        Ok(Self {
            id: ClassRoomId::new(),
            name: draft.name.trim().to_string(),
            description: draft.description,
            teacher_id: draft.teacher_id,
            status: draft.status.unwrap_or_else(|| status::ACTIVE.to_string()),
            created_at: now,
            updated_at: None,
            deleted_at: None,
        })
    }

    pub fn apply(&mut self, draft: ClassRoomDraft, now: DateTime<Utc>) -> DomainResult<()> {
        draft.validate()?;
        self.name = draft.name.trim().to_string();
        self.description = draft.description;
        self.teacher_id = draft.teacher_id;
        if let Some(status) = draft.status {
            self.status = status;
        }
        self.updated_at = Some(now);
        Ok(())
    }
}

impl Entity for ClassRoom {
    type Id = ClassRoomId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl SoftDelete for ClassRoom {
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
    fn create_and_soft_delete() {
        let draft = ClassRoomDraft {
            name: "Room A".to_string(),
            ..Default::default()
        };
        let mut room = ClassRoom::create(draft, Utc::now()).unwrap();
        assert!(room.is_live());

        room.mark_deleted(Utc::now());
        assert!(!room.is_live());
        assert_eq!(room.status, status::DELETED);
    }

    #[test]
    fn name_is_required() {
        let draft = ClassRoomDraft::default();
        assert!(ClassRoom::create(draft, Utc::now()).is_err());
    }
}
