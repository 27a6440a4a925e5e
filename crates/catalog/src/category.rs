use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_core::{CategoryId, DomainResult, Entity, FieldErrors, SoftDelete, status};

/// A course category.
///
/// Categories group courses; a category with live courses referencing it
/// cannot be deleted (enforced by the lifecycle service, which has the
/// cross-entity view this crate deliberately lacks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    /// Stored-file name of the uploaded avatar; upload storage itself is an
    /// external concern, this field only carries the reference.
    pub avatar: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Caller-supplied category fields for create/edit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
    /// `None` on edit means "keep the stored avatar".
    pub avatar: Option<String>,
    pub status: Option<String>,
}

impl CategoryDraft {
    fn validate(&self) -> DomainResult<()> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.push("name", "Category name is required");
        }
        errors.into_result()
    }
}

impl Category {
    pub fn create(draft: CategoryDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        draft.validate()?;
        Ok(Self {
            id: CategoryId::new(),
            name: draft.name.trim().to_string(),
            description: draft.description,
            avatar: draft.avatar,
            status: draft.status.unwrap_or_else(|| status::ACTIVE.to_string()),
            created_at: now,
            updated_at: None,
            deleted_at: None,
        })
    }

    /// Apply an edit. An omitted avatar keeps the stored file reference.
    pub fn apply(&mut self, draft: CategoryDraft, now: DateTime<Utc>) -> DomainResult<()> {
        draft.validate()?;
        self.name = draft.name.trim().to_string();
        self.description = draft.description;
        if let Some(avatar) = draft.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(status) = draft.status {
            self.status = status;
        }
        self.updated_at = Some(now);
        Ok(())
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl SoftDelete for Category {
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

    fn draft(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: name.to_string(),
            description: Some("desc".to_string()),
            avatar: Some("cover.jpg".to_string()),
            status: None,
        }
    }

    #[test]
    fn create_defaults_to_active_and_live() {
        let category = Category::create(draft("Programming"), Utc::now()).unwrap();

        assert_eq!(category.status, status::ACTIVE);
        assert!(category.is_live());
        assert!(category.updated_at.is_none());
    }

    #[test]
    fn create_requires_a_name() {
        let result = Category::create(draft("   "), Utc::now());
        assert!(matches!(result, Err(campus_core::DomainError::Validation(_))));
    }

    #[test]
    fn edit_without_avatar_keeps_stored_file() {
        let mut category = Category::create(draft("Programming"), Utc::now()).unwrap();

        let edit = CategoryDraft {
            name: "Systems Programming".to_string(),
            description: None,
            avatar: None,
            status: None,
        };
        category.apply(edit, Utc::now()).unwrap();

        assert_eq!(category.name, "Systems Programming");
        assert_eq!(category.avatar.as_deref(), Some("cover.jpg"));
        assert!(category.updated_at.is_some());
    }

    #[test]
    fn mark_deleted_stamps_time_and_status() {
        let mut category = Category::create(draft("Programming"), Utc::now()).unwrap();
        let at = Utc::now();

        category.mark_deleted(at);

        assert_eq!(category.deleted_at, Some(at));
        assert_eq!(category.status, status::DELETED);
        assert!(!category.is_live());
    }
}
