use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use campus_core::{CategoryId, CourseId, DomainResult, Entity, FieldErrors, SoftDelete, status};

/// A course. References exactly one category by id; the API surface accepts
/// a category *name* and resolves it to an id before this type is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub vote: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Caller-supplied course fields. `category_id` is already resolved from the
/// submitted category name.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseDraft {
    pub name: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub vote: i32,
    pub status: Option<String>,
}

impl CourseDraft {
    fn validate(&self) -> DomainResult<()> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.push("name", "Course name is required");
        }
        errors.into_result()
    }
}

impl Course {
    pub fn create(draft: CourseDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        draft.validate()?;
        Ok(Self {
            id: CourseId::new(),
            name: draft.name.trim().to_string(),
            description: draft.description,
            category_id: draft.category_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            vote: draft.vote,
            status: draft.status.unwrap_or_else(|| status::ACTIVE.to_string()),
            created_at: now,
            updated_at: None,
            deleted_at: None,
        })
    }

    pub fn apply(&mut self, draft: CourseDraft, now: DateTime<Utc>) -> DomainResult<()> {
        draft.validate()?;
        self.name = draft.name.trim().to_string();
        self.description = draft.description;
        self.category_id = draft.category_id;
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
        self.vote = draft.vote;
        if let Some(status) = draft.status {
            self.status = status;
        }
        self.updated_at = Some(now);
        Ok(())
    }
}

impl Entity for Course {
    type Id = CourseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl SoftDelete for Course {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
        self.status = status::DELETED.to_string();
    }
}
