//! Repository traits: the transactional store boundary the domain talks to.
//!
//! Every entity type gets the same five operations; entity-specific query
//! methods (uniqueness probes, reference counts) extend the base trait.
//! Implementations are transactional at single-entity-write granularity.

use async_trait::async_trait;
use thiserror::Error;

use campus_accounts::Account;
use campus_catalog::{Category, Course};
use campus_core::{CategoryId, ClassRoomId, DomainError, Entity, SoftDelete, StudentId};
use campus_enrollment::{ClassRoom, Student, TeacherProfile};

/// Result type for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures raised by a store backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A unique backstop rejected the write. Retryable after the caller
    /// picks a different value.
    #[error("duplicate {field}")]
    Duplicate { field: String },

    /// The targeted row vanished between load and write.
    #[error("record missing")]
    Missing,

    /// The backend itself failed; the record keeps its prior durable state.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { field } => DomainError::duplicate(field),
            StorageError::Missing => DomainError::NotFound,
            StorageError::Unavailable(msg) => DomainError::storage(msg),
        }
    }
}

/// The five store operations shared by every soft-deletable entity.
///
/// `find_live`/`list_live` filter to `deleted_at == None`; retired rows stay
/// in storage but are invisible to default reads.
#[async_trait]
pub trait RecordStore<E>: Send + Sync
where
    E: Entity + SoftDelete + Clone + Send + Sync + 'static,
{
    async fn find_live(&self, id: &E::Id) -> StorageResult<Option<E>>;

    async fn list_live(&self) -> StorageResult<Vec<E>>;

    async fn insert(&self, record: E) -> StorageResult<()>;

    async fn update(&self, record: E) -> StorageResult<()>;

    /// Persist an already-stamped soft deletion (deletion time + status
    /// label) as one write.
    async fn mark_deleted_and_save(&self, record: E) -> StorageResult<()>;
}

/// Account rows. Email/username/phone probes scan **all** accounts, live or
/// not: a retired account still reserves its identity.
#[async_trait]
pub trait AccountStore: RecordStore<Account> {
    /// Login lookup: live accounts only, exact email.
    async fn find_live_by_email(&self, email: &str) -> StorageResult<Option<Account>>;

    async fn email_taken(&self, email: &str) -> StorageResult<bool>;

    async fn username_taken(&self, username: &str) -> StorageResult<bool>;

    async fn phone_taken(&self, phone: &str) -> StorageResult<bool>;

    /// True when not a single account row exists (seeding check).
    async fn is_empty(&self) -> StorageResult<bool>;
}

/// Category rows.
#[async_trait]
pub trait CategoryStore: RecordStore<Category> {
    /// Category-name resolution for course forms: exact match, live or not.
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Category>>;
}

/// Course rows.
#[async_trait]
pub trait CourseStore: RecordStore<Course> {
    /// Does any live course reference this category? Drives the category
    /// deletion guard.
    async fn any_live_in_category(&self, category_id: CategoryId) -> StorageResult<bool>;
}

/// Student rows. The uniqueness probes are scoped to a classroom (a `None`
/// classroom is its own scope: the unassigned pool), and can exclude the
/// record being edited.
#[async_trait]
pub trait StudentStore: RecordStore<Student> {
    async fn email_in_class(
        &self,
        email: &str,
        class_room_id: Option<ClassRoomId>,
        exclude: Option<StudentId>,
    ) -> StorageResult<bool>;

    async fn phone_in_class(
        &self,
        phone: &str,
        class_room_id: Option<ClassRoomId>,
        exclude: Option<StudentId>,
    ) -> StorageResult<bool>;

    async fn list_live_in_class(&self, class_room_id: ClassRoomId) -> StorageResult<Vec<Student>>;
}

/// Classroom rows; no extra queries.
#[async_trait]
pub trait ClassRoomStore: RecordStore<ClassRoom> {}

/// Teacher profile rows; no extra queries.
#[async_trait]
pub trait TeacherStore: RecordStore<TeacherProfile> {}
