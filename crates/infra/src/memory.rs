//! In-memory store implementations.
//!
//! The default backend for development and the one every test runs against.
//! Accounts and students get dedicated wrappers so their uniqueness
//! backstops run under the same lock as the write: the service-layer
//! pre-checks are check-then-act, the store is where the race closes.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use campus_accounts::Account;
use campus_catalog::{Category, Course};
use campus_core::{AccountId, CategoryId, ClassRoomId, Entity, SoftDelete, StudentId};
use campus_enrollment::{ClassRoom, Student, TeacherProfile};

use crate::repository::{
    AccountStore, CategoryStore, ClassRoomStore, CourseStore, RecordStore, StorageError,
    StorageResult, StudentStore, TeacherStore,
};

/// Plain in-memory record store keyed by entity id.
#[derive(Debug)]
pub struct InMemoryStore<E: Entity> {
    inner: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity> InMemoryStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, HashMap<E::Id, E>>> {
        self.inner
            .read()
            .map_err(|_| StorageError::unavailable("store lock poisoned"))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, HashMap<E::Id, E>>> {
        self.inner
            .write()
            .map_err(|_| StorageError::unavailable("store lock poisoned"))
    }
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E> RecordStore<E> for InMemoryStore<E>
where
    E: Entity + SoftDelete + Clone + Send + Sync + 'static,
    E::Id: Send + Sync,
{
    async fn find_live(&self, id: &E::Id) -> StorageResult<Option<E>> {
        Ok(self.read()?.get(id).filter(|e| e.is_live()).cloned())
    }

    async fn list_live(&self) -> StorageResult<Vec<E>> {
        Ok(self.read()?.values().filter(|e| e.is_live()).cloned().collect())
    }

    async fn insert(&self, record: E) -> StorageResult<()> {
        let mut map = self.write()?;
        if map.contains_key(record.id()) {
            return Err(StorageError::duplicate("id"));
        }
        let id = record.id().clone();
        map.insert(id, record);
        Ok(())
    }

    async fn update(&self, record: E) -> StorageResult<()> {
        let mut map = self.write()?;
        if !map.contains_key(record.id()) {
            return Err(StorageError::Missing);
        }
        let id = record.id().clone();
        map.insert(id, record);
        Ok(())
    }

    async fn mark_deleted_and_save(&self, record: E) -> StorageResult<()> {
        self.update(record).await
    }
}

#[async_trait]
impl CategoryStore for InMemoryStore<Category> {
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Category>> {
        Ok(self.read()?.values().find(|c| c.name == name).cloned())
    }
}

#[async_trait]
impl CourseStore for InMemoryStore<Course> {
    async fn any_live_in_category(&self, category_id: CategoryId) -> StorageResult<bool> {
        Ok(self
            .read()?
            .values()
            .any(|c| c.is_live() && c.category_id == category_id))
    }
}

#[async_trait]
impl ClassRoomStore for InMemoryStore<ClassRoom> {}

#[async_trait]
impl TeacherStore for InMemoryStore<TeacherProfile> {}

/// Account store with a global uniqueness backstop.
///
/// Email/username/phone collisions are rejected under the write lock, among
/// all accounts live or not: a retired account still reserves its identity.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    inner: InMemoryStore<Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn colliding_field(map: &HashMap<AccountId, Account>, candidate: &Account) -> Option<&'static str> {
        for existing in map.values() {
            if existing.id == candidate.id {
                continue;
            }
            if existing.email == candidate.email {
                return Some("email");
            }
            if existing.username == candidate.username {
                return Some("username");
            }
            if existing.phone == candidate.phone {
                return Some("phone");
            }
        }
        None
    }
}

#[async_trait]
impl RecordStore<Account> for InMemoryAccountStore {
    async fn find_live(&self, id: &AccountId) -> StorageResult<Option<Account>> {
        self.inner.find_live(id).await
    }

    async fn list_live(&self) -> StorageResult<Vec<Account>> {
        self.inner.list_live().await
    }

    async fn insert(&self, record: Account) -> StorageResult<()> {
        let mut map = self.inner.write()?;
        if map.contains_key(&record.id) {
            return Err(StorageError::duplicate("id"));
        }
        if let Some(field) = Self::colliding_field(&map, &record) {
            return Err(StorageError::duplicate(field));
        }
        map.insert(record.id, record);
        Ok(())
    }

    async fn update(&self, record: Account) -> StorageResult<()> {
        let mut map = self.inner.write()?;
        if !map.contains_key(&record.id) {
            return Err(StorageError::Missing);
        }
        if let Some(field) = Self::colliding_field(&map, &record) {
            return Err(StorageError::duplicate(field));
        }
        map.insert(record.id, record);
        Ok(())
    }

    async fn mark_deleted_and_save(&self, record: Account) -> StorageResult<()> {
        self.inner.update(record).await
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_live_by_email(&self, email: &str) -> StorageResult<Option<Account>> {
        Ok(self
            .inner
            .read()?
            .values()
            .find(|a| a.is_live() && a.email == email)
            .cloned())
    }

    async fn email_taken(&self, email: &str) -> StorageResult<bool> {
        Ok(self.inner.read()?.values().any(|a| a.email == email))
    }

    async fn username_taken(&self, username: &str) -> StorageResult<bool> {
        Ok(self.inner.read()?.values().any(|a| a.username == username))
    }

    async fn phone_taken(&self, phone: &str) -> StorageResult<bool> {
        Ok(self.inner.read()?.values().any(|a| a.phone == phone))
    }

    async fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.inner.read()?.is_empty())
    }
}

/// Student store with the per-classroom uniqueness backstop.
///
/// Scope: live students sharing the same classroom; unassigned students
/// (no classroom) form their own scope.
#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    inner: InMemoryStore<Student>,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn colliding_field(map: &HashMap<StudentId, Student>, candidate: &Student) -> Option<&'static str> {
        for existing in map.values() {
            if existing.id == candidate.id || !existing.is_live() {
                continue;
            }
            if existing.class_room_id != candidate.class_room_id {
                continue;
            }
            if existing.email == candidate.email {
                return Some("email");
            }
            if existing.phone == candidate.phone {
                return Some("phone");
            }
        }
        None
    }
}

#[async_trait]
impl RecordStore<Student> for InMemoryStudentStore {
    async fn find_live(&self, id: &StudentId) -> StorageResult<Option<Student>> {
        self.inner.find_live(id).await
    }

    async fn list_live(&self) -> StorageResult<Vec<Student>> {
        self.inner.list_live().await
    }

    async fn insert(&self, record: Student) -> StorageResult<()> {
        let mut map = self.inner.write()?;
        if map.contains_key(&record.id) {
            return Err(StorageError::duplicate("id"));
        }
        if let Some(field) = Self::colliding_field(&map, &record) {
            return Err(StorageError::duplicate(field));
        }
        map.insert(record.id, record);
        Ok(())
    }

    async fn update(&self, record: Student) -> StorageResult<()> {
        let mut map = self.inner.write()?;
        if !map.contains_key(&record.id) {
            return Err(StorageError::Missing);
        }
        if let Some(field) = Self::colliding_field(&map, &record) {
            return Err(StorageError::duplicate(field));
        }
        map.insert(record.id, record);
        Ok(())
    }

    async fn mark_deleted_and_save(&self, record: Student) -> StorageResult<()> {
        self.inner.update(record).await
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn email_in_class(
        &self,
        email: &str,
        class_room_id: Option<ClassRoomId>,
        exclude: Option<StudentId>,
    ) -> StorageResult<bool> {
        Ok(self.inner.read()?.values().any(|s| {
            s.is_live()
                && s.class_room_id == class_room_id
                && s.email == email
                && Some(s.id) != exclude
        }))
    }

    async fn phone_in_class(
        &self,
        phone: &str,
        class_room_id: Option<ClassRoomId>,
        exclude: Option<StudentId>,
    ) -> StorageResult<bool> {
        Ok(self.inner.read()?.values().any(|s| {
            s.is_live()
                && s.class_room_id == class_room_id
                && s.phone == phone
                && Some(s.id) != exclude
        }))
    }

    async fn list_live_in_class(&self, class_room_id: ClassRoomId) -> StorageResult<Vec<Student>> {
        Ok(self
            .inner
            .read()?
            .values()
            .filter(|s| s.is_live() && s.class_room_id == Some(class_room_id))
            .cloned()
            .collect())
    }
}
