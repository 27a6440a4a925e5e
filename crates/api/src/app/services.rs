//! Application services: store wiring plus the record lifecycle operations
//! every route dispatches into.
//!
//! The lifecycle rules live here because they need the cross-entity view the
//! domain crates deliberately lack: the category deletion guard consults
//! courses, student uniqueness consults classmates, and profile creation
//! provisions backing accounts.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;

use campus_accounts::{Account, Registration};
use campus_auth::{CredentialVerifier, Role, SessionData};
use campus_catalog::{Category, CategoryDraft, Course, CourseDraft};
use campus_core::{
    AccountId, CategoryId, ClassRoomId, CourseId, DomainError, FieldErrors, SoftDelete, StudentId,
    TeacherId,
};
use campus_enrollment::{
    ClassRoom, ClassRoomDraft, Student, StudentDraft, TeacherProfile, TeacherProfileDraft,
};
use campus_infra::{
    AccountStore, CategoryStore, ClassRoomStore, CourseStore, InMemoryAccountStore, InMemoryStore,
    InMemorySessionStore, InMemoryStudentStore, Pbkdf2Verifier, RecordStore, SessionStore,
    StudentStore, TeacherStore, issue_token,
};

use crate::app::dto::CourseRequest;

/// Initial credential for accounts provisioned alongside a student/teacher
/// profile; hashed before storage, expected to be rotated by the owner.
const INITIAL_MEMBER_PASSWORD: &str = "defaultPassword123";

/// Login failure.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Uniform outcome for unknown email and wrong password alike.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Store handles and the operations over them.
#[derive(Clone)]
pub struct AppServices {
    pub accounts: Arc<dyn AccountStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub courses: Arc<dyn CourseStore>,
    pub classrooms: Arc<dyn ClassRoomStore>,
    pub students: Arc<dyn StudentStore>,
    pub teachers: Arc<dyn TeacherStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppServices {
    /// Default wiring: in-memory stores, PBKDF2 credentials.
    pub fn in_memory(session_idle: Duration) -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountStore::new()),
            categories: Arc::new(InMemoryStore::<Category>::new()),
            courses: Arc::new(InMemoryStore::<Course>::new()),
            classrooms: Arc::new(InMemoryStore::<ClassRoom>::new()),
            students: Arc::new(InMemoryStudentStore::new()),
            teachers: Arc::new(InMemoryStore::<TeacherProfile>::new()),
            sessions: Arc::new(InMemorySessionStore::new(session_idle)),
            verifier: Arc::new(Pbkdf2Verifier::new()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Authentication
    // ─────────────────────────────────────────────────────────────────────

    /// Log in by email. On success the session store holds the
    /// authenticated state under a freshly issued token.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, SessionData), LoginError> {
        let account = self
            .accounts
            .find_live_by_email(email.trim())
            .await
            .map_err(DomainError::from)?;

        let Some(account) = account else {
            return Err(LoginError::InvalidCredentials);
        };
        if !self.verifier.verify(password, &account.password_hash) {
            return Err(LoginError::InvalidCredentials);
        }

        let data = SessionData::authenticated(account.id, account.username.clone(), account.role);
        let token = issue_token();
        self.sessions.put(&token, data.clone()).await;
        Ok((token, data))
    }

    /// Discard the caller's session unconditionally.
    pub async fn logout(&self, token: &str) {
        self.sessions.remove(token).await;
    }

    /// Self-service registration: validates the form, re-checks global
    /// account uniqueness, then writes the account and its profile row.
    pub async fn register(&self, form: Registration) -> Result<AccountId, DomainError> {
        let role = form.validate()?;

        let email = form.email.trim().to_string();
        let username = form.username.trim().to_string();

        let mut errors = FieldErrors::new();
        if self.accounts.email_taken(&email).await? {
            errors.push("email", "This email is already registered");
        }
        if self.accounts.username_taken(&username).await? {
            errors.push("username", "This username is already taken");
        }
        if self.accounts.phone_taken(&form.phone).await? {
            errors.push("phone", "This phone number is already registered");
        }
        errors.into_result()?;

        let hash = self
            .verifier
            .hash(&form.password)
            .map_err(|e| DomainError::storage(e.to_string()))?;
        let account = Account::new(
            role,
            username,
            email.clone(),
            form.phone.clone(),
            form.address.clone().unwrap_or_default(),
            hash,
            Utc::now(),
        );
        let account_id = account.id;
        self.accounts.insert(account).await?;

        match role {
            Role::Student => {
                let student = Student::create(
                    account_id,
                    StudentDraft {
                        full_name: form.full_name.clone(),
                        email,
                        phone: form.phone.clone(),
                        address: form.address.clone(),
                        class_room_id: None,
                        course_id: None,
                        status: None,
                    },
                    Utc::now(),
                )?;
                self.students.insert(student).await?;
            }
            Role::Teacher => {
                let teacher = TeacherProfile::create(
                    account_id,
                    TeacherProfileDraft {
                        full_name: form.full_name.clone(),
                        email,
                        phone: form.phone.clone(),
                        address: form.address.clone(),
                        status: None,
                    },
                    Utc::now(),
                )?;
                self.teachers.insert(teacher).await?;
            }
            // Unreachable: validate() only resolves the two member roles.
            Role::Admin => return Err(DomainError::validation(
                "role",
                "Only Student or Teacher roles can be registered",
            )),
        }

        tracing::info!(%account_id, role = role.as_str(), "account registered");
        Ok(account_id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Categories
    // ─────────────────────────────────────────────────────────────────────

    pub async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.list_live().await?)
    }

    pub async fn create_category(&self, draft: CategoryDraft) -> Result<Category, DomainError> {
        let category = Category::create(draft, Utc::now())?;
        self.categories.insert(category.clone()).await?;
        Ok(category)
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Category, DomainError> {
        self.categories
            .find_live(&id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    pub async fn edit_category(
        &self,
        id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<Category, DomainError> {
        let mut category = self.get_category(id).await?;
        category.apply(draft, Utc::now())?;
        self.categories.update(category.clone()).await?;
        Ok(category)
    }

    /// Soft-delete a category, guarded: a category still referenced by a
    /// live course is reported in use and left untouched.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), DomainError> {
        let mut category = self.get_category(id).await?;

        if self.courses.any_live_in_category(id).await? {
            return Err(DomainError::in_use(
                "This category is being used by one or more courses",
            ));
        }

        category.mark_deleted(Utc::now());
        self.categories.mark_deleted_and_save(category).await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Courses
    // ─────────────────────────────────────────────────────────────────────

    pub async fn list_courses(&self) -> Result<Vec<Course>, DomainError> {
        Ok(self.courses.list_live().await?)
    }

    /// Resolve the submitted category name to an id: exact match, live or
    /// not; an unknown name is a field error, not a fault.
    async fn resolve_category(&self, name: &str) -> Result<CategoryId, DomainError> {
        self.categories
            .find_by_name(name.trim())
            .await?
            .map(|c| c.id)
            .ok_or_else(|| DomainError::validation("category_name", "Category does not exist"))
    }

    pub async fn create_course(&self, request: CourseRequest) -> Result<Course, DomainError> {
        let category_id = self.resolve_category(&request.category_name).await?;
        let course = Course::create(
            CourseDraft {
                name: request.name,
                description: request.description,
                category_id,
                start_date: request.start_date,
                end_date: request.end_date,
                vote: request.vote,
                status: request.status,
            },
            Utc::now(),
        )?;
        self.courses.insert(course.clone()).await?;
        Ok(course)
    }

    pub async fn get_course(&self, id: CourseId) -> Result<Course, DomainError> {
        self.courses
            .find_live(&id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    pub async fn edit_course(
        &self,
        id: CourseId,
        request: CourseRequest,
    ) -> Result<Course, DomainError> {
        let mut course = self.get_course(id).await?;
        let category_id = self.resolve_category(&request.category_name).await?;
        course.apply(
            CourseDraft {
                name: request.name,
                description: request.description,
                category_id,
                start_date: request.start_date,
                end_date: request.end_date,
                vote: request.vote,
                status: request.status,
            },
            Utc::now(),
        )?;
        self.courses.update(course.clone()).await?;
        Ok(course)
    }

    pub async fn delete_course(&self, id: CourseId) -> Result<(), DomainError> {
        let mut course = self.get_course(id).await?;
        course.mark_deleted(Utc::now());
        self.courses.mark_deleted_and_save(course).await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Classrooms
    // ─────────────────────────────────────────────────────────────────────

    pub async fn list_classrooms(&self) -> Result<Vec<ClassRoom>, DomainError> {
        Ok(self.classrooms.list_live().await?)
    }

    pub async fn create_classroom(&self, draft: ClassRoomDraft) -> Result<ClassRoom, DomainError> {
        let room = ClassRoom::create(draft, Utc::now())?;
        self.classrooms.insert(room.clone()).await?;
        Ok(room)
    }

    pub async fn get_classroom(&self, id: ClassRoomId) -> Result<ClassRoom, DomainError> {
        self.classrooms
            .find_live(&id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    pub async fn edit_classroom(
        &self,
        id: ClassRoomId,
        draft: ClassRoomDraft,
    ) -> Result<ClassRoom, DomainError> {
        let mut room = self.get_classroom(id).await?;
        room.apply(draft, Utc::now())?;
        self.classrooms.update(room.clone()).await?;
        Ok(room)
    }

    pub async fn delete_classroom(&self, id: ClassRoomId) -> Result<(), DomainError> {
        let mut room = self.get_classroom(id).await?;
        room.mark_deleted(Utc::now());
        self.classrooms.mark_deleted_and_save(room).await?;
        Ok(())
    }

    /// A classroom plus its live students.
    pub async fn classroom_details(
        &self,
        id: ClassRoomId,
    ) -> Result<(ClassRoom, Vec<Student>), DomainError> {
        let room = self.get_classroom(id).await?;
        let students = self.students.list_live_in_class(id).await?;
        Ok((room, students))
    }

    /// Move a student into a classroom, re-running the per-classroom
    /// uniqueness checks against the target class first.
    pub async fn add_student_to_class(
        &self,
        class_room_id: ClassRoomId,
        student_id: StudentId,
    ) -> Result<Student, DomainError> {
        self.get_classroom(class_room_id).await?;
        let mut student = self.get_student(student_id).await?;

        let mut errors = FieldErrors::new();
        if self
            .students
            .email_in_class(&student.email, Some(class_room_id), Some(student.id))
            .await?
        {
            errors.push("email", "Email already exists in this class");
        }
        if self
            .students
            .phone_in_class(&student.phone, Some(class_room_id), Some(student.id))
            .await?
        {
            errors.push("phone", "Phone number already exists in this class");
        }
        errors.into_result()?;

        student.assign_class(class_room_id, Utc::now());
        self.students.update(student.clone()).await?;
        Ok(student)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Students
    // ─────────────────────────────────────────────────────────────────────

    pub async fn list_students(&self) -> Result<Vec<Student>, DomainError> {
        Ok(self.students.list_live().await?)
    }

    pub async fn create_student(&self, draft: StudentDraft) -> Result<Student, DomainError> {
        draft.validate()?;
        let email = draft.email.trim().to_string();

        let mut errors = FieldErrors::new();
        if self
            .students
            .email_in_class(&email, draft.class_room_id, None)
            .await?
        {
            errors.push("email", "Email already exists in this class");
        }
        if self
            .students
            .phone_in_class(&draft.phone, draft.class_room_id, None)
            .await?
        {
            errors.push("phone", "Phone number already exists in this class");
        }
        errors.into_result()?;

        let account_id = self
            .backing_account(Role::Student, &email, &draft.phone, draft.address.as_deref())
            .await?;
        let student = Student::create(account_id, draft, Utc::now())?;
        self.students.insert(student.clone()).await?;
        Ok(student)
    }

    pub async fn get_student(&self, id: StudentId) -> Result<Student, DomainError> {
        self.students
            .find_live(&id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    pub async fn edit_student(
        &self,
        id: StudentId,
        draft: StudentDraft,
    ) -> Result<Student, DomainError> {
        let mut student = self.get_student(id).await?;
        draft.validate()?;

        let email = draft.email.trim().to_string();
        let mut errors = FieldErrors::new();
        if self
            .students
            .email_in_class(&email, draft.class_room_id, Some(id))
            .await?
        {
            errors.push("email", "Email already exists in this class");
        }
        if self
            .students
            .phone_in_class(&draft.phone, draft.class_room_id, Some(id))
            .await?
        {
            errors.push("phone", "Phone number already exists in this class");
        }
        errors.into_result()?;

        student.apply(draft, Utc::now())?;
        self.students.update(student.clone()).await?;
        Ok(student)
    }

    pub async fn delete_student(&self, id: StudentId) -> Result<(), DomainError> {
        let mut student = self.get_student(id).await?;
        student.mark_deleted(Utc::now());
        self.students.mark_deleted_and_save(student).await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Teachers
    // ─────────────────────────────────────────────────────────────────────

    pub async fn list_teachers(&self) -> Result<Vec<TeacherProfile>, DomainError> {
        Ok(self.teachers.list_live().await?)
    }

    pub async fn create_teacher(
        &self,
        draft: TeacherProfileDraft,
    ) -> Result<TeacherProfile, DomainError> {
        let account_id = self
            .backing_account(
                Role::Teacher,
                draft.email.trim(),
                &draft.phone,
                draft.address.as_deref(),
            )
            .await?;
        let teacher = TeacherProfile::create(account_id, draft, Utc::now())?;
        self.teachers.insert(teacher.clone()).await?;
        Ok(teacher)
    }

    pub async fn get_teacher(&self, id: TeacherId) -> Result<TeacherProfile, DomainError> {
        self.teachers
            .find_live(&id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    pub async fn edit_teacher(
        &self,
        id: TeacherId,
        draft: TeacherProfileDraft,
    ) -> Result<TeacherProfile, DomainError> {
        let mut teacher = self.get_teacher(id).await?;
        teacher.apply(draft, Utc::now())?;
        self.teachers.update(teacher.clone()).await?;
        Ok(teacher)
    }

    pub async fn delete_teacher(&self, id: TeacherId) -> Result<(), DomainError> {
        let mut teacher = self.get_teacher(id).await?;
        teacher.mark_deleted(Utc::now());
        self.teachers.mark_deleted_and_save(teacher).await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Shared helpers
    // ─────────────────────────────────────────────────────────────────────

    /// Account backing a student/teacher profile. A live account with the
    /// profile's email is reused (students may appear in several classes);
    /// otherwise one is provisioned with a hashed initial credential and a
    /// username derived from the email local part.
    async fn backing_account(
        &self,
        role: Role,
        email: &str,
        phone: &str,
        address: Option<&str>,
    ) -> Result<AccountId, DomainError> {
        if let Some(existing) = self.accounts.find_live_by_email(email).await? {
            return Ok(existing.id);
        }
        if self.accounts.email_taken(email).await? {
            // A retired account still reserves its email.
            return Err(DomainError::validation(
                "email",
                "This email is already registered",
            ));
        }

        let local = email.split('@').next().unwrap_or(email);
        let mut username = local.to_string();
        if self.accounts.username_taken(&username).await? {
            username = email.to_string();
        }

        let hash = self
            .verifier
            .hash(INITIAL_MEMBER_PASSWORD)
            .map_err(|e| DomainError::storage(e.to_string()))?;
        let account = Account::new(
            role,
            username,
            email,
            phone,
            address.unwrap_or(""),
            hash,
            Utc::now(),
        );
        let account_id = account.id;
        self.accounts.insert(account).await?;
        Ok(account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_infra::seed::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, seed_default_admin};
    use chrono::NaiveDate;

    async fn seeded() -> AppServices {
        let services = AppServices::in_memory(Duration::from_secs(1800));
        seed_default_admin(
            services.accounts.as_ref(),
            services.verifier.as_ref(),
            DEFAULT_ADMIN_PASSWORD,
        )
        .await
        .unwrap();
        services
    }

    fn category_draft(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: name.to_string(),
            description: None,
            avatar: None,
            status: None,
        }
    }

    fn course_request(category_name: &str) -> CourseRequest {
        CourseRequest {
            name: "Rust 101".to_string(),
            description: None,
            category_name: category_name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 19).unwrap(),
            vote: 0,
            status: None,
        }
    }

    fn student_draft(email: &str, phone: &str, class: Option<ClassRoomId>) -> StudentDraft {
        StudentDraft {
            full_name: "Alice Smith".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            address: None,
            class_room_id: class,
            course_id: None,
            status: None,
        }
    }

    fn registration(role: &str, email: &str, username: &str, phone: &str) -> Registration {
        Registration {
            username: username.to_string(),
            full_name: "Some Person".to_string(),
            email: email.to_string(),
            password: "Secret1!".to_string(),
            confirm_password: "Secret1!".to_string(),
            phone: phone.to_string(),
            address: None,
            role: role.to_string(),
        }
    }

    // ─── Login / logout ──────────────────────────────────────────────────

    #[tokio::test]
    async fn login_with_correct_credentials_authenticates_with_account_role() {
        let services = seeded().await;

        let (token, data) = services
            .login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
            .await
            .unwrap();

        assert_eq!(data.role, Some(Role::Admin));
        assert_eq!(data.username.as_deref(), Some("admin"));
        assert!(services.sessions.get(&token).await.unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let services = seeded().await;

        let wrong_password = services
            .login(DEFAULT_ADMIN_EMAIL, "not-the-password")
            .await
            .unwrap_err();
        let unknown_email = services
            .login("nobody@campus.local", DEFAULT_ADMIN_PASSWORD)
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, LoginError::InvalidCredentials));
        assert!(matches!(unknown_email, LoginError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn deleted_accounts_cannot_log_in() {
        let services = seeded().await;
        let mut admin = services
            .accounts
            .find_live_by_email(DEFAULT_ADMIN_EMAIL)
            .await
            .unwrap()
            .unwrap();
        admin.mark_deleted(Utc::now());
        services.accounts.mark_deleted_and_save(admin).await.unwrap();

        let err = services
            .login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::InvalidCredentials));
    }

    #[tokio::test]
    async fn logout_clears_the_session_whatever_its_state() {
        let services = seeded().await;
        let (token, _) = services
            .login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
            .await
            .unwrap();

        services.logout(&token).await;
        assert!(services.sessions.get(&token).await.is_none());

        // A second logout of the same (now anonymous) token is a no-op.
        services.logout(&token).await;
        assert!(services.sessions.get(&token).await.is_none());
    }

    // ─── Registration ────────────────────────────────────────────────────

    #[tokio::test]
    async fn register_student_creates_account_and_profile_and_can_log_in() {
        let services = seeded().await;

        let account_id = services
            .register(registration("Student", "alice@x.com", "alice", "0123456789"))
            .await
            .unwrap();

        let students = services.list_students().await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].account_id, account_id);

        let (_, data) = services.login("alice@x.com", "Secret1!").await.unwrap();
        assert_eq!(data.role, Some(Role::Student));
    }

    #[tokio::test]
    async fn register_teacher_creates_teacher_profile() {
        let services = seeded().await;
        services
            .register(registration("Teacher", "bob@x.com", "bob", "0123456788"))
            .await
            .unwrap();

        assert_eq!(services.list_teachers().await.unwrap().len(), 1);
        assert!(services.list_students().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn register_rejects_admin_role_and_writes_nothing() {
        let services = AppServices::in_memory(Duration::from_secs(1800));

        let err = services
            .register(registration("Admin", "eve@x.com", "eve", "0123456787"))
            .await
            .unwrap_err();

        let DomainError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.iter().any(|f| f.field == "role"));
        assert!(services.accounts.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_against_all_accounts() {
        let services = seeded().await;
        services
            .register(registration("Student", "dup@x.com", "first", "0123456786"))
            .await
            .unwrap();

        let err = services
            .register(registration("Student", "dup@x.com", "second", "0123456785"))
            .await
            .unwrap_err();

        let DomainError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.iter().any(|f| f.field == "email"));
    }

    // ─── Category lifecycle and the in-use guard ─────────────────────────

    #[tokio::test]
    async fn category_with_live_course_cannot_be_deleted_until_course_goes() {
        let services = seeded().await;
        let category = services
            .create_category(category_draft("Programming"))
            .await
            .unwrap();
        let course = services
            .create_course(course_request("Programming"))
            .await
            .unwrap();

        let err = services.delete_category(category.id).await.unwrap_err();
        assert!(matches!(err, DomainError::InUse(_)));

        // Guard left the category untouched.
        let still_there = services.get_category(category.id).await.unwrap();
        assert!(still_there.deleted_at.is_none());
        assert_eq!(still_there.status, campus_core::status::ACTIVE);

        // Once the referencing course is itself soft-deleted, delete works.
        services.delete_course(course.id).await.unwrap();
        services.delete_category(category.id).await.unwrap();
        assert!(matches!(
            services.get_category(category.id).await.unwrap_err(),
            DomainError::NotFound
        ));
    }

    #[tokio::test]
    async fn deleting_a_missing_or_deleted_category_is_not_found() {
        let services = seeded().await;
        let err = services.delete_category(CategoryId::new()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound));

        let category = services
            .create_category(category_draft("Temp"))
            .await
            .unwrap();
        services.delete_category(category.id).await.unwrap();
        let err = services.delete_category(category.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[tokio::test]
    async fn category_edit_without_avatar_keeps_stored_file() {
        let services = seeded().await;
        let category = services
            .create_category(CategoryDraft {
                avatar: Some("cover.jpg".to_string()),
                ..category_draft("Programming")
            })
            .await
            .unwrap();

        let edited = services
            .edit_category(category.id, category_draft("Programming II"))
            .await
            .unwrap();

        assert_eq!(edited.name, "Programming II");
        assert_eq!(edited.avatar.as_deref(), Some("cover.jpg"));
    }

    // ─── Course category-name resolution ─────────────────────────────────

    #[tokio::test]
    async fn unknown_category_name_is_a_field_error_not_a_fault() {
        let services = seeded().await;

        let err = services
            .create_course(course_request("No Such Category"))
            .await
            .unwrap_err();

        let DomainError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.iter().any(|f| f.field == "category_name"));
        assert!(services.list_courses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn course_resolution_matches_soft_deleted_categories_too() {
        let services = seeded().await;
        let category = services
            .create_category(category_draft("Legacy"))
            .await
            .unwrap();
        services.delete_category(category.id).await.unwrap();

        // Name resolution deliberately scans live-or-not.
        let course = services.create_course(course_request("Legacy")).await.unwrap();
        assert_eq!(course.category_id, category.id);
    }

    // ─── Student uniqueness scoped per classroom ─────────────────────────

    #[tokio::test]
    async fn student_email_is_unique_per_classroom_only() {
        let services = seeded().await;
        let room_1 = services
            .create_classroom(ClassRoomDraft {
                name: "Room 1".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let room_2 = services
            .create_classroom(ClassRoomDraft {
                name: "Room 2".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        services
            .create_student(student_draft("a@x.com", "0000000001", Some(room_1.id)))
            .await
            .unwrap();

        // Same email, same classroom: field error.
        let err = services
            .create_student(student_draft("a@x.com", "0000000002", Some(room_1.id)))
            .await
            .unwrap_err();
        let DomainError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.iter().any(|f| f.field == "email"));

        // Same email, different classroom: fine.
        services
            .create_student(student_draft("a@x.com", "0000000003", Some(room_2.id)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn student_edit_excludes_itself_from_the_duplicate_check() {
        let services = seeded().await;
        let room = services
            .create_classroom(ClassRoomDraft {
                name: "Room".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let student = services
            .create_student(student_draft("a@x.com", "0000000001", Some(room.id)))
            .await
            .unwrap();

        // Saving the record with its own email/phone must not self-collide.
        let edited = services
            .edit_student(student.id, student_draft("a@x.com", "0000000001", Some(room.id)))
            .await
            .unwrap();
        assert!(edited.updated_at.is_some());
    }

    #[tokio::test]
    async fn adding_a_student_to_a_class_recheck_rejects_duplicates() {
        let services = seeded().await;
        let room = services
            .create_classroom(ClassRoomDraft {
                name: "Room".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        services
            .create_student(student_draft("a@x.com", "0000000001", Some(room.id)))
            .await
            .unwrap();
        let unassigned = services
            .create_student(student_draft("a@x.com", "0000000002", None))
            .await
            .unwrap();

        let err = services
            .add_student_to_class(room.id, unassigned.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Against a classroom without the clash it goes through.
        let other = services
            .create_classroom(ClassRoomDraft {
                name: "Other".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let moved = services
            .add_student_to_class(other.id, unassigned.id)
            .await
            .unwrap();
        assert_eq!(moved.class_room_id, Some(other.id));
    }

    #[tokio::test]
    async fn students_sharing_an_email_share_one_backing_account() {
        let services = seeded().await;
        let room_1 = services
            .create_classroom(ClassRoomDraft {
                name: "Room 1".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let room_2 = services
            .create_classroom(ClassRoomDraft {
                name: "Room 2".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let first = services
            .create_student(student_draft("a@x.com", "0000000001", Some(room_1.id)))
            .await
            .unwrap();
        let second = services
            .create_student(student_draft("a@x.com", "0000000002", Some(room_2.id)))
            .await
            .unwrap();

        assert_eq!(first.account_id, second.account_id);
    }

    // ─── Soft delete visibility ──────────────────────────────────────────

    #[tokio::test]
    async fn soft_deleted_students_vanish_from_listings_and_details() {
        let services = seeded().await;
        let room = services
            .create_classroom(ClassRoomDraft {
                name: "Room".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let student = services
            .create_student(student_draft("a@x.com", "0000000001", Some(room.id)))
            .await
            .unwrap();

        services.delete_student(student.id).await.unwrap();

        assert!(services.list_students().await.unwrap().is_empty());
        let (_, students) = services.classroom_details(room.id).await.unwrap();
        assert!(students.is_empty());
        assert!(matches!(
            services.get_student(student.id).await.unwrap_err(),
            DomainError::NotFound
        ));
    }
}
