//! `campus-infra` — persistence and platform adapters.
//!
//! Repository traits per entity type, in-memory implementations (the
//! default backend, also used by every test), the idle-expiring session
//! store, the PBKDF2 credential verifier, and the first-run admin seeding
//! routine. A Postgres-backed account/session store is available behind the
//! `postgres` feature.

pub mod credentials;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod repository;
pub mod seed;
pub mod session_store;

pub use credentials::Pbkdf2Verifier;
pub use memory::{InMemoryAccountStore, InMemoryStore, InMemoryStudentStore};
pub use repository::{
    AccountStore, CategoryStore, ClassRoomStore, CourseStore, RecordStore, StorageError,
    StorageResult, StudentStore, TeacherStore,
};
pub use seed::seed_default_admin;
pub use session_store::{InMemorySessionStore, SessionStore, issue_token};
