//! `campus-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it holds the
//! role model, the static role→grant table and its evaluator, the typed
//! session state, and the credential-verification seam. Enforcement (the
//! access gate) and persistence live in the outer crates.

pub mod credentials;
pub mod permissions;
pub mod roles;
pub mod session;

pub use credentials::CredentialVerifier;
pub use permissions::{PermissionTable, PermissionTableBuilder, ResourceAction};
pub use roles::Role;
pub use session::SessionData;
