//! First-run bootstrap: seed the well-known admin account.

use anyhow::Result;
use chrono::Utc;

use campus_accounts::Account;
use campus_auth::{CredentialVerifier, Role};

use crate::repository::{AccountStore, RecordStore};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@campus.local";
pub const DEFAULT_ADMIN_PHONE: &str = "1234567890";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Seed exactly one Admin account when the store holds no accounts at all.
///
/// Idempotent: any existing account (whatever its role or liveness) skips
/// the seed. Returns whether an account was created.
pub async fn seed_default_admin(
    accounts: &dyn AccountStore,
    verifier: &dyn CredentialVerifier,
    password: &str,
) -> Result<bool> {
    if !accounts.is_empty().await? {
        return Ok(false);
    }

    let account = Account::new(
        Role::Admin,
        DEFAULT_ADMIN_USERNAME,
        DEFAULT_ADMIN_EMAIL,
        DEFAULT_ADMIN_PHONE,
        "Default Admin Address",
        verifier.hash(password)?,
        Utc::now(),
    );
    accounts.insert(account).await?;
    tracing::info!(email = DEFAULT_ADMIN_EMAIL, "default admin account created");
    Ok(true)
}
