//! Postgres-backed stores (feature `postgres`).
//!
//! Durable backend for the identity data that must survive restarts:
//! accounts and sessions. The catalog/enrollment stores stay in-memory in
//! this configuration. Uniqueness is enforced by real unique constraints,
//! so the check-then-act pre-checks in the service layer get a storage
//! backstop here exactly like the in-memory wrappers.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use campus_accounts::Account;
use campus_auth::{Role, SessionData};
use campus_core::AccountId;

use crate::repository::{AccountStore, RecordStore, StorageError, StorageResult};
use crate::session_store::SessionStore;

/// Create the backing tables when absent. Safe to run on every startup.
pub async fn prepare_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS campus_accounts (
            id UUID PRIMARY KEY,
            role TEXT NOT NULL,
            username TEXT NOT NULL CONSTRAINT campus_accounts_username_key UNIQUE,
            email TEXT NOT NULL CONSTRAINT campus_accounts_email_key UNIQUE,
            phone TEXT NOT NULL CONSTRAINT campus_accounts_phone_key UNIQUE,
            address TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            status TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            deleted_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS campus_sessions (
            token TEXT PRIMARY KEY,
            payload JSONB NOT NULL,
            last_seen TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn map_write_err(err: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let field = match db.constraint() {
                Some(name) if name.contains("email") => "email",
                Some(name) if name.contains("username") => "username",
                Some(name) if name.contains("phone") => "phone",
                _ => "unique",
            };
            return StorageError::duplicate(field);
        }
    }
    StorageError::unavailable(err.to_string())
}

fn map_read_err(err: sqlx::Error) -> StorageError {
    StorageError::unavailable(err.to_string())
}

fn account_from_row(row: &PgRow) -> StorageResult<Account> {
    let role: String = row.try_get("role").map_err(map_read_err)?;
    let role = role
        .parse::<Role>()
        .map_err(|e| StorageError::unavailable(e.to_string()))?;

    Ok(Account {
        id: AccountId::from_uuid(row.try_get::<Uuid, _>("id").map_err(map_read_err)?),
        role,
        username: row.try_get("username").map_err(map_read_err)?,
        email: row.try_get("email").map_err(map_read_err)?,
        phone: row.try_get("phone").map_err(map_read_err)?,
        address: row.try_get("address").map_err(map_read_err)?,
        password_hash: row.try_get("password_hash").map_err(map_read_err)?,
        status: row.try_get("status").map_err(map_read_err)?,
        created_at: row.try_get("created_at").map_err(map_read_err)?,
        deleted_at: row.try_get("deleted_at").map_err(map_read_err)?,
    })
}

const ACCOUNT_COLUMNS: &str =
    "id, role, username, email, phone, address, password_hash, status, created_at, deleted_at";

/// Accounts table with database-level unique constraints.
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists_where(&self, column: &str, value: &str) -> StorageResult<bool> {
        // Column names come from the fixed probe methods below, never callers.
        let sql = format!("SELECT EXISTS(SELECT 1 FROM campus_accounts WHERE {column} = $1)");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(map_read_err)?;
        row.try_get::<bool, _>(0).map_err(map_read_err)
    }
}

#[async_trait]
impl RecordStore<Account> for PgAccountStore {
    async fn find_live(&self, id: &AccountId) -> StorageResult<Option<Account>> {
        let sql =
            format!("SELECT {ACCOUNT_COLUMNS} FROM campus_accounts WHERE id = $1 AND deleted_at IS NULL");
        let row = sqlx::query(&sql)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_err)?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn list_live(&self) -> StorageResult<Vec<Account>> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM campus_accounts WHERE deleted_at IS NULL ORDER BY created_at"
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_err)?;
        rows.iter().map(account_from_row).collect()
    }

    async fn insert(&self, record: Account) -> StorageResult<()> {
        sqlx::query(
            "INSERT INTO campus_accounts \
             (id, role, username, email, phone, address, password_hash, status, created_at, deleted_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(*record.id.as_uuid())
        .bind(record.role.as_str())
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.address)
        .bind(&record.password_hash)
        .bind(&record.status)
        .bind(record.created_at)
        .bind(record.deleted_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_err)?;
        Ok(())
    }

    async fn update(&self, record: Account) -> StorageResult<()> {
        let result = sqlx::query(
            "UPDATE campus_accounts SET role = $2, username = $3, email = $4, phone = $5, \
             address = $6, password_hash = $7, status = $8 WHERE id = $1",
        )
        .bind(*record.id.as_uuid())
        .bind(record.role.as_str())
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.address)
        .bind(&record.password_hash)
        .bind(&record.status)
        .execute(&self.pool)
        .await
        .map_err(map_write_err)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::Missing);
        }
        Ok(())
    }

    async fn mark_deleted_and_save(&self, record: Account) -> StorageResult<()> {
        let result = sqlx::query(
            "UPDATE campus_accounts SET deleted_at = $2, status = $3 WHERE id = $1",
        )
        .bind(*record.id.as_uuid())
        .bind(record.deleted_at)
        .bind(&record.status)
        .execute(&self.pool)
        .await
        .map_err(map_write_err)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::Missing);
        }
        Ok(())
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_live_by_email(&self, email: &str) -> StorageResult<Option<Account>> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM campus_accounts WHERE email = $1 AND deleted_at IS NULL"
        );
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_err)?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn email_taken(&self, email: &str) -> StorageResult<bool> {
        self.exists_where("email", email).await
    }

    async fn username_taken(&self, username: &str) -> StorageResult<bool> {
        self.exists_where("username", username).await
    }

    async fn phone_taken(&self, phone: &str) -> StorageResult<bool> {
        self.exists_where("phone", phone).await
    }

    async fn is_empty(&self) -> StorageResult<bool> {
        let row = sqlx::query("SELECT NOT EXISTS(SELECT 1 FROM campus_accounts)")
            .fetch_one(&self.pool)
            .await
            .map_err(map_read_err)?;
        row.try_get::<bool, _>(0).map_err(map_read_err)
    }
}

/// Sessions table with the same passive idle expiry as the in-memory store.
pub struct PgSessionStore {
    pool: PgPool,
    idle_secs: f64,
}

impl PgSessionStore {
    pub fn new(pool: PgPool, idle: std::time::Duration) -> Self {
        Self {
            pool,
            idle_secs: idle.as_secs_f64(),
        }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn get(&self, token: &str) -> Option<SessionData> {
        // Drop the row if it idled out, then touch-and-read in one statement.
        let expired = sqlx::query(
            "DELETE FROM campus_sessions WHERE token = $1 \
             AND last_seen < now() - make_interval(secs => $2)",
        )
        .bind(token)
        .bind(self.idle_secs)
        .execute(&self.pool)
        .await;
        if let Err(e) = expired {
            tracing::warn!(error = %e, "session expiry sweep failed");
            return None;
        }

        let row = sqlx::query(
            "UPDATE campus_sessions SET last_seen = now() WHERE token = $1 RETURNING payload",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .ok()??;

        let payload: serde_json::Value = row.try_get("payload").ok()?;
        serde_json::from_value(payload).ok()
    }

    async fn put(&self, token: &str, data: SessionData) {
        let payload = match serde_json::to_value(&data) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "session payload serialization failed");
                return;
            }
        };
        let result = sqlx::query(
            "INSERT INTO campus_sessions (token, payload, last_seen) VALUES ($1, $2, now()) \
             ON CONFLICT (token) DO UPDATE SET payload = $2, last_seen = now()",
        )
        .bind(token)
        .bind(payload)
        .execute(&self.pool)
        .await;
        if let Err(e) = result {
            tracing::warn!(error = %e, "session write failed");
        }
    }

    async fn remove(&self, token: &str) {
        let result = sqlx::query("DELETE FROM campus_sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await;
        if let Err(e) = result {
            tracing::warn!(error = %e, "session removal failed");
        }
    }
}
