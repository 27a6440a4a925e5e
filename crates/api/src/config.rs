//! Process configuration, read once from the environment at startup.

use std::time::Duration;

use campus_infra::seed::DEFAULT_ADMIN_PASSWORD;

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address (`CAMPUS_BIND`).
    pub bind: String,
    /// Session idle window (`CAMPUS_SESSION_IDLE_MINUTES`).
    pub session_idle: Duration,
    /// Password for the seeded admin account (`CAMPUS_ADMIN_PASSWORD`).
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        let bind = std::env::var("CAMPUS_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let session_idle = std::env::var("CAMPUS_SESSION_IDLE_MINUTES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(|minutes| Duration::from_secs(minutes * 60))
            .unwrap_or(campus_infra::session_store::DEFAULT_IDLE);

        let admin_password = std::env::var("CAMPUS_ADMIN_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("CAMPUS_ADMIN_PASSWORD not set; using insecure dev default");
            DEFAULT_ADMIN_PASSWORD.to_string()
        });

        Self {
            bind,
            session_idle,
            admin_password,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            session_idle: campus_infra::session_store::DEFAULT_IDLE,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}
