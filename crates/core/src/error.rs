//! Domain error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Field-level validation messages, keyed by the originating form field.
///
/// Collected rather than fail-fast so a caller can surface every problem on
/// the form at once and keep the submitted input for correction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

/// One field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Single-field shorthand for the common one-error case.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Finish a validation pass: `Ok(())` when nothing was collected.
    pub fn into_result(self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic business failures. Transport concerns
/// (status codes, redirects) belong to the API boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Structural or business-rule validation failed; messages are per field.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The target record is absent or already soft-deleted.
    #[error("not found")]
    NotFound,

    /// Deletion blocked because live records still reference the target.
    #[error("in use: {0}")]
    InUse(String),

    /// The storage layer rejected a write as a duplicate (unique backstop).
    /// Retryable from the caller's point of view.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// The storage layer failed; the record keeps its prior durable state.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }

    pub fn in_use(msg: impl Into<String>) -> Self {
        Self::InUse(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
