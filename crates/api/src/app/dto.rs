//! Request DTOs that do not map one-to-one onto a domain draft.
//!
//! Simple create/edit bodies deserialize straight into the domain draft
//! types (`CategoryDraft`, `StudentDraft`, ...); only the shapes that need
//! API-side resolution live here.

use chrono::NaiveDate;
use serde::Deserialize;

use campus_core::StudentId;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Course create/edit body. Carries the category *name*; the service
/// resolves it to an id and rejects unknown names with a field error.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseRequest {
    pub name: String,
    pub description: Option<String>,
    pub category_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub vote: i32,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddStudentRequest {
    pub student_id: StudentId,
}
