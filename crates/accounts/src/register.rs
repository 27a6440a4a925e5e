use core::str::FromStr;

use serde::Deserialize;

use campus_auth::Role;
use campus_core::{DomainResult, FieldErrors};

const PASSWORD_SPECIALS: &str = "@&#$!%*?&";

/// A registration form submission.
///
/// Validation is collected per field so every problem surfaces on the form
/// at once and the submitted input survives for correction. Only the
/// Student and Teacher roles may self-register; Admin accounts exist solely
/// through seeding.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub address: Option<String>,
    pub role: String,
}

impl Registration {
    /// Validate the form and resolve the requested role.
    pub fn validate(&self) -> DomainResult<Role> {
        let mut errors = FieldErrors::new();

        let username = self.username.trim();
        if username.is_empty() {
            errors.push("username", "Username is required");
        } else if username.len() < 3 || username.len() > 60 {
            errors.push("username", "Username must be between 3 and 60 characters");
        }

        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            errors.push("full_name", "Full Name is required");
        } else if full_name.len() > 100 {
            errors.push("full_name", "Full Name must be less than 100 characters");
        }

        if self.email.trim().is_empty() {
            errors.push("email", "Email is required");
        } else if !email_looks_valid(self.email.trim()) {
            errors.push("email", "Invalid email format");
        }

        if self.password.is_empty() {
            errors.push("password", "Password is required");
        } else if self.password.len() < 6 || self.password.len() > 100 {
            errors.push("password", "Password must be between 6 and 100 characters");
        } else if !password_meets_policy(&self.password) {
            errors.push(
                "password",
                "Password must contain at least one uppercase letter, one number, \
                 and one special character (@, &, #, $, !, %, *, ?)",
            );
        }

        if self.confirm_password != self.password {
            errors.push("confirm_password", "Passwords do not match");
        }

        if !phone_is_ten_digits(&self.phone) {
            errors.push("phone", "Phone number must be 10 digits");
        }

        // Role parses against the closed set, then narrows further: only the
        // two self-service roles are registrable.
        let role = match Role::from_str(self.role.trim()) {
            Ok(role @ (Role::Student | Role::Teacher)) => Some(role),
            Ok(Role::Admin) | Err(_) => {
                errors.push("role", "Only Student or Teacher roles can be registered");
                None
            }
        };

        errors.into_result()?;
        match role {
            Some(role) => Ok(role),
            // Unreachable: a None role always pushes a field error above.
            None => Err(campus_core::DomainError::validation(
                "role",
                "Only Student or Teacher roles can be registered",
            )),
        }
    }
}

fn email_looks_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && !domain.starts_with('.') && domain.contains('.')
}

fn phone_is_ten_digits(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

fn password_meets_policy(password: &str) -> bool {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    has_upper && has_digit && has_special
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::DomainError;

    fn form() -> Registration {
        Registration {
            username: "alice".to_string(),
            full_name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
            password: "Secret1!".to_string(),
            confirm_password: "Secret1!".to_string(),
            phone: "0123456789".to_string(),
            address: None,
            role: "Student".to_string(),
        }
    }

    fn field_names(err: DomainError) -> Vec<String> {
        let DomainError::Validation(fields) = err else {
            panic!("expected validation error, got {err:?}");
        };
        fields.iter().map(|f| f.field.clone()).collect()
    }

    #[test]
    fn valid_student_registration_resolves_role() {
        assert_eq!(form().validate().unwrap(), Role::Student);
    }

    #[test]
    fn valid_teacher_registration_resolves_role() {
        let mut f = form();
        f.role = "Teacher".to_string();
        assert_eq!(f.validate().unwrap(), Role::Teacher);
    }

    #[test]
    fn admin_role_is_rejected_with_a_field_error() {
        let mut f = form();
        f.role = "Admin".to_string();
        assert_eq!(field_names(f.validate().unwrap_err()), vec!["role"]);
    }

    #[test]
    fn unknown_role_is_rejected_like_admin() {
        let mut f = form();
        f.role = "Superuser".to_string();
        assert_eq!(field_names(f.validate().unwrap_err()), vec!["role"]);
    }

    #[test]
    fn weak_passwords_are_rejected() {
        for weak in ["secret1!", "Secretx!", "Secret12", "S1!"] {
            let mut f = form();
            f.password = weak.to_string();
            f.confirm_password = weak.to_string();
            assert!(
                field_names(f.validate().unwrap_err()).contains(&"password".to_string()),
                "{weak:?} should fail the password policy"
            );
        }
    }

    #[test]
    fn mismatched_confirmation_is_a_field_error() {
        let mut f = form();
        f.confirm_password = "Other1!x".to_string();
        assert_eq!(field_names(f.validate().unwrap_err()), vec!["confirm_password"]);
    }

    #[test]
    fn every_broken_field_is_reported_at_once() {
        let f = Registration {
            username: "ab".to_string(),
            full_name: "".to_string(),
            email: "nope".to_string(),
            password: "short".to_string(),
            confirm_password: "different".to_string(),
            phone: "123".to_string(),
            address: None,
            role: "Admin".to_string(),
        };

        let named = field_names(f.validate().unwrap_err());
        for field in ["username", "full_name", "email", "password", "confirm_password", "phone", "role"] {
            assert!(named.contains(&field.to_string()), "missing {field}");
        }
    }
}
