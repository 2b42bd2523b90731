//! Contact form validation

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ApiError, FieldError};
use crate::models::{ContactForm, ContactSubmissionRequest};

// Local part: RFC 5322 atext plus any Unicode letter, digit or mark, with dots.
// Domain: at least two labels of Unicode letters, digits and hyphens.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}\p{M}!#$%&'*+/=?^_`{|}~-]+(\.[\p{L}\p{N}\p{M}!#$%&'*+/=?^_`{|}~-]+)*@[\p{L}\p{N}]([\p{L}\p{N}\p{M}-]{0,61}[\p{L}\p{N}\p{M}])?(\.[\p{L}\p{N}]([\p{L}\p{N}\p{M}-]{0,61}[\p{L}\p{N}\p{M}])?)+$",
    )
    .expect("email pattern is valid")
});

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

/// Syntactic email check
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN {
        return false;
    }

    match email.split_once('@') {
        Some((local, _)) if local.len() <= MAX_LOCAL_PART_LEN => EMAIL_RE.is_match(email),
        _ => false,
    }
}

fn required(field: &str, value: Option<String>, errors: &mut Vec<FieldError>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        Some(_) => {
            errors.push(FieldError::new(field, "field must not be empty"));
            String::new()
        }
        None => {
            errors.push(FieldError::new(field, "field is required"));
            String::new()
        }
    }
}

impl ContactSubmissionRequest {
    /// Check every field and collect all failures
    pub fn validate(self) -> Result<ContactForm, ApiError> {
        let mut errors = Vec::new();

        let name = required("name", self.name, &mut errors);
        let email = required("email", self.email, &mut errors);
        let service = required("service", self.service, &mut errors);
        let message = required("message", self.message, &mut errors);

        if !email.is_empty() && !is_valid_email(&email) {
            errors.push(FieldError::new("email", "value is not a valid email address"));
        }

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        Ok(ContactForm {
            name,
            email,
            service,
            message,
        })
    }
}
