//! Data models for the Portfolio API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status assigned to every new submission
pub const STATUS_NEW: &str = "new";

/// Reply sent after a successful contact submission
pub const THANK_YOU_MESSAGE: &str =
    "Thank you for reaching out! I'll get back to you within 24 hours.";

/// Greeting returned by `GET /api/`
pub const API_GREETING: &str = "Gunjan Jagtiani Wellness Portfolio API";

/// Persisted contact-form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    /// Server-generated UUID
    pub id: String,

    pub name: String,
    pub email: String,

    /// Service the visitor asked about; free-form
    pub service: String,

    pub message: String,

    /// When the submission was received (UTC)
    pub submitted_at: DateTime<Utc>,

    /// Follow-up status, always "new" on creation
    pub status: String,
}

impl ContactSubmission {
    /// Create a new submission record from a validated form
    pub fn new(form: ContactForm) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: form.name,
            email: form.email,
            service: form.service,
            message: form.message,
            submitted_at: Utc::now(),
            status: STATUS_NEW.to_string(),
        }
    }
}

/// Contact form body as received on the wire
///
/// Every field is optional here so that a missing field is reported by
/// validation alongside the other field errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmissionRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
}

/// Contact form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub service: String,
    pub message: String,
}

/// Response from a contact submission
#[derive(Debug, Serialize)]
pub struct ContactSubmissionResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}

/// Plain message payload
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Sarah Johnson".to_string(),
            email: "sarah.johnson@email.com".to_string(),
            service: "yoga-beginners".to_string(),
            message: "Hi Gunjan".to_string(),
        }
    }

    #[test]
    fn test_new_submission_defaults() {
        let before = Utc::now();
        let submission = ContactSubmission::new(form());

        assert_eq!(submission.status, "new");
        assert!(Uuid::parse_str(&submission.id).is_ok());
        assert!(submission.submitted_at >= before);
        assert_eq!(submission.service, "yoga-beginners");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ContactSubmission::new(form());
        let b = ContactSubmission::new(form());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_submission_wire_format() {
        let submission = ContactSubmission::new(form());
        let json = serde_json::to_value(&submission).unwrap();

        for field in ["id", "name", "email", "service", "message", "submitted_at", "status"] {
            assert!(json.get(field).is_some(), "missing field {}", field);
        }

        let parsed: ContactSubmission = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, submission);
    }

    #[test]
    fn test_request_tolerates_missing_fields() {
        let request: ContactSubmissionRequest =
            serde_json::from_str(r#"{"name": "Test User", "email": "test@email.com"}"#).unwrap();

        assert_eq!(request.name.as_deref(), Some("Test User"));
        assert!(request.service.is_none());
        assert!(request.message.is_none());
    }
}
