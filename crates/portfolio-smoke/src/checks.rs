//! Smoke checks against a running Portfolio API
//!
//! Each check inspects one response and returns either a short success note
//! or the reason it failed. Transport errors count as failures.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::client::{ApiResponse, PortfolioClient};

pub const EXPECTED_GREETING: &str = "Gunjan Jagtiani Wellness Portfolio API";
pub const EXPECTED_HERO_NAME: &str = "Gunjan Jagtiani";
pub const EXPECTED_SERVICES: [&str; 4] = [
    "Yoga for Beginners",
    "Prenatal & Postnatal Yoga",
    "Sound Healing",
    "Online Wellness Sessions",
];

const PORTFOLIO_SECTIONS: [&str; 7] = [
    "hero",
    "about",
    "services",
    "experience",
    "certifications",
    "testimonials",
    "contact",
];
const SERVICE_FIELDS: [&str; 6] = ["id", "title", "description", "features", "icon", "color"];
const SUBMISSION_FIELDS: [&str; 7] = [
    "id",
    "name",
    "email",
    "service",
    "message",
    "submitted_at",
    "status",
];

pub type CheckOutcome = Result<String, String>;

/// Outcome of one named check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    pub details: String,
}

/// Collected results of a smoke run
#[derive(Debug, Default)]
pub struct Report {
    pub results: Vec<CheckResult>,
}

impl Report {
    pub fn record(&mut self, name: impl Into<String>, outcome: CheckOutcome) {
        let name = name.into();
        let (success, details) = match outcome {
            Ok(details) => (true, details),
            Err(details) => (false, details),
        };

        if success {
            info!("PASS: {}", name);
        } else {
            error!("FAIL: {}", name);
        }
        if !details.is_empty() {
            info!("   Details: {}", details);
        }

        self.results.push(CheckResult {
            name,
            success,
            details,
        });
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Percentage of passing checks; 0 when nothing ran
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.passed() as f64 / self.total() as f64 * 100.0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

fn expect_status(response: &ApiResponse, expected: u16) -> Result<(), String> {
    if response.status.as_u16() == expected {
        Ok(())
    } else {
        Err(format!(
            "Expected {}, got {}: {}",
            expected, response.status, response.body
        ))
    }
}

fn missing_keys<'a>(value: &Value, keys: &[&'a str]) -> Vec<&'a str> {
    keys.iter()
        .copied()
        .filter(|k| value.get(*k).is_none())
        .collect()
}

fn non_empty_list<'a>(value: &'a Value, section: &str) -> Result<&'a Vec<Value>, String> {
    match value.get(section).and_then(Value::as_array) {
        Some(list) if !list.is_empty() => Ok(list),
        _ => Err(format!("{} should be a non-empty list", section)),
    }
}

pub fn check_root(response: &ApiResponse) -> CheckOutcome {
    expect_status(response, 200)?;

    match response.body.get("message").and_then(Value::as_str) {
        Some(message) if message.contains(EXPECTED_GREETING) => Ok(String::new()),
        _ => Err(format!("Unexpected response: {}", response.body)),
    }
}

pub fn check_portfolio(body: &Value) -> CheckOutcome {
    let missing = missing_keys(body, &PORTFOLIO_SECTIONS);
    if !missing.is_empty() {
        return Err(format!("Missing sections: {:?}", missing));
    }

    let hero = &body["hero"];
    let missing = missing_keys(hero, &["name", "tagline", "description"]);
    if !missing.is_empty() {
        return Err(format!("Missing hero fields: {:?}", missing));
    }
    if hero["name"] != EXPECTED_HERO_NAME {
        return Err(format!("Incorrect hero name: {}", hero["name"]));
    }

    let services = non_empty_list(body, "services")?;
    for service in services {
        let missing = missing_keys(service, &SERVICE_FIELDS);
        if !missing.is_empty() {
            return Err(format!("Service missing fields: {:?}", missing));
        }
    }

    let titles: Vec<&str> = services
        .iter()
        .filter_map(|s| s["title"].as_str())
        .collect();
    if let Some(absent) = EXPECTED_SERVICES.iter().find(|t| !titles.contains(*t)) {
        return Err(format!("Missing service: {}", absent));
    }

    non_empty_list(body, "experience")?;
    non_empty_list(body, "certifications")?;
    non_empty_list(body, "testimonials")?;

    let missing = missing_keys(&body["contact"], &["title", "description", "email", "services"]);
    if !missing.is_empty() {
        return Err(format!("Missing contact fields: {:?}", missing));
    }

    Ok("All sections validated".to_string())
}

pub fn check_contact_accepted(response: &ApiResponse) -> CheckOutcome {
    expect_status(response, 200)?;
    let body = &response.body;

    let missing = missing_keys(body, &["success", "message", "id"]);
    if !missing.is_empty() {
        return Err(format!("Missing response fields: {:?}", missing));
    }
    if body["success"] != true {
        return Err(format!("success should be true: {}", body));
    }

    let id = body["id"].as_str().unwrap_or_default();
    if uuid::Uuid::parse_str(id).is_err() {
        return Err(format!("Submission id is not a UUID: {}", body["id"]));
    }

    let message = body["message"].as_str().unwrap_or_default();
    if !message.contains("Thank you for reaching out") {
        return Err(format!("Unexpected message: {}", message));
    }

    Ok(format!("Submission ID: {}", id))
}

pub fn check_rejected(response: &ApiResponse) -> CheckOutcome {
    expect_status(response, 422)?;
    Ok("Correctly rejected".to_string())
}

pub fn check_submissions(response: &ApiResponse) -> CheckOutcome {
    expect_status(response, 200)?;

    let submissions = response
        .body
        .as_array()
        .ok_or_else(|| "Response should be a list".to_string())?;

    if let Some(first) = submissions.first() {
        let missing = missing_keys(first, &SUBMISSION_FIELDS);
        if !missing.is_empty() {
            return Err(format!("Missing fields: {:?}", missing));
        }
    }

    let timestamps = submissions
        .iter()
        .map(|s| {
            s["submitted_at"]
                .as_str()
                .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
                .map(|t| t.with_timezone(&Utc))
                .ok_or_else(|| format!("Bad submitted_at: {}", s["submitted_at"]))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if timestamps.windows(2).any(|pair| pair[0] < pair[1]) {
        return Err("Submissions not sorted by newest first".to_string());
    }

    Ok(format!("Retrieved {} submissions", submissions.len()))
}

fn transport(err: anyhow::Error) -> String {
    format!("Exception: {:#}", err)
}

/// Run every check in order and collect the results
pub async fn run_all(client: &PortfolioClient) -> Report {
    let mut report = Report::default();

    info!("Running: root endpoint");
    let outcome = client
        .get("/api/")
        .await
        .map_err(transport)
        .and_then(|r| check_root(&r));
    report.record("Root endpoint returns welcome message", outcome);

    info!("Running: portfolio endpoint");
    let outcome = client
        .get("/api/portfolio")
        .await
        .map_err(transport)
        .and_then(|r| {
            expect_status(&r, 200)?;
            check_portfolio(&r.body)
        });
    report.record("Portfolio endpoint comprehensive data", outcome);

    info!("Running: contact form submission");
    let sarah = json!({
        "name": "Sarah Johnson",
        "email": "sarah.johnson@email.com",
        "service": "yoga-beginners",
        "message": "Hi Gunjan, I'm interested in starting my yoga journey and would love to learn more about your beginner classes. I'm completely new to yoga but very excited to begin this wellness journey."
    });
    let outcome = client
        .post_json("/api/contact", &sarah)
        .await
        .map_err(transport)
        .and_then(|r| check_contact_accepted(&r));
    report.record("Contact form successful submission", outcome);

    info!("Running: contact form with different services");
    for service in ["prenatal-yoga", "sound-healing", "studio-collaboration"] {
        let body = json!({
            "name": format!("Test User for {}", service),
            "email": format!("test.{}@email.com", service),
            "service": service,
            "message": format!("I'm interested in {} services. Please provide more information.", service),
        });
        let outcome = client
            .post_json("/api/contact", &body)
            .await
            .map_err(transport)
            .and_then(|r| check_contact_accepted(&r));
        report.record(format!("Contact form with service: {}", service), outcome);
    }

    info!("Running: contact form validation");
    let invalid_email = json!({
        "name": "Test User",
        "email": "invalid-email",
        "service": "yoga-beginners",
        "message": "Test message"
    });
    let outcome = client
        .post_json("/api/contact", &invalid_email)
        .await
        .map_err(transport)
        .and_then(|r| check_rejected(&r));
    report.record("Contact form invalid email validation", outcome);

    let missing_fields = json!({
        "name": "Test User",
        "email": "test@email.com"
    });
    let outcome = client
        .post_json("/api/contact", &missing_fields)
        .await
        .map_err(transport)
        .and_then(|r| check_rejected(&r));
    report.record("Contact form missing fields validation", outcome);

    info!("Running: contact submissions retrieval");
    let outcome = client
        .get("/api/contact-submissions")
        .await
        .map_err(transport)
        .and_then(|r| check_submissions(&r));
    report.record("Contact submissions retrieval", outcome);

    report
}
