//! API request handlers for the Portfolio API

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::{
    content::PortfolioContent,
    error::ApiError,
    models::{
        ContactSubmission, ContactSubmissionRequest, ContactSubmissionResponse, MessageResponse,
        API_GREETING, THANK_YOU_MESSAGE,
    },
    storage::SubmissionStore,
};

/// Maximum number of submissions returned by the listing endpoint
pub const SUBMISSION_LIST_LIMIT: usize = 100;

/// Shared application state
pub struct AppState {
    /// Read-only portfolio document
    pub content: PortfolioContent,

    pub store: Arc<dyn SubmissionStore>,
}

impl AppState {
    pub fn new(content: PortfolioContent, store: Arc<dyn SubmissionStore>) -> Self {
        Self { content, store }
    }
}

/// Health check endpoint
pub async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .store
        .health_check()
        .await
        .map_err(ApiError::Unavailable)?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": "portfolio-api"
    })))
}

/// API greeting
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: API_GREETING.to_string(),
    })
}

/// Full portfolio document
pub async fn portfolio_handler(State(state): State<Arc<AppState>>) -> Json<PortfolioContent> {
    Json(state.content.clone())
}

/// Validate and store a contact form submission
pub async fn submit_contact_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactSubmissionRequest>, JsonRejection>,
) -> Result<Json<ContactSubmissionResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidBody {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;

    let form = request.validate()?;
    let submission = ContactSubmission::new(form);

    info!(
        "Contact submission {} for service: {}",
        submission.id, submission.service
    );

    state.store.insert(&submission).await?;

    Ok(Json(ContactSubmissionResponse {
        success: true,
        message: THANK_YOU_MESSAGE.to_string(),
        id: submission.id,
    }))
}

/// Most recent contact submissions, newest first
pub async fn list_submissions_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContactSubmission>>, ApiError> {
    info!("Listing contact submissions");

    let submissions = state.store.list_recent(SUBMISSION_LIST_LIMIT).await?;

    Ok(Json(submissions))
}
