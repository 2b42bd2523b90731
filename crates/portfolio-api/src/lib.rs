//! Portfolio API Service
//!
//! Backend for the wellness portfolio site: serves the static portfolio
//! document and stores contact-form submissions.
//!
//! ## Endpoints
//!
//! - `GET /api/` - API greeting
//! - `GET /api/portfolio` - Full portfolio document
//! - `POST /api/contact` - Submit the contact form
//! - `GET /api/contact-submissions` - Latest 100 submissions, newest first
//! - `GET /health` - Health check

pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod models;
pub mod storage;
pub mod validation;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{Config, StorageBackend};
pub use content::PortfolioContent;
pub use error::{ApiError, FieldError};
pub use handlers::AppState;
pub use models::{ContactSubmission, ContactSubmissionRequest};
pub use storage::{MemoryStore, RedisStore, SubmissionStore};

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api", get(handlers::root_handler))
        .route("/api/", get(handlers::root_handler))
        .route("/api/portfolio", get(handlers::portfolio_handler))
        .route("/api/contact", post(handlers::submit_contact_handler))
        .route(
            "/api/contact-submissions",
            get(handlers::list_submissions_handler),
        )
        .with_state(shared_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
