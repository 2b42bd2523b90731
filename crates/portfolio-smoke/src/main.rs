//! Portfolio API smoke test
//!
//! Usage: `BACKEND_URL=http://host:port portfolio-smoke`

use anyhow::Result;
use portfolio_smoke::{run_all, PortfolioClient};
use std::env;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    dotenvy::dotenv().ok();

    let backend_url =
        env::var("BACKEND_URL").unwrap_or_else(|_| "http://127.0.0.1:8001".to_string());

    let client = PortfolioClient::new(&backend_url)?;
    info!("Testing backend at: {}", client.base_url());

    let report = run_all(&client).await;

    info!("TEST SUMMARY");
    info!("Total Tests: {}", report.total());
    info!("Passed: {}", report.passed());
    info!("Failed: {}", report.failed());
    info!("Success Rate: {:.1}%", report.success_rate());

    if report.all_passed() {
        info!("All tests passed! Backend API is working correctly.");
        return Ok(ExitCode::SUCCESS);
    }

    error!("FAILED TESTS:");
    for failure in report.failures() {
        error!("  - {}: {}", failure.name, failure.details);
    }

    Ok(ExitCode::FAILURE)
}
