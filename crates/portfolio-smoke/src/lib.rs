//! Smoke test for a deployed Portfolio API
//!
//! Exercises every public endpoint over HTTP and reports which checks pass.

pub mod checks;
pub mod client;

pub use checks::{run_all, CheckResult, Report};
pub use client::{ApiResponse, PortfolioClient};
