//! HTTP API handlers for mm-report

pub mod health;
pub mod reports;

pub use health::health_routes;
pub use reports::{create_report, REPORT_SOURCE_HEADER};
