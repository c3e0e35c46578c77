//! HTTP API handlers for mm-match

pub mod analysis;
pub mod health;

pub use analysis::create_analysis;
pub use health::health_routes;
