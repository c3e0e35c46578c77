//! # Matchmaker Common Library
//!
//! Shared code for the matchmaker microservices including:
//! - Birth profile value type and inbound validation
//! - Report key (profile fingerprint) derivation
//! - API request/response wire types
//! - Common error type
//! - Tracing bootstrap and graceful shutdown signal

pub mod api;
pub mod error;
pub mod key;
pub mod logging;
pub mod profile;
pub mod shutdown;

pub use error::{Error, Result};
pub use key::ReportKey;
pub use profile::BirthProfile;

/// Report payloads are opaque, immutable byte blobs
pub type ReportPayload = axum::body::Bytes;
