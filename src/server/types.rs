//! Response types for the status server.
//!
//! These define the wire format of the polling API. The status body is
//! the published snapshot itself (`PublishedStatus`), re-exported here
//! so clients and handlers agree on one shape.

use serde::{Deserialize, Serialize};

pub use crate::status::PublishedStatus;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Server status (always "ok" when healthy)
    pub status: String,
    /// Server version from Cargo.toml
    pub version: String,
    /// Startup timestamp in RFC 3339 format
    pub started_at: String,
}

impl HealthResponse {
    /// Create a healthy response with the current package version
    pub fn healthy(started_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: started_at.to_rfc3339(),
        }
    }
}
