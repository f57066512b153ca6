//! Domain DTOs for the remote machines API.
//!
//! # Design
//! The inventory service returns more columns than the viewer displays (an
//! `id`, ssh settings on some deployments). Unknown fields are ignored so the
//! client keeps decoding as the server schema grows. These types are defined
//! independently from the mock-server crate; integration tests catch drift.

use serde::{Deserialize, Serialize};

/// A single remote machine record, keyed by its IP address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Machine {
    pub ip_address: String,
    /// Nullable on the server side; absent and `null` both decode to `None`.
    #[serde(default)]
    pub description: Option<String>,
    pub contact_info: String,
}

impl Machine {
    pub fn new(ip_address: &str, description: &str, contact_info: &str) -> Self {
        Self {
            ip_address: ip_address.to_string(),
            description: Some(description.to_string()),
            contact_info: contact_info.to_string(),
        }
    }
}

/// Body of a failure response. Only `detail` is read.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}
