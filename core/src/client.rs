//! Stateless HTTP request builder and response parser for the machines API.
//!
//! # Design
//! `MachineClient` holds only a `base_url` and carries no mutable state between
//! calls. Each query is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! caller executes the actual HTTP round-trip.
//!
//! Path parameters are interpolated as typed. The client does not validate IP
//! addresses or contact strings; the server rejects what it cannot route. The
//! assembled URL is normalized the way a browser parses it: bytes that are
//! illegal in a path (spaces, quotes, non-ASCII) are percent-encoded and
//! everything else, including `/`, `@` and `.`, is left alone.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Machine;

/// Address of the inventory service when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Synchronous, stateless client for the remote machines API.
#[derive(Debug, Clone)]
pub struct MachineClient {
    base_url: String,
}

impl Default for MachineClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl MachineClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_machine_by_ip_address(&self, ip_address: &str) -> HttpRequest {
        self.get(&format!("/remote_machines/{ip_address}"))
    }

    pub fn build_get_machines_by_contact_info(&self, contact_info: &str) -> HttpRequest {
        self.get(&format!("/remote_machines/contact_info/{contact_info}"))
    }

    pub fn build_get_all_machines(&self) -> HttpRequest {
        self.get("/remote_machines")
    }

    pub fn parse_get_machine_by_ip_address(
        &self,
        response: HttpResponse,
    ) -> Result<Machine, ApiError> {
        decode(response)
    }

    pub fn parse_get_machines_by_contact_info(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Machine>, ApiError> {
        decode(response)
    }

    pub fn parse_get_all_machines(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Machine>, ApiError> {
        decode(response)
    }

    fn get(&self, path: &str) -> HttpRequest {
        let raw = format!("{}{path}", self.base_url);
        // An unparseable base is passed through; the transport reports it.
        let url = Url::parse(&raw).map(String::from).unwrap_or(raw);
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
        }
    }
}

/// Unwrap a 2xx body into `T`, or map the failure status to an `ApiError`.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_response(&response));
    }
    serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))
}
