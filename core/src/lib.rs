//! Synchronous API client core for the remote machines inventory service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `MachineClient` is stateless. It holds only `base_url`.
//! - Each query is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Every non-2xx response becomes an `ApiError` carrying the status and the
//!   server's `detail` field; nothing is retried or cached.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::{MachineClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::Machine;
