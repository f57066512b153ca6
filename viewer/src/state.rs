//! View state owned by the event loop.
//!
//! # Design
//! `ViewState` holds the two input fields, the displayed records and the
//! current error. It is mutated only through the methods below, from one
//! thread. Completed queries are applied in the order they resolve, with no
//! sequence guard: a slow response to an older query overwrites the result of
//! a newer one that resolved first.

use machines_core::{ApiError, Machine};

use crate::query::{Query, QueryKind};

/// Message shown for every failed query.
pub const QUERY_ERROR_MESSAGE: &str = "An error occurred";

/// Display form of a failed query.
///
/// Transport failures carry neither `status` nor `data`. Server failures carry
/// the status and, when the body had one, its `detail` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub message: String,
    pub status: Option<u16>,
    pub data: Option<String>,
}

impl From<&ApiError> for QueryError {
    fn from(err: &ApiError) -> Self {
        Self {
            message: QUERY_ERROR_MESSAGE.to_string(),
            status: err.status(),
            data: err.detail().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    ip_address: String,
    contact_info: String,
    machines: Vec<Machine>,
    error: Option<QueryError>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn contact_info(&self) -> &str {
        &self.contact_info
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn error(&self) -> Option<&QueryError> {
        self.error.as_ref()
    }

    pub fn set_ip_address(&mut self, value: String) {
        self.ip_address = value;
    }

    pub fn set_contact_info(&mut self, value: String) {
        self.contact_info = value;
    }

    /// Snapshot the input the query needs at the moment it is dispatched.
    pub fn query(&self, kind: QueryKind) -> Query {
        match kind {
            QueryKind::ByIpAddress => Query::ByIpAddress(self.ip_address.clone()),
            QueryKind::ByContactInfo => Query::ByContactInfo(self.contact_info.clone()),
            QueryKind::All => Query::All,
        }
    }

    /// Apply a resolved query.
    ///
    /// Success replaces `machines` wholesale and clears the error. Failure
    /// replaces the error and leaves `machines` as it was.
    pub fn apply(&mut self, outcome: &Result<Vec<Machine>, ApiError>) {
        match outcome {
            Ok(machines) => {
                self.machines = machines.clone();
                self.error = None;
            }
            Err(err) => {
                self.error = Some(QueryError::from(err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found(detail: &str) -> ApiError {
        ApiError::NotFound {
            detail: Some(detail.to_string()),
            body: format!(r#"{{"detail":"{detail}"}}"#),
        }
    }

    #[test]
    fn starts_empty() {
        let state = ViewState::new();
        assert_eq!(state.ip_address(), "");
        assert_eq!(state.contact_info(), "");
        assert!(state.machines().is_empty());
        assert!(state.error().is_none());
    }

    #[test]
    fn query_captures_current_input() {
        let mut state = ViewState::new();
        state.set_ip_address("10.0.0.1".to_string());
        state.set_contact_info("ops".to_string());
        let by_ip = state.query(QueryKind::ByIpAddress);
        state.set_ip_address("10.0.0.2".to_string());

        assert_eq!(by_ip, Query::ByIpAddress("10.0.0.1".to_string()));
        assert_eq!(
            state.query(QueryKind::ByContactInfo),
            Query::ByContactInfo("ops".to_string())
        );
        assert_eq!(state.query(QueryKind::All), Query::All);
    }

    #[test]
    fn success_replaces_machines_and_clears_error() {
        let mut state = ViewState::new();
        state.apply(&Err(not_found("gone")));
        assert!(state.error().is_some());

        let machines = vec![Machine::new("10.0.0.1", "edge", "a@b.com")];
        state.apply(&Ok(machines.clone()));
        assert_eq!(state.machines(), machines.as_slice());
        assert!(state.error().is_none());
    }

    #[test]
    fn failure_keeps_machines() {
        let mut state = ViewState::new();
        let machines = vec![
            Machine::new("10.0.0.1", "edge", "ops"),
            Machine::new("10.0.0.2", "core", "ops"),
        ];
        state.apply(&Ok(machines.clone()));
        state.apply(&Err(not_found("not found")));

        assert_eq!(state.machines(), machines.as_slice());
        assert_eq!(
            state.error(),
            Some(&QueryError {
                message: "An error occurred".to_string(),
                status: Some(404),
                data: Some("not found".to_string()),
            })
        );
    }

    #[test]
    fn newer_error_replaces_older() {
        let mut state = ViewState::new();
        state.apply(&Err(not_found("first")));
        state.apply(&Err(ApiError::Transport("connection refused".to_string())));

        let error = state.error().unwrap();
        assert_eq!(error.status, None);
        assert_eq!(error.data, None);
    }

    #[test]
    fn last_resolved_wins() {
        let mut state = ViewState::new();
        let older = vec![Machine::new("10.0.0.1", "old", "ops")];
        let newer = vec![Machine::new("10.0.0.2", "new", "ops")];

        // Newer query resolves first, the stale one lands after it.
        state.apply(&Ok(newer));
        state.apply(&Ok(older.clone()));
        assert_eq!(state.machines(), older.as_slice());
    }

    #[test]
    fn decode_failure_has_no_status_or_detail() {
        let err = ApiError::DeserializationError("expected value".to_string());
        let error = QueryError::from(&err);
        assert_eq!(error.message, QUERY_ERROR_MESSAGE);
        assert_eq!(error.status, None);
        assert_eq!(error.data, None);
    }

    #[test]
    fn server_error_without_detail() {
        let err = ApiError::HttpError {
            status: 502,
            detail: None,
            body: "Bad Gateway".to_string(),
        };
        let error = QueryError::from(&err);
        assert_eq!(error.status, Some(502));
        assert_eq!(error.data, None);
    }
}
