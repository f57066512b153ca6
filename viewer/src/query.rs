//! The three queries the view can dispatch.

use machines_core::{ApiError, HttpRequest, Machine, MachineClient};

use crate::transport::Transport;

/// Which button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    ByIpAddress,
    ByContactInfo,
    All,
}

/// A query with its input captured at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    ByIpAddress(String),
    ByContactInfo(String),
    All,
}

impl Query {
    pub fn build(&self, client: &MachineClient) -> HttpRequest {
        match self {
            Query::ByIpAddress(ip) => client.build_get_machine_by_ip_address(ip),
            Query::ByContactInfo(contact) => client.build_get_machines_by_contact_info(contact),
            Query::All => client.build_get_all_machines(),
        }
    }

    /// Run the full round trip. A single-record lookup is returned as a
    /// one-element list so every query replaces the table the same way.
    pub fn fetch(
        &self,
        client: &MachineClient,
        transport: &dyn Transport,
    ) -> Result<Vec<Machine>, ApiError> {
        let response = transport.execute(&self.build(client))?;
        match self {
            Query::ByIpAddress(_) => client
                .parse_get_machine_by_ip_address(response)
                .map(|machine| vec![machine]),
            Query::ByContactInfo(_) => client.parse_get_machines_by_contact_info(response),
            Query::All => client.parse_get_all_machines(response),
        }
    }
}
