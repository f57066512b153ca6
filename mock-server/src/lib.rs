use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Page size the inventory service applies to the unfiltered listing.
pub const LIST_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub ip_address: String,
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

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorDetail>)>;

fn failure(status: StatusCode, detail: &str) -> (StatusCode, Json<ErrorDetail>) {
    (
        status,
        Json(ErrorDetail {
            detail: detail.to_string(),
        }),
    )
}

/// Insertion-ordered store. IP addresses are unique.
pub type Db = Arc<RwLock<Vec<Machine>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Build the router over a store seeded with `machines`. Later duplicates of
/// an IP address are dropped.
pub fn app_with(machines: Vec<Machine>) -> Router {
    let mut seeded: Vec<Machine> = Vec::with_capacity(machines.len());
    for machine in machines {
        if seeded.iter().any(|m| m.ip_address == machine.ip_address) {
            tracing::warn!(ip_address = %machine.ip_address, "dropping duplicate seed record");
            continue;
        }
        seeded.push(machine);
    }
    let db: Db = Arc::new(RwLock::new(seeded));
    Router::new()
        .route("/remote_machines", get(list_machines).post(register_machine))
        .route(
            "/remote_machines/contact_info/{contact_info}",
            get(machines_by_contact_info),
        )
        .route("/remote_machines/{ip_address}", get(get_machine))
        .with_state(db)
}

pub async fn run_with(
    listener: TcpListener,
    machines: Vec<Machine>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(machines)).await
}

#[tracing::instrument(name = "Listing remote machines", skip(db))]
async fn list_machines(State(db): State<Db>) -> Json<Vec<Machine>> {
    let machines = db.read().await;
    Json(machines.iter().take(LIST_LIMIT).cloned().collect())
}

#[tracing::instrument(name = "Getting remote machine by ip address", skip(db))]
async fn get_machine(
    State(db): State<Db>,
    Path(ip_address): Path<String>,
) -> ApiResult<Json<Machine>> {
    let machines = db.read().await;
    machines
        .iter()
        .find(|m| m.ip_address == ip_address)
        .cloned()
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Machine not found"))
}

#[tracing::instrument(name = "Getting remote machines by contact info", skip(db))]
async fn machines_by_contact_info(
    State(db): State<Db>,
    Path(contact_info): Path<String>,
) -> Json<Vec<Machine>> {
    let machines = db.read().await;
    Json(
        machines
            .iter()
            .filter(|m| m.contact_info == contact_info)
            .cloned()
            .collect(),
    )
}

#[tracing::instrument(
    name = "Registering remote machine",
    skip(db, input),
    fields(ip_address = %input.ip_address)
)]
async fn register_machine(
    State(db): State<Db>,
    Json(input): Json<Machine>,
) -> ApiResult<(StatusCode, Json<Machine>)> {
    let mut machines = db.write().await;
    if machines.iter().any(|m| m.ip_address == input.ip_address) {
        return Err(failure(
            StatusCode::CONFLICT,
            "Remote host with the given IP address already exists",
        ));
    }
    tracing::info!("registered remote machine");
    machines.push(input.clone());
    Ok((StatusCode::CREATED, Json(input)))
}
