use anyhow::Context;
use mock_server::Machine;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn load_seed(path: &str) -> anyhow::Result<Vec<Machine>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading seed file {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing seed file {path}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let machines = match std::env::var("SEED_FILE") {
        Ok(path) => load_seed(&path)?,
        Err(_) => Vec::new(),
    };

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, seeded = machines.len(), "listening");
    mock_server::run_with(listener, machines).await?;
    Ok(())
}
