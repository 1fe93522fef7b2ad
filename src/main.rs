use player_proxy::api::sleeper::SleeperApi;
use player_proxy::{build_router, PlayerService};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing with level taken from the environment
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Sleeper player data proxy");

    let service = Arc::new(PlayerService::new(Arc::new(SleeperApi::new())));
    let app = build_router(service);

    let addr = resolve_bind_addr()?;
    info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    Ok(())
}

fn resolve_bind_addr() -> Result<SocketAddr, Box<dyn Error>> {
    let host = std::env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port).parse()?;
    Ok(addr)
}
