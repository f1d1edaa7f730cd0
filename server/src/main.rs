use std::{net::SocketAddr, sync::Arc};

use countdown_server::{EventBook, ServerConfig};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let book = match &config.data_file {
        Some(path) => EventBook::open(path).await?,
        None => EventBook::in_memory(),
    };
    let app = countdown_server::service(Arc::new(RwLock::new(book)), &config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("server running on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
