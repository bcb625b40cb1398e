use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::{Config, ConnectionConfig};
use crate::http::connection::Connection;
use crate::routing::router::Router;

/// Pause after a failed `accept` so persistent errors (e.g. EMFILE) do not spin.
pub const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Binds the configured address and serves connections with `router`.
pub async fn run(cfg: &Config, router: Arc<Router>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Server running on {}", listener.local_addr()?);

    serve(listener, router, cfg.connection.clone()).await
}

/// Accept loop over an already bound listener.
///
/// Every accepted socket gets its own task; a failing connection only
/// ends that task.
pub async fn serve(
    listener: TcpListener,
    router: Arc<Router>,
    conn_cfg: ConnectionConfig,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!(error = %e, delay = ?ACCEPT_ERROR_BACKOFF, "Failed to accept connection");
                tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        let conn_cfg = conn_cfg.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router, conn_cfg);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
