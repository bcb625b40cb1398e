use std::sync::Arc;

use box_server::config::Config;
use box_server::routing::Router;
use box_server::server;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime.worker_threads(workers);
    }
    let runtime = runtime.build()?;

    // Routes are registered before the first connection is accepted.
    let router = Arc::new(Router::with_landing_page());

    runtime.block_on(async {
        tokio::select! {
            res = server::listener::run(&cfg, router) => {
                res?;
            }

            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
            }
        }

        Ok::<(), anyhow::Error>(())
    })
}
