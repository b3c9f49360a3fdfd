use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routes::Router;

/// Binds the configured address and runs the accept loop forever.
pub async fn run(cfg: Config) -> anyhow::Result<()> {
    if let Some(dir) = &cfg.files_dir {
        tokio::fs::create_dir_all(dir).await?;
        info!("Serving files from {}", dir.display());
    }

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    serve(listener, cfg).await
}

/// Accept loop over an already-bound listener.
///
/// Each accepted connection gets its own spawned task and its own router;
/// nothing is shared between connections. A slow client holds its task
/// indefinitely, it never blocks the accept loop or other connections.
pub async fn serve(listener: TcpListener, cfg: Config) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let router = Router::new(cfg.files_dir.clone());
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
