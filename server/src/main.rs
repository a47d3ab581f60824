use std::sync::Arc;

use todo_core::TodoStore;
use todo_server::{telemetry, AppState, ServerConfig, ServerError};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;
    telemetry::init_tracing(config.log_json);

    let store = Arc::new(TodoStore::seeded());
    let state = AppState::new(store).with_public_url(config.public_url.clone());

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, public_url = ?config.public_url, "listening");
    todo_server::run(listener, state, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "could not install ctrl-c handler; running until killed");
        std::future::pending::<()>().await;
    }
}
