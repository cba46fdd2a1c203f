//! HTTP server entry point for the registry API.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::storage::Storage;

use super::{router, ApiState};

/// Run the API server until it is shut down.
///
/// The storage handle must already be open; an unreachable store is treated
/// as a fatal startup failure by the caller, before this point.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(config: &Config, storage: Storage) -> Result<()> {
    let state = Arc::new(ApiState::new(storage));
    let app = router(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
