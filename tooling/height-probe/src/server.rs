use crate::{
    check::Check,
    models::{CheckContext, EvaluationResult},
};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(std::io::Error),
}

pub type SharedCheck = Arc<dyn Check>;

/// Routes a monitoring host uses to drive the check.
///
/// A body that is not a valid [`CheckContext`] is rejected by the `Json` extractor
/// before the check runs.
pub fn router(check: SharedCheck) -> Router {
    Router::new()
        .route("/execute", post(handle_execute))
        .route("/verify", get(handle_verify))
        .with_state(check)
}

pub async fn serve(check: SharedCheck, addr: IpAddr, port: u16) -> Result<(), ServerError> {
    let addr = SocketAddr::new(addr, port);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    serve_on(listener, check).await
}

pub async fn serve_on(listener: TcpListener, check: SharedCheck) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, plugin = check.name(), "starting plugin server");
    }

    axum::serve(listener, router(check))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("plugin server stopped");
    Ok(())
}

async fn handle_execute(
    State(check): State<SharedCheck>,
    Json(context): Json<CheckContext>,
) -> Json<EvaluationResult> {
    Json(check.execute(context).await)
}

async fn handle_verify(State(check): State<SharedCheck>) -> Json<Value> {
    Json(json!({ "name": check.name() }))
}

/// Completes on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
