//! Exposition Endpoint - Prometheus Text Format over HTTP
//!
//! Renders the shared registry on every scrape and serves it via
//! axum 0.7. The listener task stops on the shutdown broadcast.

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use prometheus::{Encoder, Registry, TextEncoder};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{error, instrument};

use crate::error::{MonitorError, Result};

/// Render the registry's current state in the text exposition format.
///
/// # Errors
/// Fails if a collected family cannot be encoded.
pub fn render(registry: &Registry) -> prometheus::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Router with a single `GET path` scrape route.
///
/// Callers check `path` with `validate_path` beforehand.
pub fn metrics_router(registry: Registry, path: &str) -> Router {
    Router::new().route(path, get(scrape)).with_state(registry)
}

async fn scrape(State(registry): State<Registry>) -> Response {
    match render(&registry) {
        Ok(body) => {
            let content_type = TextEncoder::new().format_type().to_string();
            ([(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to encode metrics").into_response()
        }
    }
}

/// Serve `router` on an already-bound listener until shutdown.
///
/// # Errors
/// Returns `MonitorError::Serve` if the accept loop fails.
#[instrument(skip_all)]
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .map_err(MonitorError::Serve)
}

/// Whether `path` can be mounted as a plain route.
///
/// axum panics on paths it cannot insert, so reject them here: the path
/// must start with `/`, have no empty segments, and carry no `:` or `*`
/// capture syntax.
pub(crate) fn validate_path(path: &str) -> Result<()> {
    let valid = path.starts_with('/') && !path.contains("//") && !path.contains([':', '*']);
    if valid {
        Ok(())
    } else {
        Err(MonitorError::InvalidPath(path.to_string()))
    }
}
