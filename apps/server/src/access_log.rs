//! Structured access logging.
//!
//! One event per request carrying the remote identity, the request line and
//! the full response (status and body), plus the `http_requests_total`
//! counter. The response body is buffered; every response this server
//! produces is a small JSON document.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use metrics::increment_counter;
use tracing::info;

use crate::main_lib::AppState;

pub async fn record(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let remote = remote_identity(&state, request.headers(), request.extensions().get());

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let status = parts.status.as_u16().to_string();
    let request_line = format!("{} {}", method, uri);

    info!(
        target: "access_log",
        remote = %remote,
        request = %request_line,
        status = %status,
        response = %String::from_utf8_lossy(&bytes),
    );
    increment_counter!(
        "http_requests_total",
        "code" => status,
        "method" => method.to_string()
    );

    Response::from_parts(parts, Body::from(bytes))
}

/// Remote identity: the configured client-IP header when present, the
/// socket address otherwise.
fn remote_identity(
    state: &AppState,
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> String {
    if let Some(header) = &state.client_ip_header {
        let values: Vec<&str> = headers
            .get_all(header)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        if !values.is_empty() {
            return values.join(",");
        }
    }
    connect_info
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
