use std::{iter::once, time::Duration};

use anyhow::Context;
use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{HeaderMap, Response, header::AUTHORIZATION},
};
use time::{UtcOffset, format_description::well_known::Rfc3339};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
    trace::TraceLayer,
};
use tracing::{Span, error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::utils::get_request_id;

const LOG_FILTER: &str = "info";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// JSON lines on stdout with UTC timestamps. The filter is fixed so record
/// events are always written.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .flatten_event(true)
                .with_timer(fmt::time::OffsetTime::new(UtcOffset::UTC, Rfc3339))
                .with_level(true)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .with(log_filter())
        .try_init()?;

    Ok(())
}

fn log_filter() -> EnvFilter {
    EnvFilter::new(LOG_FILTER)
}

/// Request ids, request/response tracing and `Authorization` masking around
/// the application router.
pub fn with_http_layers(router: Router) -> Router {
    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .on_request(log_request)
                .on_response(log_response),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid::default()))
        .layer(SetSensitiveRequestHeadersLayer::new(once(AUTHORIZATION)))
}

pub async fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            error!(msg = "Failed to bind listener", %addr, error = %e);
            Err(e).with_context(|| format!("could not bind {addr}"))
        }
    }
}

fn log_request(req: &Request<Body>, _span: &Span) {
    info!(
        msg = "Request initiated",
        req_id = %get_request_id(req.extensions()),
        method = %req.method(),
        uri = %req.uri(),
        headers = %describe_headers(req.headers())
    )
}

fn log_response(res: &Response<Body>, latency: Duration, _span: &Span) {
    info!(
        msg = "Request processed",
        req_id = %get_request_id(res.extensions()),
        status = %res.status().as_u16(),
        latency = ?latency
    )
}

/// `name: value` pairs joined by `; `, sensitive values masked. The request
/// id is logged on its own field and left out here.
fn describe_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .filter(|(name, _)| name.as_str() != REQUEST_ID_HEADER)
        .map(|(name, value)| {
            let value = if value.is_sensitive() {
                "******"
            } else {
                value.to_str().unwrap_or("<non-utf8>")
            };
            format!("{}: {}", name, value)
        })
        .collect::<Vec<_>>()
        .join("; ")
}
