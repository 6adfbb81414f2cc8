use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Request, State},
    http::{
        HeaderName, HeaderValue, Method, StatusCode,
        header::{HOST, ORIGIN},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use crate::config::CorsSettings;

#[derive(Clone, Debug)]
pub struct AllowedOrigins(Arc<[HeaderValue]>);

impl AllowedOrigins {
    pub fn from_settings(settings: &CorsSettings) -> anyhow::Result<Self> {
        let origins = settings
            .allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin {o:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self(origins.into()))
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|o| o == origin)
    }
}

/// `Origin` equal to `http://<host>` or `https://<host>` for the request's own
/// host. Falls back to the URI authority when no `Host` header is sent.
fn is_same_origin(req: &Request, origin: &HeaderValue) -> bool {
    let host = req
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()));

    let (Some(host), Ok(origin)) = (host, origin.to_str()) else {
        return false;
    };

    origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .is_some_and(|rest| rest == host)
}

/// Answers `403` to any cross-origin request whose `Origin` is outside the
/// allowlist, preflight included. Requests without `Origin`, or whose
/// `Origin` is the request's own host, are not cross-origin and pass.
pub async fn reject_disallowed_origin(
    State(allowed): State<AllowedOrigins>,
    req: Request,
    next: Next,
) -> Response {
    let foreign = req
        .headers()
        .get(ORIGIN)
        .filter(|o| !allowed.contains(o) && !is_same_origin(&req, o));

    if let Some(origin) = foreign {
        info!(
            msg = "Rejecting cross-origin request",
            origin = origin.to_str().unwrap_or("<non-utf8>"),
            method = %req.method(),
            uri = %req.uri()
        );

        return StatusCode::FORBIDDEN.into_response();
    }

    next.run(req).await
}

/// Build the allowlist CORS layer. Origins are matched exactly.
pub fn cors_layer(settings: &CorsSettings) -> anyhow::Result<CorsLayer> {
    let origins = AllowedOrigins::from_settings(settings)?.0.to_vec();

    let methods = settings
        .allowed_methods
        .iter()
        .map(|m| {
            Method::from_bytes(m.as_bytes()).with_context(|| format!("invalid CORS method {m:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let headers = settings
        .allowed_headers
        .iter()
        .map(|h| {
            HeaderName::from_bytes(h.as_bytes())
                .with_context(|| format!("invalid CORS header {h:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(methods)
        .allow_headers(headers))
}
