use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use super::capture::{capture, capture_sized, CapturedBody};
use super::format::RequestRecord;
use super::params::RequestParams;
use crate::aspect::LOG_TARGET;
use crate::config::{DetailLevel, LogConfig};
use crate::error::HandlerFailure;
use crate::metrics;

/// Request logging middleware.
///
/// Attach it per route with `route_layer` so only opted-in handlers are
/// logged:
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use axum::{middleware::from_fn_with_state, routing::get, Router};
/// use weblog::{config::LogConfig, middleware::web_log};
///
/// let config = Arc::new(LogConfig::default());
/// let app: Router = Router::new()
///     .route("/items", get(|| async { "OK" }))
///     .route_layer(from_fn_with_state(config, web_log));
/// ```
///
/// Writes one line per request at the configured [`DetailLevel`]. The
/// response is returned as the handler produced it.
pub async fn web_log(
    State(config): State<Arc<LogConfig>>,
    request: Request,
    next: Next,
) -> Response {
    if !config.enabled {
        return next.run(request).await;
    }

    let start = Instant::now();
    let level = config.detailing;

    let method = request.method().clone();
    let uri = request.uri().path().to_owned();
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let (request, params) = match level {
        DetailLevel::Full => collect_params(request, config.max_body_bytes).await,
        _ => (request, RequestParams::new()),
    };

    let response = next.run(request).await;
    let elapsed = start.elapsed();

    let failure = response
        .extensions()
        .get::<HandlerFailure>()
        .map(|failure| failure.message.clone());
    let elapsed = failure.is_none().then_some(elapsed);

    let (response, body) = match level {
        DetailLevel::Full => {
            let (parts, body) = response.into_parts();
            let (body, captured) = capture_sized(body, config.max_body_bytes).await;
            if captured == CapturedBody::Failed {
                warn!(target: LOG_TARGET, uri = %uri, "Failed to read response body");
            }
            (Response::from_parts(parts, body), Some(captured))
        }
        _ => (response, None),
    };

    let record = RequestRecord {
        timestamp: chrono::Local::now().naive_local(),
        method,
        uri,
        params,
        remote_addr,
        status: response.status(),
        body,
        elapsed,
    };

    info!(
        target: LOG_TARGET,
        method = %record.method,
        uri = %record.uri,
        status = record.status.as_u16(),
        error = failure.as_deref(),
        "{}",
        record.render(level)
    );
    metrics::record_request_logged(level, record.elapsed);

    response
}

/// Query parameters, then form fields when the body is urlencoded and no
/// larger than `limit`. The body is re-attached unchanged.
async fn collect_params(request: Request, limit: usize) -> (Request, RequestParams) {
    let mut params = RequestParams::new();
    if let Some(query) = request.uri().query() {
        params.extend_urlencoded(query.as_bytes());
    }

    if !is_form(request.headers()) {
        return (request, params);
    }

    let (parts, body) = request.into_parts();
    let (body, captured) = capture(body, limit).await;
    match &captured {
        CapturedBody::Text(text) => params.extend_urlencoded(text.as_bytes()),
        CapturedBody::Failed => {
            warn!(target: LOG_TARGET, uri = %parts.uri.path(), "Failed to read form body")
        }
        CapturedBody::Streaming | CapturedBody::TooLarge(_) => {}
    }
    (Request::from_parts(parts, body), params)
}

/// Media types compare case-insensitively and may carry parameters.
fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media_type| {
            media_type
                .trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}
