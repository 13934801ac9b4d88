//! Request-level logging, request IDs, and parent trace extraction.

mod ids;
mod parent_context;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Paths that are scraped too often to be worth a span.
const UNTRACED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id = ids::resolve_request_id(req.header::<String>(ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let route = spans::route_template(&path);
    let _in_flight_request = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %format!("{method} {route}"),
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        route = %route,
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent_context) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent_context)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let duration = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);

    metrics::observe_request(&method, &route, status.as_u16(), duration.as_secs_f64());

    log_completion(&span, status, duration.as_millis());
}

fn log_completion(span: &Span, status: StatusCode, duration_ms: u128) {
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        if status.is_server_error() {
            error!(status = status.as_u16(), duration_ms, "request failed");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), duration_ms, "request rejected");
        } else {
            info!(status = status.as_u16(), duration_ms, "request completed");
        }

        if duration_ms > threshold_ms {
            warn!(duration_ms, threshold_ms, "slow request detected");
        }
    });
}
