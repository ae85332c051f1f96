//! Request logging middleware and fixed response headers.

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, header},
    middleware::Next,
    response::Response,
};
use nanoid::nanoid;
use std::time::Instant;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use crate::colors::colored_id;

/// Middleware that logs incoming requests and assigns them unique colored IDs
///
/// The ID and start time land in request extensions so the handler can emit a
/// matching completion line with latency.
pub async fn log_requests(mut req: Request<Body>, next: Next) -> Response {
    let id = nanoid!(6);
    let method = req.method().clone();
    let uri = req.uri().clone();

    req.extensions_mut().insert(id.clone());
    req.extensions_mut().insert(Instant::now());

    info!("{} → {} {}", colored_id(&id), method, uri.path());
    next.run(req).await
}

/// Stamps the fixed security header set onto every response leaving `router`.
///
/// Applied outside the handler and the cache, so cached copies and
/// platform-generated responses get the same treatment. The fixed values
/// override same-named headers already present; everything else
/// (`Location`, `Content-Type`, ...) passes through untouched.
pub fn with_security_headers(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains; preload"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}
