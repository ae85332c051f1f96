//! HTTP request handlers.

use axum::{
    Router,
    body::Body,
    extract::{Extension, State},
    http::{HeaderMap, StatusCode, Uri, header},
    middleware as axum_middleware,
    response::Response,
    routing::get,
};
use owo_colors::OwoColorize;
use std::{sync::Arc, time::Instant};
use tracing::info;

use crate::cache::META_TTL;
use crate::colors::colored_id;
use crate::middleware::{log_requests, with_security_headers};
use crate::routes::{Route, classify};
use crate::state::AppState;

const META_CACHE_CONTROL: &str = "public, max-age=3600, must-revalidate";

/// Assembles the full service: the vanity handler as the fallback route,
/// wrapped in the logging middleware and the security header layers.
pub fn app(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .fallback(get(vanity))
        .layer(axum_middleware::from_fn(log_requests))
        .with_state(state);
    with_security_headers(router)
}

/// Classifies each request and serves a meta page or a redirect
///
/// Three cases, in precedence order:
/// 1. `/{repo}?go-get=1` for an allow-listed repo: the go-import meta page,
///    served from cache when possible.
/// 2. A routed first segment (`/desktop`, `/frontend`): 308 to the mapped
///    path at the canonical host, sub-path appended.
/// 3. Anything else: 308 to the canonical host with the raw path appended.
pub async fn vanity(
    State(state): State<Arc<AppState>>,
    Extension(id): Extension<String>,
    Extension(start_time): Extension<Instant>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let path = uri.path();
    let go_get = uri
        .query()
        .is_some_and(|query| query.split('&').any(|pair| pair == "go-get=1"));

    match classify(path, go_get) {
        Route::GoGetMeta { repo } => {
            let key = cache_key(&headers, &uri);

            if let Some(body) = state.cache.get(&key).await {
                let latency = start_time.elapsed();
                info!(
                    "{} ← {} {} ({}ms)",
                    colored_id(&id),
                    "CACHED".cyan(),
                    path,
                    latency.as_millis()
                );
                return meta_response(body);
            }

            let body = render_go_get(&state.base_url, &state.domain, &format!("/{repo}"));

            // Populate the cache off the response path. A lost write only
            // costs the next request a re-render.
            let cache = state.cache.clone();
            let rendered = body.clone();
            tokio::spawn(async move {
                cache.put(key, rendered, META_TTL).await;
            });

            let latency = start_time.elapsed();
            info!(
                "{} ← {} {} ({}ms)",
                colored_id(&id),
                "META".green(),
                path,
                latency.as_millis()
            );
            meta_response(body)
        }
        Route::Directory { target } => {
            let location = format!("{}{}", state.base_url, target);
            let latency = start_time.elapsed();
            info!(
                "{} ← {} {} → {} ({}ms)",
                colored_id(&id),
                "ROUTE".yellow(),
                path,
                location,
                latency.as_millis()
            );
            redirect(&location)
        }
        Route::Fallback => {
            let location = format!("{}{}", state.base_url, path);
            let latency = start_time.elapsed();
            info!(
                "{} ← {} {} → {} ({}ms)",
                colored_id(&id),
                "FALLBACK".blue(),
                path,
                location,
                latency.as_millis()
            );
            redirect(&location)
        }
    }
}

/// Cache key for a rendered page: the request URL as the client sent it.
fn cache_key(headers: &HeaderMap, uri: &Uri) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.host())
        .unwrap_or_default();
    let path_and_query = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());
    format!("{host}{path_and_query}")
}

/// Renders the vanity page for a repository path like "/vikunja".
///
/// `{/dir}`, `{file}` and `{line}` in the go-source tag are placeholders the
/// Go toolchain substitutes itself and must survive rendering literally.
fn render_go_get(base_url: &str, domain: &str, path: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
	<head>
		<meta name="go-import" content="{domain}{path} git {base_url}{path}.git">
		<meta name="go-source" content="{domain}{path} _ {base_url}{path}/src/branch/main{{/dir}} {base_url}{path}/src/branch/main{{/dir}}/{{file}}#L{{line}}">
		<meta http-equiv="refresh" content="0; url={base_url}{path}" />
	</head>
	<body>
		go get {domain}{path}
	</body>
</html>
"#
    )
}

/// Build a 200 meta page response
fn meta_response(body: String) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CACHE_CONTROL, META_CACHE_CONTROL)
        .body(Body::from(body))
        .unwrap_or_else(|e| {
            tracing::error!("failed to build meta response: {}", e);
            Response::new(Body::empty())
        })
}

/// Build a 308 redirect response
fn redirect(location: &str) -> Response {
    Response::builder()
        .status(StatusCode::PERMANENT_REDIRECT)
        .header(header::LOCATION, location)
        .body(Body::empty())
        .unwrap_or_else(|e| {
            tracing::error!("failed to build redirect to {}: {}", location, e);
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::PERMANENT_REDIRECT;
            response
        })
}
