//! Integration tests for redirect behavior

use axum::http::StatusCode;
use std::{net::SocketAddr, sync::Arc};
use vanity_rs::handlers::app;
use vanity_rs::state::AppState;

const BASE_URL: &str = "https://github.com/go-vikunja";
const DOMAIN: &str = "code.vikunja.io";

async fn spawn_server() -> SocketAddr {
    let state = Arc::new(
        AppState::from_parts(Some(BASE_URL.to_string()), Some(DOMAIN.to_string())).unwrap(),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    addr
}

/// Client that surfaces Location headers instead of following them
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn assert_security_headers(headers: &reqwest::header::HeaderMap) {
    assert_eq!(
        headers.get("strict-transport-security").unwrap(),
        "max-age=31536000; includeSubDomains; preload"
    );
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(
        headers.get("referrer-policy").unwrap(),
        "strict-origin-when-cross-origin"
    );
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
}

#[tokio::test]
async fn test_fallback_preserves_path_verbatim() {
    let addr = spawn_server().await;

    let response = client()
        .get(format!("http://{}/some/random/path", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        &format!("{}/some/random/path", BASE_URL)
    );
    assert_security_headers(response.headers());
}

#[tokio::test]
async fn test_directory_route_without_subpath() {
    let addr = spawn_server().await;

    let response = client()
        .get(format!("http://{}/frontend", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        &format!("{}/vikunja/tree/main/frontend", BASE_URL)
    );
}

#[tokio::test]
async fn test_directory_route_with_subpath() {
    let addr = spawn_server().await;

    let response = client()
        .get(format!("http://{}/frontend/lang/i18n", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        &format!("{}/vikunja/tree/main/frontend/lang/i18n", BASE_URL)
    );
}

#[tokio::test]
async fn test_trailing_slash_redirects_identically() {
    let addr = spawn_server().await;
    let http = client();

    let bare = http
        .get(format!("http://{}/desktop", addr))
        .send()
        .await
        .unwrap();
    let slashed = http
        .get(format!("http://{}/desktop/", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(bare.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(slashed.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        bare.headers().get("location").unwrap(),
        slashed.headers().get("location").unwrap()
    );
}

#[tokio::test]
async fn test_meta_repo_without_go_get_redirects() {
    let addr = spawn_server().await;

    let response = client()
        .get(format!("http://{}/vikunja", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        &format!("{}/vikunja", BASE_URL)
    );
}

#[tokio::test]
async fn test_subpath_below_meta_repo_is_not_a_meta_page() {
    let addr = spawn_server().await;

    let response = client()
        .get(format!("http://{}/vikunja/extra?go-get=1", addr))
        .send()
        .await
        .unwrap();

    // The single-segment check is strict, so this falls through
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        &format!("{}/vikunja/extra", BASE_URL)
    );
}

#[tokio::test]
async fn test_security_headers_on_every_branch() {
    let addr = spawn_server().await;
    let http = client();

    for path in ["/goget?go-get=1", "/desktop/main.js", "/anything/else"] {
        let response = http
            .get(format!("http://{}{}", addr, path))
            .send()
            .await
            .unwrap();
        assert_security_headers(response.headers());
    }
}

#[tokio::test]
async fn test_root_path_falls_back() {
    let addr = spawn_server().await;

    let response = client()
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        &format!("{}/", BASE_URL)
    );
}
