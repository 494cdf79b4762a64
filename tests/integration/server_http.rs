//! HTTP behavior of the build host, driven through the router without a socket

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;
use webgl_host::headers::HeaderPolicy;
use webgl_host::scan::ScanOptions;
use webgl_host::server::{build_router, AppState};

use crate::integration::write_sized;

fn app(root: &Path, policy: HeaderPolicy) -> Router {
    build_router(
        AppState {
            root: root.to_path_buf(),
            scan: ScanOptions::default(),
        },
        policy,
    )
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn header_value<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

fn site() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_sized(&root.join("Builds/Game1/ServiceWorker.js"), 12_000);
    write_sized(&root.join("Builds/Game1/index.html"), 10);
    write_sized(&root.join("Builds/Game1/Build/app.wasm.br"), 64);
    write_sized(&root.join("Builds/Game1/Build/app.loader.js"), 32);
    write_sized(&root.join("Builds/My Game/ServiceWorker.js"), 16);
    temp_dir
}

#[tokio::test]
async fn test_homepage_lists_builds() {
    let temp_dir = site();
    let response = get(app(temp_dir.path(), HeaderPolicy::default()), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, "cache-control"), Some("no-cache"));
    assert_eq!(
        header_value(&response, "cross-origin-opener-policy"),
        Some("same-origin")
    );
    assert_eq!(
        header_value(&response, "cross-origin-embedder-policy"),
        Some("require-corp")
    );
    assert!(header_value(&response, "access-control-allow-origin").is_none());

    let body = body_text(response).await;
    assert!(body.contains("<title>Unity WebGL Builds</title>"));
    assert!(body.contains(r#"href="/Builds/Game1/""#));
    assert!(body.contains(r#"href="/Builds/My%20Game/""#));
    assert!(body.contains("Brotli"));
    let game1 = body.find(">Game1<").unwrap();
    let my_game = body.find(">My Game<").unwrap();
    assert!(game1 < my_game);
}

#[tokio::test]
async fn test_homepage_without_builds() {
    let temp_dir = TempDir::new().unwrap();
    let response = get(app(temp_dir.path(), HeaderPolicy::default()), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<p>No builds available.</p>"));
}

#[tokio::test]
async fn test_homepage_for_missing_root_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("gone");
    let response = get(app(&missing, HeaderPolicy::default()), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("No builds available."));
}

#[tokio::test]
async fn test_precompressed_wasm_headers() {
    let temp_dir = site();
    let response = get(
        app(temp_dir.path(), HeaderPolicy::default()),
        "/Builds/Game1/Build/app.wasm.br",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, "content-encoding"), Some("br"));
    assert_eq!(
        header_value(&response, "content-type"),
        Some("application/wasm")
    );
    assert_eq!(
        header_value(&response, "cache-control"),
        Some("public, max-age=0, immutable")
    );
    assert_eq!(body_text(response).await.len(), 64);
}

#[tokio::test]
async fn test_scripts_get_isolation_and_cors_when_enabled() {
    let temp_dir = site();
    let policy = HeaderPolicy {
        wasm_multithreading: true,
        cors: true,
    };
    let response = get(
        app(temp_dir.path(), policy),
        "/Builds/Game1/Build/app.loader.js",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, "content-type"),
        Some("application/javascript")
    );
    assert_eq!(
        header_value(&response, "cross-origin-resource-policy"),
        Some("cross-origin")
    );
    assert_eq!(header_value(&response, "access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn test_isolation_headers_can_be_disabled() {
    let temp_dir = site();
    let policy = HeaderPolicy {
        wasm_multithreading: false,
        cors: false,
    };
    let response = get(app(temp_dir.path(), policy), "/").await;
    assert!(header_value(&response, "cross-origin-opener-policy").is_none());
    assert!(header_value(&response, "cross-origin-embedder-policy").is_none());
}

#[tokio::test]
async fn test_build_directory_serves_index() {
    let temp_dir = site();
    let response = get(app(temp_dir.path(), HeaderPolicy::default()), "/Builds/Game1/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, "cross-origin-opener-policy"),
        Some("same-origin")
    );
    assert_eq!(
        header_value(&response, "cross-origin-embedder-policy"),
        Some("require-corp")
    );
    assert_eq!(body_text(response).await.len(), 10);
}

#[tokio::test]
async fn test_directory_without_index_is_listed() {
    let temp_dir = site();
    let response = get(app(temp_dir.path(), HeaderPolicy::default()), "/Builds/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = header_value(&response, "content-type").unwrap_or_default();
    assert!(content_type.starts_with("text/html"));
    let body = body_text(response).await;
    assert!(body.contains("Directory Listing: /Builds/"));
    assert!(body.contains(r#"<a href="../">Parent Directory</a>"#));
    assert!(body.contains(r#"<a href="Game1/">Game1/</a>"#));
    assert!(body.contains(r#"<a href="My%20Game/">My Game/</a>"#));
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let temp_dir = site();
    let response = get(app(temp_dir.path(), HeaderPolicy::default()), "/nope.js").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(header_value(&response, "cache-control").is_none());
}

#[tokio::test]
async fn test_path_traversal_is_refused() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("site");
    write_sized(&root.join("Game/ServiceWorker.js"), 1);
    write_sized(&temp_dir.path().join("secret.txt"), 5);

    let response = get(app(&root, HeaderPolicy::default()), "/../secret.txt").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app(&root, HeaderPolicy::default()), "/%2e%2e/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_conditional_request_with_no_cache_revalidates() {
    let temp_dir = site();
    let router = app(temp_dir.path(), HeaderPolicy::default());

    let first = get(router.clone(), "/Builds/Game1/ServiceWorker.js").await;
    let last_modified = header_value(&first, "last-modified").unwrap().to_string();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/Builds/Game1/ServiceWorker.js")
                .header(header::IF_MODIFIED_SINCE, last_modified)
                .header(header::CACHE_CONTROL, "no-cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
}
