//! HTTP server: build index at `/`, static build files everywhere else.

use crate::config::ServerConfig;
use crate::error::HostError;
use crate::headers::{apply_header_policy, HeaderPolicy};
use crate::render::{render_directory_listing, render_homepage, ListingEntry};
use crate::scan::{scan_builds, ScanOptions};
use axum::extract::{Request, State};
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Router};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared state for request handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Directory both served and scanned for builds
    pub root: PathBuf,
    pub scan: ScanOptions,
}

/// Build the application router.
pub fn build_router(state: AppState, policy: HeaderPolicy) -> Router {
    Router::new()
        .route("/", get(homepage))
        .fallback(static_files)
        .layer(middleware::from_fn_with_state(policy, apply_header_policy))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

async fn homepage(State(state): State<Arc<AppState>>) -> Response {
    let root = state.root.clone();
    let options = state.scan.clone();

    let builds = match tokio::task::spawn_blocking(move || scan_builds(&root, &options)).await {
        Ok(builds) => builds,
        Err(e) => {
            error!(error = %e, "Build scan task failed, rendering empty index");
            Vec::new()
        }
    };

    (
        [(CACHE_CONTROL, HeaderValue::from_static("no-cache"))],
        Html(render_homepage(&builds)),
    )
        .into_response()
}

async fn static_files(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let Ok(url_path) = urlencoding::decode(request.uri().path()).map(|p| p.into_owned()) else {
        return not_found();
    };

    if url_path.ends_with('/') {
        if let Some(dir) = resolve_under_root(&state.root, &url_path) {
            if dir.is_dir() && !dir.join("index.html").is_file() {
                return directory_listing(dir, url_path).await;
            }
        }
    }

    let serve_dir = ServeDir::new(&state.root).append_index_html_on_directories(true);
    let mut response = match serve_dir.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    };

    if response.status().is_success() {
        response.headers_mut().insert(
            CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=0, immutable"),
        );
    }
    response
}

async fn directory_listing(dir: PathBuf, url_path: String) -> Response {
    let listed = tokio::task::spawn_blocking(move || read_listing(&dir)).await;
    match listed {
        Ok(Ok(entries)) => Html(render_directory_listing(&url_path, &entries)).into_response(),
        Ok(Err(e)) => {
            warn!(path = %url_path, error = %e, "Failed to read directory for listing");
            not_found()
        }
        Err(e) => {
            error!(path = %url_path, error = %e, "Directory listing task failed");
            not_found()
        }
    }
}

fn read_listing(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: entry.path().is_dir(),
        });
    }
    Ok(entries)
}

/// Map a decoded URL path onto the served root, refusing anything that
/// would climb out of it.
pub fn resolve_under_root(root: &Path, url_path: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for component in Path::new(url_path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(resolved)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn run_server(
    root: PathBuf,
    config: &ServerConfig,
    scan: ScanOptions,
) -> Result<(), HostError> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = build_router(AppState { root: root.clone(), scan }, config.header_policy());

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| HostError::ServerError(format!("Failed to bind {}: {}", addr, e)))?;

    info!(
        root = %root.display(),
        cors = config.cors,
        wasm_multithreading = config.wasm_multithreading,
        "Web server serving at http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HostError::ServerError(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
