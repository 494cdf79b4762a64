//! Response header policy for Unity WebGL content.
//!
//! Unity's threaded builds need cross-origin isolation, and precompressed
//! payloads (`.br`, `.gz`) must be announced with `Content-Encoding` and the
//! type of the file inside the compression, not of the archive.

use axum::extract::{Request, State};
use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL,
    CONTENT_ENCODING, CONTENT_TYPE, IF_MODIFIED_SINCE, IF_NONE_MATCH,
};
use axum::middleware::Next;
use axum::response::Response;

const COOP: HeaderName = HeaderName::from_static("cross-origin-opener-policy");
const COEP: HeaderName = HeaderName::from_static("cross-origin-embedder-policy");
const CORP: HeaderName = HeaderName::from_static("cross-origin-resource-policy");

/// Which optional headers the server adds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderPolicy {
    /// Send COOP/COEP/CORP on pages and scripts so SharedArrayBuffer is available
    pub wasm_multithreading: bool,
    /// Send `Access-Control-Allow-Origin: *`
    pub cors: bool,
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self {
            wasm_multithreading: true,
            cors: false,
        }
    }
}

/// `Content-Encoding` implied by a precompressed file suffix.
pub fn content_encoding_for(path: &str) -> Option<&'static str> {
    if path.ends_with(".br") {
        Some("br")
    } else if path.ends_with(".gz") {
        Some("gzip")
    } else {
        None
    }
}

/// `Content-Type` override for Unity build files; `None` keeps the default.
pub fn content_type_for(path: &str) -> Option<&'static str> {
    if path.contains(".wasm") {
        Some("application/wasm")
    } else if path.contains(".js") {
        Some("application/javascript")
    } else if path.contains(".json") {
        Some("application/json")
    } else if path.contains(".data") || path.contains(".bundle") || path.ends_with(".unityweb") {
        Some("application/octet-stream")
    } else {
        None
    }
}

fn needs_isolation(path: &str) -> bool {
    path == "/" || path.contains(".js") || path.contains(".html") || path.contains(".htm")
}

/// Whether a response carries an HTML document, e.g. an `index.html` served
/// at its directory URL.
pub fn is_html_response(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("text/html"))
        .unwrap_or(false)
}

fn isolation_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (COOP, HeaderValue::from_static("same-origin")),
        (COEP, HeaderValue::from_static("require-corp")),
        (CORP, HeaderValue::from_static("cross-origin")),
    ]
}

/// Headers to set on the response for a request path.
///
/// HTML responses at paths without an extension are handled by
/// [`apply_header_policy`], which also inspects the response.
pub fn response_headers(policy: &HeaderPolicy, path: &str) -> Vec<(HeaderName, HeaderValue)> {
    let mut headers = Vec::new();

    if policy.wasm_multithreading && needs_isolation(path) {
        headers.extend(isolation_headers());
    }

    if policy.cors {
        headers.push((ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")));
    }

    if let Some(encoding) = content_encoding_for(path) {
        headers.push((CONTENT_ENCODING, HeaderValue::from_static(encoding)));
    }

    if let Some(content_type) = content_type_for(path) {
        headers.push((CONTENT_TYPE, HeaderValue::from_static(content_type)));
    }

    headers
}

/// Drop `Cache-Control: no-cache` from a conditional request so the static
/// server can still answer `304 Not Modified`.
pub fn strip_revalidation_cache_control(headers: &mut HeaderMap) {
    let no_cache = headers
        .get(CACHE_CONTROL)
        .map(|v| v.as_bytes() == b"no-cache")
        .unwrap_or(false);
    let conditional = headers.contains_key(IF_MODIFIED_SINCE) || headers.contains_key(IF_NONE_MATCH);
    if no_cache && conditional {
        headers.remove(CACHE_CONTROL);
    }
}

/// Middleware applying [`HeaderPolicy`] to every request and response.
pub async fn apply_header_policy(
    State(policy): State<HeaderPolicy>,
    mut request: Request,
    next: Next,
) -> Response {
    strip_revalidation_cache_control(request.headers_mut());
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    if policy.wasm_multithreading && is_html_response(headers) {
        for (name, value) in isolation_headers() {
            headers.insert(name, value);
        }
    }
    for (name, value) in response_headers(&policy, &path) {
        headers.insert(name, value);
    }
    response
}
