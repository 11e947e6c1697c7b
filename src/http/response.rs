//! HTTP response building module
//!
//! Builders for the handful of response shapes the stub server produces.
//! Mock and file responses propagate builder errors; the terminal error
//! responses (403/404/500) always yield something sendable.

use crate::error::ServerError;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a 200 mock response with the permissive CORS header the game client
/// expects on every replayed API call.
pub fn mock_response(
    body: String,
    content_type: &str,
) -> Result<Response<Full<Bytes>>, ServerError> {
    let body = Bytes::from(body);
    Ok(Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", body.len())
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(body))?)
}

/// Build a 200 response carrying static file bytes.
pub fn file_response(
    content: Vec<u8>,
    content_type: &'static str,
) -> Result<Response<Full<Bytes>>, ServerError> {
    let body = Bytes::from(content);
    Ok(Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", body.len())
        .body(Full::new(body))?)
}

/// Build 403 Forbidden response
pub fn forbidden() -> Response<Full<Bytes>> {
    Response::builder()
        .status(403)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Forbidden")))
        .unwrap_or_else(|e| {
            log_build_error("403", &e);
            Response::new(Full::new(Bytes::from("Forbidden")))
        })
}

/// Build 404 Not Found response naming the originally requested path
pub fn not_found(path: &str) -> Response<Full<Bytes>> {
    let body = Bytes::from(format!("404 Not Found: {path}"));
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(body))
        })
}

/// Build 500 Internal Server Error response
pub fn internal_error() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Internal server error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("Internal server error")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
