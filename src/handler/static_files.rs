//! Static file serving module
//!
//! Maps request paths onto the content root and serves the first candidate
//! location that exists. The goldenreel bundle links its assets without the
//! `desktop/` segment that the on-disk layout uses, so requests into that
//! tree also try the rewritten locations.

use crate::config::AppState;
use crate::error::ServerError;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

// Asset tree whose internal links omit the `desktop/` path segment.
const REWRITE_PREFIX: &str = "games/goldenreel/";
const DESKTOP_SEGMENT: &str = "desktop/";
const DESKTOP_GAME_SEGMENT: &str = "desktop/game/";

/// Serve the asset for `path`, trying candidate locations in order.
///
/// A candidate that would escape the content root answers 403 on the spot;
/// nothing further is tried and no file is touched. If every candidate is
/// missing, the 404 body names the originally requested path.
pub async fn serve(path: &str, state: &AppState) -> Result<Response<Full<Bytes>>, ServerError> {
    for candidate in candidates(path) {
        let Some(resolved) = resolve(&state.root, &candidate) else {
            logger::log_warning(&format!("Path escape blocked: {path}"));
            return Ok(http::forbidden());
        };

        if !is_regular_file(&resolved).await {
            continue;
        }

        let content = fs::read(&resolved).await?;
        let content_type = mime::content_type_for(resolved.extension().and_then(|e| e.to_str()));
        return http::file_response(content, content_type);
    }

    Ok(http::not_found(path))
}

/// Ordered candidate list for one request path.
///
/// The primary candidate is the request path relative to the root (`/` and
/// `/index.html` both mean `index.html`). For paths into the goldenreel tree
/// the `desktop/` and `desktop/game/` rewrites are appended, skipping any the
/// tail already starts with.
pub fn candidates(path: &str) -> Vec<String> {
    let primary = if path.is_empty() || path == "/" || path == "/index.html" {
        String::from("index.html")
    } else {
        path.strip_prefix('/').unwrap_or(path).to_string()
    };

    let mut list = vec![primary.clone()];
    if let Some(tail) = primary.strip_prefix(REWRITE_PREFIX) {
        if !tail.starts_with(DESKTOP_SEGMENT) {
            list.push(format!("{REWRITE_PREFIX}{DESKTOP_SEGMENT}{tail}"));
        }
        if !tail.starts_with(DESKTOP_GAME_SEGMENT) {
            list.push(format!("{REWRITE_PREFIX}{DESKTOP_GAME_SEGMENT}{tail}"));
        }
    }
    list
}

/// Resolve `candidate` against the root without touching the filesystem.
/// Returns `None` when the candidate would climb out of the root.
pub fn resolve(root: &Path, candidate: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    let mut depth: usize = 0;

    for component in Path::new(candidate).components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return None;
                }
                resolved.pop();
                depth -= 1;
            }
            // Candidates are root-relative; an absolute component means the
            // request smuggled one in.
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(resolved)
}

async fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_file())
}
