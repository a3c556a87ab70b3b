//! File responses for pages and static assets.

use std::path::{Component, Path, PathBuf};

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub const INDEX_PAGE: &str = "index.html";
pub const MESSAGE_PAGE: &str = "message.html";
pub const ERROR_PAGE: &str = "error.html";

pub const HTML: &str = "text/html";

/// Content type served for a static asset, derived from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("css") => "text/css",
        Some("png") => "image/png",
        Some("js") => "application/javascript",
        _ => "application/octet-stream",
    }
}

/// Resolve `/static/<rest>` to a path under `root`.
///
/// Returns `None` when `rest` is empty or would leave `root`.
pub fn resolve_static(root: &Path, rest: &str) -> Option<PathBuf> {
    let rest = Path::new(rest);
    let mut components = rest.components().peekable();
    components.peek()?;
    if components.all(|c| matches!(c, Component::Normal(_))) {
        Some(root.join(rest))
    } else {
        None
    }
}

/// Respond 200 with the file at `path`, or fall back to the error page.
pub async fn serve_file(path: &Path, content_type: &'static str, error_page: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to read {}: {e}", path.display());
            }
            not_found(error_page).await
        }
    }
}

/// Respond 404 with the error page as body.
///
/// A missing error page cannot be reported any other way, so that response
/// degrades to an empty 500.
pub async fn not_found(error_page: &Path) -> Response {
    match tokio::fs::read(error_page).await {
        Ok(bytes) => (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, HTML)], bytes).into_response(),
        Err(e) => {
            tracing::error!("Error page {} unavailable: {e}", error_page.display());
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
