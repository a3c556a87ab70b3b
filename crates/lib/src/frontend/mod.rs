//! HTTP front-end
//!
//! Serves the three pages and the static asset tree, and turns a form
//! submission on `POST /message` into one datagram for the relay.
//!
//! | Method | Path                          | Response                       |
//! |--------|-------------------------------|--------------------------------|
//! | GET    | `/`                           | `index.html`                   |
//! | GET    | `/message`, `/message.html`   | `message.html`                 |
//! | GET    | `/error.html`                 | `error.html`                   |
//! | GET    | `/static/{*path}`             | asset, typed by extension      |
//! | POST   | `/message`                    | 303 to `/` after relaying      |
//!
//! Everything else is a 404 carrying the error page. Query strings are
//! ignored on GET. A POST must name `/message` exactly, so a query string
//! there is a 404. Submissions carry no body size limit.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path as UrlPath, RawQuery, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tokio::sync::Semaphore;

use crate::Message;
use crate::relay::RelaySender;

mod files;

pub use files::{content_type_for, resolve_static};

/// Shared, read-only state for request handlers.
#[derive(Clone, Debug)]
pub struct FrontendState {
    templates_dir: Arc<PathBuf>,
    static_dir: Arc<PathBuf>,
    sender: Arc<RelaySender>,
}

impl FrontendState {
    pub fn new(
        templates_dir: impl Into<PathBuf>,
        static_dir: impl Into<PathBuf>,
        sender: RelaySender,
    ) -> Self {
        Self {
            templates_dir: Arc::new(templates_dir.into()),
            static_dir: Arc::new(static_dir.into()),
            sender: Arc::new(sender),
        }
    }

    fn page(&self, name: &str) -> PathBuf {
        self.templates_dir.join(name)
    }

    fn error_page(&self) -> PathBuf {
        self.page(files::ERROR_PAGE)
    }

    async fn serve_page(&self, name: &str) -> Response {
        files::serve_file(&self.page(name), files::HTML, &self.error_page()).await
    }
}

/// Build the front-end router.
///
/// At most `max_concurrent_requests` requests are handled at once; the rest
/// wait for a slot.
pub fn router(state: FrontendState, max_concurrent_requests: usize) -> Router {
    let app = Router::new()
        .route("/", get(handle_index))
        .route(
            "/message",
            get(handle_message_page)
                .post(handle_submit)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/message.html", get(handle_message_page))
        .route("/error.html", get(handle_error_page))
        .route("/static/{*path}", get(handle_static))
        .fallback(handle_not_found)
        .method_not_allowed_fallback(handle_not_found)
        .with_state(state);

    limit_requests(app, max_concurrent_requests)
}

/// Let at most `max` requests through `app` at once. Later ones queue.
fn limit_requests(app: Router, max: usize) -> Router {
    let permits = Arc::new(Semaphore::new(max.max(1)));
    app.layer(middleware::from_fn_with_state(permits, limit_concurrency))
}

async fn limit_concurrency(
    State(permits): State<Arc<Semaphore>>,
    request: Request,
    next: Next,
) -> Response {
    match permits.acquire().await {
        Ok(_permit) => next.run(request).await,
        Err(e) => {
            tracing::error!("Request limiter closed: {e}");
            axum::http::StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

/// Handler for GET /
async fn handle_index(State(state): State<FrontendState>) -> Response {
    state.serve_page(files::INDEX_PAGE).await
}

/// Handler for GET /message and GET /message.html
async fn handle_message_page(State(state): State<FrontendState>) -> Response {
    state.serve_page(files::MESSAGE_PAGE).await
}

/// Handler for GET /error.html
async fn handle_error_page(State(state): State<FrontendState>) -> Response {
    state.serve_page(files::ERROR_PAGE).await
}

/// Handler for GET /static/{*path}
async fn handle_static(
    State(state): State<FrontendState>,
    UrlPath(rest): UrlPath<String>,
) -> Response {
    let error_page = state.error_page();
    let Some(path) = resolve_static(&state.static_dir, &rest) else {
        tracing::debug!("Rejected static path {rest:?}");
        return files::not_found(&error_page).await;
    };

    if !is_file(&path).await {
        return files::not_found(&error_page).await;
    }
    files::serve_file(&path, content_type_for(&path), &error_page).await
}

/// Handler for POST /message
///
/// Redirects home whatever happens to the datagram; the relay's outcome is
/// never known here. Only the bare path is a submission.
async fn handle_submit(
    State(state): State<FrontendState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    if query.is_some() {
        return files::not_found(&state.error_page()).await;
    }

    let message = Message::from_form(&body);
    match state.sender.send(&message).await {
        Ok(sent) => tracing::debug!("Relayed {sent} bytes to {}", state.sender.relay_addr()),
        Err(e) if e.is_io_error() => tracing::warn!("Datagram not sent: {e}"),
        Err(e) => tracing::warn!("Failed to relay message: {e}"),
    }
    Redirect::to("/").into_response()
}

async fn handle_not_found(State(state): State<FrontendState>) -> Response {
    files::not_found(&state.error_page()).await
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
