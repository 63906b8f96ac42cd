//! Static asset server.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Path as UrlPath, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Directories under the project root served by path.
pub const MOUNTS: &[&str] = &["challenges", "other"];

/// Configuration for the gallery server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Project root containing `challenges/`, `other/` and `node_modules/`
    pub root: PathBuf,

    /// Public directory, relative to the root
    pub public_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            public_dir: PathBuf::from("public"),
            port: 3000,
            host: "127.0.0.1".to_string(),
            open: false,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("Server error: {0}")]
    ServeError(String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
struct ServerState {
    root: PathBuf,
    public_dir: PathBuf,
    root_files: ServeDir,
    public_files: ServeDir,
}

/// Gallery server.
pub struct GalleryServer {
    config: ServerConfig,
}

impl GalleryServer {
    /// Create a new server.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr_str = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = addr_str
            .parse()
            .map_err(|_| ServerError::InvalidAddress(addr_str.clone()))?;

        let app = router(&self.config);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        tracing::info!("Server running at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        Ok(())
    }
}

/// Build the router.
///
/// `/`, `/challenges/{category}/{name}` and `/other/{name}` resolve to that
/// directory's `index.html`; the latter two fall back to a file at the same
/// path when there is no page. Everything else is a file lookup: paths under
/// [`MOUNTS`] are served from the project root, `/node_modules` from its own
/// directory, and the rest from the public directory.
pub fn router(config: &ServerConfig) -> Router {
    let public_dir = config.root.join(&config.public_dir);

    let state = Arc::new(ServerState {
        root: config.root.clone(),
        public_dir: public_dir.clone(),
        root_files: ServeDir::new(&config.root),
        public_files: ServeDir::new(&public_dir),
    });

    Router::new()
        .route("/", get(index_handler))
        .route("/challenges/{category}/{name}", get(challenge_handler))
        .route("/other/{name}", get(other_handler))
        .nest_service("/node_modules", ServeDir::new(config.root.join("node_modules")))
        .fallback(static_handler)
        .with_state(state)
}

/// Handler for the home page.
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    read_index(&state.public_dir)
        .await
        .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
}

/// Handler for a challenge's page, or a file at the same depth.
async fn challenge_handler(
    State(state): State<Arc<ServerState>>,
    UrlPath((category, name)): UrlPath<(String, String)>,
    req: Request,
) -> Response {
    if !is_safe_segment(&category) || !is_safe_segment(&name) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let dir = state.root.join("challenges").join(category).join(name);
    match read_index(&dir).await {
        Some(res) => res,
        None => serve_files(state.root_files.clone(), req).await,
    }
}

/// Handler for a project under `other/`, or a file directly in it.
async fn other_handler(
    State(state): State<Arc<ServerState>>,
    UrlPath(name): UrlPath<String>,
    req: Request,
) -> Response {
    if !is_safe_segment(&name) {
        return StatusCode::NOT_FOUND.into_response();
    }

    match read_index(&state.root.join("other").join(name)).await {
        Some(res) => res,
        None => serve_files(state.root_files.clone(), req).await,
    }
}

/// Fallback handler serving files by path.
async fn static_handler(State(state): State<Arc<ServerState>>, req: Request) -> Response {
    let service = if is_mounted(req.uri().path()) {
        state.root_files.clone()
    } else {
        state.public_files.clone()
    };

    serve_files(service, req).await
}

async fn serve_files(service: ServeDir, req: Request) -> Response {
    match service.oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    }
}

/// Respond with `dir/index.html`, or `None` if it cannot be read.
async fn read_index(dir: &Path) -> Option<Response> {
    let path = dir.join("index.html");

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            Some(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], bytes).into_response())
        }
        Err(e) => {
            tracing::debug!("No page at {}: {}", path.display(), e);
            None
        }
    }
}

fn is_mounted(path: &str) -> bool {
    let path = path.trim_start_matches('/');
    MOUNTS.iter().any(|mount| {
        path == *mount
            || path
                .strip_prefix(mount)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// A single path segment that cannot escape its parent directory.
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
}
