//! Development server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use folio_content::load_or_builtin;
use folio_static::assets::AssetPipeline;
use folio_static::{escape_html, PageRenderer, RenderOptions, TemplateEngine};

use crate::watcher::{is_content_file, is_template_file, FileWatcher, WatchEvent};
use crate::websocket::{hmr_client_script, HmrHub, HmrMessage};

const HMR_PATH: &str = "/__hmr";

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Content YAML file
    pub content_path: PathBuf,

    /// Directory of static files
    pub public_dir: PathBuf,

    /// Directory of template overrides
    pub templates_dir: Option<PathBuf>,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            content_path: PathBuf::from("content/portfolio.yaml"),
            public_dir: PathBuf::from("public"),
            templates_dir: None,
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}: {1}")]
    AddressError(String, String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
pub(crate) struct ServerState {
    config: DevServerConfig,
    hmr: HmrHub,
    renderer: PageRenderer,
}

type SharedState = Arc<RwLock<ServerState>>;

impl ServerState {
    fn new(config: DevServerConfig) -> Self {
        let renderer = dev_renderer(&config);
        Self {
            config,
            hmr: HmrHub::new(),
            renderer,
        }
    }
}

fn dev_renderer(config: &DevServerConfig) -> PageRenderer {
    let templates = match &config.templates_dir {
        Some(dir) if dir.is_dir() => TemplateEngine::with_overrides(dir),
        _ => TemplateEngine::new(),
    };

    PageRenderer::new(
        templates,
        RenderOptions {
            base_url: "/".to_string(),
            dev: true,
        },
    )
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let raw_addr = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = raw_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ServerError::AddressError(raw_addr, e.to_string()))?;

        let state: SharedState = Arc::new(RwLock::new(ServerState::new(self.config.clone())));

        // Editors often save by renaming, so watch the content file's directory.
        let content_watch = match self.config.content_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => self.config.content_path.clone(),
        };
        let mut watch_paths = vec![content_watch, self.config.public_dir.clone()];
        if let Some(dir) = &self.config.templates_dir {
            watch_paths.push(dir.clone());
        }

        let (watcher, mut rx) =
            FileWatcher::new(&watch_paths).map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, &self.config);

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

fn router(state: SharedState, config: &DevServerConfig) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/assets/main.css", get(css_handler))
        .route("/assets/main.js", get(js_handler))
        .route(HMR_PATH, get(ws_handler))
        .route("/__hmr.js", get(hmr_script_handler))
        .fallback_service(ServeDir::new(&config.public_dir))
        .with_state(state)
}

/// Handle file watch events.
async fn handle_watch_event(state: &SharedState, event: WatchEvent) {
    match event {
        WatchEvent::ContentModified(path) => content_changed(state, &path).await,

        WatchEvent::TemplateModified(path) => templates_changed(state, &path).await,

        // Rename-based saves surface as create/delete of the content file
        WatchEvent::Created(path) | WatchEvent::Deleted(path) if is_content_file(&path) => {
            content_changed(state, &path).await
        }

        WatchEvent::Created(path) | WatchEvent::Deleted(path) if is_template_file(&path) => {
            templates_changed(state, &path).await
        }

        WatchEvent::Created(path) | WatchEvent::Deleted(path) | WatchEvent::Modified(path) => {
            tracing::debug!("Changed: {}", path.display());
            state.read().await.hmr.send(HmrMessage::Reload);
        }
    }
}

/// Re-validate the content file and tell clients to reload or show the error.
async fn content_changed(state: &SharedState, path: &Path) {
    tracing::info!("Content modified: {}", path.display());

    let state = state.read().await;
    match load_or_builtin(&state.config.content_path) {
        Ok(_) => state.hmr.send(HmrMessage::Reload),
        Err(e) => {
            tracing::warn!("{}", e);
            state.hmr.send(HmrMessage::Error {
                message: e.to_string(),
            });
        }
    }
}

async fn templates_changed(state: &SharedState, path: &Path) {
    tracing::info!("Template modified: {}", path.display());

    let mut state = state.write().await;
    state.renderer = dev_renderer(&state.config);
    state.hmr.send(HmrMessage::Reload);
}

/// Handler for the page. Content is re-read on every request.
async fn index_handler(State(state): State<SharedState>) -> Response {
    let state = state.read().await;

    let rendered = load_or_builtin(&state.config.content_path)
        .map_err(|e| e.to_string())
        .and_then(|content| {
            state
                .renderer
                .render_now(&content)
                .map_err(|e| e.to_string())
        });

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(message) => {
            tracing::warn!("Failed to render page: {}", message);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(error_page(&message))).into_response()
        }
    }
}

fn error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>folio: error</title>
  <style>
    body {{ font-family: system-ui, sans-serif; background: #000; color: #fff; max-width: 800px; margin: 2rem auto; padding: 0 1rem; }}
    pre {{ background: #7f1d1d; padding: 1rem; border-radius: 0.5rem; white-space: pre-wrap; }}
  </style>
</head>
<body>
  <h1>Could not render the page</h1>
  <pre>{}</pre>
  <script src="/__hmr.js"></script>
</body>
</html>"#,
        escape_html(message)
    )
}

async fn css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        AssetPipeline::generate_css(),
    )
}

async fn js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        AssetPipeline::generate_js(),
    )
}

/// Handler for the reload WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = {
        let state = state.read().await;
        state.hmr.subscribe()
    };

    if send_message(&mut socket, &HmrMessage::Connected).await.is_err() {
        return;
    }

    while let Ok(msg) = rx.recv().await {
        if send_message(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &HmrMessage) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(msg) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to encode reload message: {}", e);
            return Ok(());
        }
    };
    socket.send(Message::Text(json.into())).await
}

/// Handler for the reload client script.
async fn hmr_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        hmr_client_script(HMR_PATH),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn state_for(config: DevServerConfig) -> SharedState {
        Arc::new(RwLock::new(ServerState::new(config)))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 7777);
        assert_eq!(server.config.host, "127.0.0.1");
    }

    #[tokio::test]
    async fn rejects_invalid_host() {
        let server = DevServer::new(DevServerConfig {
            host: "not a host".to_string(),
            open: false,
            ..Default::default()
        });

        let result = server.start().await;

        assert!(matches!(result, Err(ServerError::AddressError(_, _))));
    }

    #[tokio::test]
    async fn serves_builtin_page_with_reload_client() {
        let temp = tempdir().unwrap();
        let state = state_for(DevServerConfig {
            content_path: temp.path().join("missing.yaml"),
            ..Default::default()
        });

        let response = index_handler(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Selected Projects"));
        assert!(html.contains(r#"<script src="/__hmr.js"></script>"#));
    }

    #[tokio::test]
    async fn rereads_content_on_every_request() {
        let temp = tempdir().unwrap();
        let content_path = temp.path().join("portfolio.yaml");
        fs::write(&content_path, folio_content::BUILTIN_CONTENT).unwrap();

        let state = state_for(DevServerConfig {
            content_path: content_path.clone(),
            ..Default::default()
        });

        let first = body_text(index_handler(State(Arc::clone(&state))).await).await;
        assert!(first.contains("Luca Lazzaro"));

        fs::write(
            &content_path,
            folio_content::BUILTIN_CONTENT.replace("Luca Lazzaro", "Margaret Hamilton"),
        )
        .unwrap();

        let second = body_text(index_handler(State(state)).await).await;
        assert!(second.contains("Margaret Hamilton"));
    }

    #[tokio::test]
    async fn broken_content_renders_error_page() {
        let temp = tempdir().unwrap();
        let content_path = temp.path().join("portfolio.yaml");
        fs::write(&content_path, "site: [<oops").unwrap();

        let state = state_for(DevServerConfig {
            content_path,
            ..Default::default()
        });

        let response = index_handler(State(state)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let html = body_text(response).await;
        assert!(html.contains("Could not render the page"));
        assert!(!html.contains("[<oops"));
    }

    #[tokio::test]
    async fn content_change_broadcasts_reload() {
        let temp = tempdir().unwrap();
        let state = state_for(DevServerConfig {
            content_path: temp.path().join("missing.yaml"),
            ..Default::default()
        });
        let mut rx = state.read().await.hmr.subscribe();

        handle_watch_event(
            &state,
            WatchEvent::ContentModified(temp.path().join("missing.yaml")),
        )
        .await;

        assert_eq!(rx.try_recv().unwrap(), HmrMessage::Reload);
    }

    #[tokio::test]
    async fn invalid_content_change_broadcasts_error() {
        let temp = tempdir().unwrap();
        let content_path = temp.path().join("portfolio.yaml");
        fs::write(
            &content_path,
            folio_content::BUILTIN_CONTENT.replace("id: skills", "id: stack"),
        )
        .unwrap();

        let state = state_for(DevServerConfig {
            content_path: content_path.clone(),
            ..Default::default()
        });
        let mut rx = state.read().await.hmr.subscribe();

        handle_watch_event(&state, WatchEvent::ContentModified(content_path)).await;

        match rx.try_recv().unwrap() {
            HmrMessage::Error { message } => assert!(message.contains("#stack")),
            other => panic!("Expected Error message, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn renamed_invalid_content_broadcasts_error() {
        let temp = tempdir().unwrap();
        let content_path = temp.path().join("portfolio.yaml");
        fs::write(
            &content_path,
            folio_content::BUILTIN_CONTENT.replace("id: skills", "id: stack"),
        )
        .unwrap();

        let state = state_for(DevServerConfig {
            content_path: content_path.clone(),
            ..Default::default()
        });
        let mut rx = state.read().await.hmr.subscribe();

        handle_watch_event(&state, WatchEvent::Created(content_path)).await;

        match rx.try_recv().unwrap() {
            HmrMessage::Error { message } => assert!(message.contains("#stack")),
            other => panic!("Expected Error message, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn deleted_content_falls_back_and_reloads() {
        let temp = tempdir().unwrap();
        let content_path = temp.path().join("portfolio.yaml");

        let state = state_for(DevServerConfig {
            content_path: content_path.clone(),
            ..Default::default()
        });
        let mut rx = state.read().await.hmr.subscribe();

        handle_watch_event(&state, WatchEvent::Deleted(content_path)).await;

        assert_eq!(rx.try_recv().unwrap(), HmrMessage::Reload);
    }

    #[tokio::test]
    async fn template_change_reloads_overrides() {
        let temp = tempdir().unwrap();
        let templates = temp.path().join("templates");
        fs::create_dir_all(&templates).unwrap();

        let state = state_for(DevServerConfig {
            content_path: temp.path().join("missing.yaml"),
            templates_dir: Some(templates.clone()),
            ..Default::default()
        });

        fs::write(
            templates.join("layout.html"),
            "<html data-dev=\"yes\">{% block content %}{% endblock %}</html>",
        )
        .unwrap();
        handle_watch_event(
            &state,
            WatchEvent::TemplateModified(templates.join("layout.html")),
        )
        .await;

        let html = body_text(index_handler(State(state)).await).await;
        assert!(html.starts_with("<html data-dev=\"yes\">"));
    }

    #[tokio::test]
    async fn serves_assets() {
        let css = css_handler().await.into_response();
        assert_eq!(css.headers()[header::CONTENT_TYPE], "text/css");

        let script = body_text(hmr_script_handler().await.into_response()).await;
        assert!(script.contains("'/__hmr'"));
    }

    #[test]
    fn error_page_escapes_message() {
        let html = error_page("<script>bad</script>");
        assert!(html.contains("&lt;script&gt;bad&lt;/script&gt;"));
    }
}
