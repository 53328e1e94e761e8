//! Development server with live reload for folio portfolios.
//!
//! Renders the page on every request and pushes reload messages over a
//! WebSocket when content, templates or public files change.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{HmrHub, HmrMessage};
