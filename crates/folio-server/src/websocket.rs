//! WebSocket-based live reload.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Messages sent to connected browsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HmrMessage {
    /// Full page reload
    Reload,

    /// Content or templates failed to load; the page keeps its last state
    Error {
        /// Human-readable problem description
        message: String,
    },

    /// Connection established
    Connected,
}

/// Hub for broadcasting reload messages to all connected clients.
#[derive(Debug, Clone)]
pub struct HmrHub {
    sender: broadcast::Sender<HmrMessage>,
}

impl HmrHub {
    /// Create a new hub.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: HmrMessage) {
        // No receivers is fine: nobody has the page open.
        let _ = self.sender.send(msg);
    }

    /// Subscribe to messages.
    pub fn subscribe(&self) -> broadcast::Receiver<HmrMessage> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for HmrHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate the client-side reload script.
///
/// The socket URL is built from the page's own location, so the script works
/// on whatever host and port the dev server is bound to.
pub fn hmr_client_script(ws_path: &str) -> String {
    format!(
        r#"
(function() {{
  'use strict';

  const scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  const ws = new WebSocket(scheme + location.host + '{}');
  let reconnectAttempts = 0;
  const maxReconnectAttempts = 10;

  function showError(message) {{
    let banner = document.getElementById('folio-dev-error');
    if (!banner) {{
      banner = document.createElement('pre');
      banner.id = 'folio-dev-error';
      banner.style.cssText = 'position:fixed;bottom:1rem;left:1rem;right:1rem;z-index:1000;' +
        'padding:1rem;border-radius:0.75rem;background:#7f1d1d;color:#fff;white-space:pre-wrap;';
      document.body.appendChild(banner);
    }}
    banner.textContent = message;
  }}

  ws.onopen = function() {{
    console.log('[folio] Connected');
    reconnectAttempts = 0;
  }};

  ws.onmessage = function(event) {{
    const msg = JSON.parse(event.data);
    console.log('[folio]', msg.type);

    switch (msg.type) {{
      case 'reload':
        location.reload();
        break;

      case 'error':
        console.error('[folio]', msg.message);
        showError(msg.message);
        break;

      case 'connected':
        console.log('[folio] Server acknowledged connection');
        break;
    }}
  }};

  ws.onclose = function() {{
    console.log('[folio] Disconnected');
    if (reconnectAttempts < maxReconnectAttempts) {{
      reconnectAttempts++;
      setTimeout(function() {{
        console.log('[folio] Reconnecting...');
        location.reload();
      }}, 1000 * reconnectAttempts);
    }}
  }};

  ws.onerror = function(e) {{
    console.error('[folio] WebSocket error:', e);
  }};
}})();
"#,
        ws_path
    )
}
