use thiserror::Error;

/// Top-level error type for the `estoque-api` crate.
///
/// Covers every failure mode of the inventory API: transport, HTTP status,
/// and payload decoding. `estoque-core` maps these into failure kinds the
/// store and the mutation workflows report.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Non-2xx response. `message` holds the `error`/`message` field of a
    /// JSON body when the server sent one.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Http {
        status: u16,
        message: Option<String>,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The message to show an operator for a rejected request.
    ///
    /// Prefers the server's own `error`/`message` text and falls back to a
    /// status-coded generic message.
    pub fn server_message(&self) -> String {
        match self {
            Self::Http {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Http { status, .. } => format!("Server failure (status {status})"),
            other => other.to_string(),
        }
    }
}
