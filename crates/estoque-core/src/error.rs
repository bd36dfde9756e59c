// ── Core error types ──
//
// Consumer-facing errors from estoque-core. Callers never match on HTTP
// transport details; the `From<estoque_api::Error>` impl folds them into
// variants that each carry a `FailureKind`.

use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// Failure taxonomy shared by the store and the mutation workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The request never produced a response (refused, DNS, timeout).
    NetworkFailure,
    /// The server answered with a non-success status.
    ServerFailure,
    /// A success response whose body is not the expected shape.
    MalformedResponse,
    /// A numeric field was missing or unusable and was defaulted to 0.
    ValidationDefault,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Request failures ─────────────────────────────────────────────
    #[error("Cannot reach inventory API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Inventory API request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Inventory API rejected the request (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Item not found: {id}")]
    ItemNotFound { id: i64 },

    #[error("Malformed response from inventory API: {message}")]
    MalformedResponse { message: String },

    // ── Workflow errors ──────────────────────────────────────────────
    #[error("No item is being edited")]
    NoActiveEdit,

    #[error("No delete is awaiting confirmation")]
    NoPendingDelete,

    #[error("A {operation} request is already in flight")]
    SubmitInProgress { operation: &'static str },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The failure kind of a request error; `None` for local workflow and
    /// configuration errors that never reached the server.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => {
                Some(FailureKind::NetworkFailure)
            }
            Self::Server { .. } | Self::ItemNotFound { .. } => Some(FailureKind::ServerFailure),
            Self::MalformedResponse { .. } => Some(FailureKind::MalformedResponse),
            Self::NoActiveEdit
            | Self::NoPendingDelete
            | Self::SubmitInProgress { .. }
            | Self::ValidationFailed { .. }
            | Self::Config { .. } => None,
        }
    }

    /// Short text for an operator: the server's own message for rejected
    /// requests, the full display string otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status for server rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::ItemNotFound { .. } => Some(404),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<estoque_api::Error> for CoreError {
    fn from(err: estoque_api::Error) -> Self {
        match err {
            estoque_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            estoque_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            estoque_api::Error::Http { status, .. } => CoreError::Server {
                status,
                message: err.server_message(),
            },
            estoque_api::Error::Deserialization { message, .. } => {
                CoreError::MalformedResponse { message }
            }
            estoque_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            estoque_api::Error::ClientBuild(message) => CoreError::Config { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_keeps_server_text() {
        let err = CoreError::from(estoque_api::Error::Http {
            status: 400,
            message: Some("nome obrigatório".into()),
            body: r#"{"error":"nome obrigatório"}"#.into(),
        });
        assert_eq!(err.kind(), Some(FailureKind::ServerFailure));
        assert_eq!(err.user_message(), "nome obrigatório");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn http_error_without_body_text_is_status_coded() {
        let err = CoreError::from(estoque_api::Error::Http {
            status: 500,
            message: None,
            body: String::new(),
        });
        assert_eq!(err.user_message(), "Server failure (status 500)");
    }

    #[test]
    fn kinds_follow_the_taxonomy() {
        let timeout = CoreError::from(estoque_api::Error::Timeout { timeout_secs: 30 });
        assert_eq!(timeout.kind(), Some(FailureKind::NetworkFailure));

        let malformed = CoreError::from(estoque_api::Error::Deserialization {
            message: "expected a sequence".into(),
            body: "{}".into(),
        });
        assert_eq!(malformed.kind(), Some(FailureKind::MalformedResponse));

        assert_eq!(CoreError::NoActiveEdit.kind(), None);
        assert_eq!(FailureKind::ValidationDefault.to_string(), "validation_default");
    }
}
