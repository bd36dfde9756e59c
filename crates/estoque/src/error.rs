//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`, failed refreshes and `ConfigError` into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use estoque_config::ConfigError;
use estoque_core::{CoreError, FailureKind, StoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the inventory API at {url}")]
    #[diagnostic(
        code(estoque::connection_failed),
        help(
            "Check that the API server is running and reachable.\n\
             Reason: {reason}\n\
             Override the address with --api-url or ESTOQUE_API_URL."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(estoque::timeout),
        help("Increase the timeout with --timeout or check the API server's responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Item {id} not found")]
    #[diagnostic(
        code(estoque::not_found),
        help("Run: estoque list to see available items")
    )]
    NotFound { id: i64 },

    // ── API ──────────────────────────────────────────────────────────
    #[error("The inventory API rejected the request: {message}")]
    #[diagnostic(code(estoque::api_error))]
    ApiError { status: Option<u16>, message: String },

    #[error("The inventory API sent an unexpected response")]
    #[diagnostic(
        code(estoque::malformed_response),
        help("Details: {message}\nRe-run with -vv to log the requests being made.")
    )]
    MalformedResponse { message: String },

    #[error("Another {operation} is still in progress")]
    #[diagnostic(code(estoque::busy))]
    Busy { operation: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(estoque::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(estoque::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: estoque config init --profile {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(estoque::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(estoque::config))]
    Config(Box<figment::Error>),

    #[error("failed to serialize config: {0}")]
    #[diagnostic(code(estoque::config))]
    ConfigSerialization(#[from] toml::ser::Error),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(estoque::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. }
            | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::ItemNotFound { id } => CliError::NotFound { id },

            CoreError::Server { status, message } => CliError::ApiError {
                status: Some(status),
                message,
            },

            CoreError::MalformedResponse { message } => CliError::MalformedResponse { message },

            CoreError::SubmitInProgress { operation } => CliError::Busy {
                operation: operation.into(),
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "api_url".into(),
                reason: message,
            },

            err @ (CoreError::NoActiveEdit | CoreError::NoPendingDelete) => CliError::ApiError {
                status: None,
                message: err.to_string(),
            },
        }
    }
}

impl CliError {
    /// A failed refresh of the collection at `url`, surfaced as a command
    /// error.
    pub fn refresh_failed(err: StoreError, url: &str) -> Self {
        match err.kind {
            FailureKind::NetworkFailure => CliError::ConnectionFailed {
                url: url.to_owned(),
                reason: err.message,
            },
            FailureKind::MalformedResponse => CliError::MalformedResponse {
                message: err.message,
            },
            FailureKind::ServerFailure | FailureKind::ValidationDefault => CliError::ApiError {
                status: None,
                message: err.message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                available: String::new(),
            },
            ConfigError::Serialization(e) => CliError::ConfigSerialization(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_failure_kind() {
        let timeout: CliError = CoreError::Timeout { timeout_secs: 3 }.into();
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let missing: CliError = CoreError::ItemNotFound { id: 9 }.into();
        assert_eq!(missing.exit_code(), exit_code::NOT_FOUND);

        let refused = CliError::refresh_failed(
            StoreError {
                kind: FailureKind::NetworkFailure,
                message: "connection refused".into(),
            },
            "http://127.0.0.1:5000/api/produtos",
        );
        assert_eq!(refused.exit_code(), exit_code::CONNECTION);
        assert!(refused.to_string().contains("127.0.0.1:5000"));

        let rejected: CliError = CoreError::Server {
            status: 400,
            message: "nome obrigatório".into(),
        }
        .into();
        assert_eq!(rejected.exit_code(), exit_code::GENERAL);
        assert_eq!(
            rejected.to_string(),
            "The inventory API rejected the request: nome obrigatório"
        );
    }
}
