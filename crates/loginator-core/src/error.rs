//! Error types for loginator.
//!
//! A single error enum covers every failure of a login attempt. The
//! orchestrator inspects the variant to decide whether a failure is a
//! silent "not configured" state or something worth reporting.

use thiserror::Error;

/// The unified error type for loginator operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failures (DNS, connect, timeout) on any HTTP call.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The portal returned HTML that does not have the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The portal explicitly rejected the submitted credentials.
    #[error("authentication failed for user '{username}'")]
    Authentication { username: String },

    /// No stored credentials match the request.
    #[error(
        "no credentials found{}",
        .username.as_ref().map(|u| format!(" for user '{u}'")).unwrap_or_default()
    )]
    CredentialsNotFound { username: Option<String> },

    /// No persisted portal session exists.
    #[error("no active session, please log in first")]
    SessionNotFound,

    /// Credential or session storage failures.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// An external command (VPN client, service manager) failed.
    #[error("command '{program}' failed: {message}")]
    Command { program: String, message: String },

    /// The caller combined arguments in an unsupported way.
    #[error("usage error: {0}")]
    Usage(String),
}

impl Error {
    /// Returns true for failures that end an attempt without being a fault:
    /// nothing is configured yet.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Error::CredentialsNotFound { .. })
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection could not be established.
    #[error("connection to {url} failed: {message}")]
    Connection { url: String, message: String },

    /// Request did not complete within the client timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Any other HTTP failure (body decoding, redirect loop, ...).
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Portal-shape mismatches.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The probe response was neither 204 nor a JavaScript redirect.
    #[error("probe response carries no window.location redirect")]
    NoRedirect,

    /// The login page has no form element.
    #[error("login page contains no form")]
    NoForm,

    /// The first form on the login page has no action attribute.
    #[error("login form has no action attribute")]
    NoFormAction,

    /// The login response carries no keepalive URL.
    #[error("login response contains no keepalive URL")]
    NoKeepalive,

    /// A URL could not be parsed or resolved.
    #[error("invalid URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
}

/// Storage-level errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// A stored file could not be (de)serialized.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// The OS secret store refused an operation.
    #[error("keyring error: {message}")]
    Keyring { message: String },

    /// No per-user data directory could be determined.
    #[error("could not determine data directory")]
    NoDataDir,
}
