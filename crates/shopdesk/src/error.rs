//! CLI error types with miette diagnostics.
//!
//! Maps `shopdesk_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use shopdesk_api::ErrorKind;
use shopdesk_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the shopdesk backend")]
    #[diagnostic(
        code(shopdesk::connection_failed),
        help(
            "Check that the backend is running and the API URL is right.\n\
             Reason: {reason}\n\
             Try: shopdesk config show"
        )
    )]
    ConnectionFailed { reason: String },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(shopdesk::tls_error),
        help("Use --insecure (-k) for self-signed backends, or set ca_cert in your profile.")
    )]
    TlsError { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(shopdesk::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Session rejected: {message}")]
    #[diagnostic(
        code(shopdesk::auth_failed),
        help("The stored session was cleared.\nRun: shopdesk login")
    )]
    AuthFailed { message: String },

    #[error("Not logged in")]
    #[diagnostic(code(shopdesk::not_logged_in), help("Run: shopdesk login"))]
    NotLoggedIn,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(shopdesk::no_credentials),
        help(
            "Store a password with: shopdesk config set-password\n\
             Or set the SHOPDESK_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Nothing found at '{path}'")]
    #[diagnostic(
        code(shopdesk::not_found),
        help("Check the ID; list commands show what exists.")
    )]
    NotFound { path: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(shopdesk::api_error), help("Backend code: {code}"))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(shopdesk::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(shopdesk::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: shopdesk config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No API URL configured")]
    #[diagnostic(
        code(shopdesk::no_config),
        help(
            "Create a profile with: shopdesk config init\n\
             Or pass --api-url / set SHOPDESK_API_URL.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(shopdesk::config))]
    Config(String),

    #[error("Could not store session: {0}")]
    #[diagnostic(code(shopdesk::storage))]
    Storage(String),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(shopdesk::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NotLoggedIn | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NoConfig { .. } | Self::ProfileNotFound { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── shopdesk_api::Error → CliError ───────────────────────────────────

impl From<shopdesk_api::Error> for CliError {
    fn from(err: shopdesk_api::Error) -> Self {
        use shopdesk_api::Error as E;

        if err.is_timeout() {
            return Self::Timeout;
        }

        match err {
            E::NotAuthenticated => Self::NotLoggedIn,
            E::Unauthorized { message, .. } => Self::AuthFailed { message },
            E::NotFound { path } => Self::NotFound { path },
            E::Application { code, message } => Self::ApiError {
                code: code.to_string(),
                message,
            },
            E::Http { status, message } => Self::ApiError {
                code: format!("HTTP {status}"),
                message,
            },
            E::Tls(reason) => Self::TlsError { reason },
            E::InvalidUpload { reason } => Self::Validation {
                field: "file".into(),
                reason,
            },
            E::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            E::Config(reason) => Self::Config(reason),
            E::Storage(message) => Self::Storage(message),
            E::Io(e) => Self::Io(e),
            other => match other.kind() {
                ErrorKind::Network => Self::ConnectionFailed {
                    reason: other.to_string(),
                },
                ErrorKind::Unauthorized => Self::AuthFailed {
                    message: other.to_string(),
                },
                ErrorKind::NotFound => Self::NotFound {
                    path: other.to_string(),
                },
                _ => Self::ApiError {
                    code: other.kind().to_string(),
                    message: other.to_string(),
                },
            },
        }
    }
}

// ── ConfigError → CliError ──────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile(name) => Self::ProfileNotFound {
                name,
                available: "(see: shopdesk config profiles)".into(),
            },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_exit_codes() {
        let cases = [
            (
                shopdesk_api::Error::Unauthorized {
                    status: 401,
                    message: "expired".into(),
                },
                exit_code::AUTH,
            ),
            (shopdesk_api::Error::NotAuthenticated, exit_code::AUTH),
            (
                shopdesk_api::Error::NotFound {
                    path: "shop/9".into(),
                },
                exit_code::NOT_FOUND,
            ),
            (
                shopdesk_api::Error::Application {
                    code: 2001,
                    message: "Shop slug already taken".into(),
                },
                exit_code::GENERAL,
            ),
            (
                shopdesk_api::Error::InvalidUpload {
                    reason: "too big".into(),
                },
                exit_code::USAGE,
            ),
        ];

        for (err, code) in cases {
            assert_eq!(CliError::from(err).exit_code(), code);
        }
    }

    #[test]
    fn application_message_is_shown_verbatim() {
        let err = CliError::from(shopdesk_api::Error::Application {
            code: 2001,
            message: "Shop slug already taken".into(),
        });
        assert_eq!(err.to_string(), "Shop slug already taken");
    }
}
