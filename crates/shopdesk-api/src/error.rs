use thiserror::Error;

/// Top-level error type for the `shopdesk-api` crate.
///
/// Covers every failure mode of the service layer: transport, HTTP status,
/// the application-level `code` carried in the JSON envelope, decoding,
/// upload validation, and session storage. Callers branch on [`Error::kind`]
/// rather than matching individual variants.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend rejected the bearer token (HTTP 401 or 403).
    ///
    /// By the time this is returned the stored session has been cleared.
    #[error("Unauthorized (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// No session is stored; a login is required before this call.
    #[error("Not logged in")]
    NotAuthenticated,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP status ─────────────────────────────────────────────────
    /// HTTP 404 for the requested path.
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Any other non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // ── Envelope ────────────────────────────────────────────────────
    /// HTTP 2xx whose envelope `code` is not the success code.
    /// `message` is the backend's message, verbatim.
    #[error("{message}")]
    Application { code: i64, message: String },

    /// Envelope reported success but carried no `data`.
    #[error("Response for {path} carried no data")]
    MissingData { path: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Configuration ───────────────────────────────────────────────
    /// A required client setting is missing or unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    // ── Uploads ─────────────────────────────────────────────────────
    /// Upload rejected before sending (size or MIME type).
    #[error("Invalid upload: {reason}")]
    InvalidUpload { reason: String },

    // ── Session storage ─────────────────────────────────────────────
    /// Reading or writing the persisted session failed.
    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`], consumed uniformly by front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Unauthorized,
    NotFound,
    Application,
    Server,
    Decode,
    Validation,
    Storage,
}

impl Error {
    /// Classify this error into the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(e) => match e.status() {
                Some(s) if s == reqwest::StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
                Some(s) if s == reqwest::StatusCode::FORBIDDEN => ErrorKind::Unauthorized,
                Some(s) if s == reqwest::StatusCode::NOT_FOUND => ErrorKind::NotFound,
                Some(_) => ErrorKind::Server,
                None if e.is_decode() => ErrorKind::Decode,
                None => ErrorKind::Network,
            },
            Self::Tls(_) => ErrorKind::Network,
            Self::Unauthorized { .. } | Self::NotAuthenticated => ErrorKind::Unauthorized,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Application { .. } => ErrorKind::Application,
            Self::Http { .. } => ErrorKind::Server,
            Self::Deserialization { .. } | Self::MissingData { .. } => ErrorKind::Decode,
            Self::InvalidUrl(_) | Self::InvalidUpload { .. } | Self::Config(_) => {
                ErrorKind::Validation
            }
            Self::Storage(_) | Self::Io(_) => ErrorKind::Storage,
        }
    }

    /// Returns `true` if the session is gone and a fresh login is needed.
    pub fn is_auth_expired(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Returns `true` for connect failures and timeouts.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// The application-level envelope code, if this error carries one.
    pub fn application_code(&self) -> Option<i64> {
        match self {
            Self::Application { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The HTTP status, if this error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
