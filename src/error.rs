use thiserror::Error;

/// Unified error type for release synchronization
#[derive(Error, Debug)]
pub enum ReleaseSyncError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to determine upstream GitHub repo: {0}")]
    Upstream(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Failed to serialize config file: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ReleaseSyncError>;

impl ReleaseSyncError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseSyncError::Config(msg.into())
    }

    /// Create an upstream resolution error with context
    pub fn upstream(msg: impl Into<String>) -> Self {
        ReleaseSyncError::Upstream(msg.into())
    }

    /// Create an API error from a response status and message
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        ReleaseSyncError::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        ReleaseSyncError::Prompt(msg.into())
    }

    /// Whether the hosting API rejected the credential
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ReleaseSyncError::Api { status: 401 | 403, .. })
    }
}
