use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Request timed out after {timeout_ms} ms")]
    #[diagnostic(code(expertmeet::timeout))]
    Timeout { timeout_ms: u64 },

    #[error("HTTP error {status}: {body}")]
    #[diagnostic(code(expertmeet::http))]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    #[diagnostic(code(expertmeet::network))]
    Network(String),

    #[error("Validation error: {0}")]
    #[diagnostic(code(expertmeet::validation))]
    Validation(String),

    #[error("Not found: {0}")]
    #[diagnostic(code(expertmeet::not_found))]
    NotFound(String),

    #[error("Invalid state: {0}")]
    #[diagnostic(code(expertmeet::invalid_state))]
    InvalidState(String),

    #[error("Not signed in")]
    #[diagnostic(code(expertmeet::unauthenticated), help("Log in before calling this endpoint"))]
    Unauthenticated,

    #[error("Environment error: {0}")]
    #[diagnostic(code(expertmeet::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(expertmeet::config))]
    Config(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(expertmeet::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(expertmeet::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(expertmeet::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(expertmeet::other))]
    Other(String),
}

impl Error {
    /// Whether a failed fetch attempt may be tried again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("Invalid URL: {}", err))
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create invalid state errors
pub fn invalid_state_error(message: &str) -> Error {
    Error::InvalidState(message.to_string())
}

/// Helper to create network errors
pub fn network_error(message: &str) -> Error {
    Error::Network(message.to_string())
}
