use std::{fmt, io};

/// Crate-wide `Result` type using [`PantryError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, PantryError>;

/// Top-level error type for pantry operations.
///
/// Suggestion failures never surface as a `PantryError`: candidate sources
/// degrade to an empty list. This type covers the host-facing paths
/// (configuration, the recipe webhook, file I/O).
#[derive(Debug)]
pub enum PantryError {
    /// Configuration errors.
    Config(ConfigError),

    /// Candidate source errors (only surfaced when building a source).
    Source(SourceError),

    /// Recipe webhook errors.
    Webhook(WebhookError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Invalid config format.
    InvalidFormat(String),

    /// Missing required field.
    MissingField(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Errors raised by an ingredient search backend.
///
/// A [`DynamicSource`](crate::autocomplete::DynamicSource) records these and
/// resolves to an empty candidate list instead of propagating them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Network failure or unreachable service.
    Unavailable(String),

    /// The service answered with a non-success status code.
    Status(u16),

    /// The response body could not be decoded at all.
    MalformedPayload(String),

    /// The lookup exceeded its deadline.
    Timeout,
}

/// Recipe webhook errors.
#[derive(Debug)]
pub enum WebhookError {
    /// No webhook URL has been configured.
    MissingUrl,

    /// The configured webhook URL is not a usable http(s) URL.
    InvalidUrl(String),

    /// No non-blank ingredient was supplied.
    NoIngredients,

    /// The request could not be delivered.
    RequestFailed(String),

    /// The webhook answered with a non-success status code.
    Status(u16),
}

/// Error returned by a host value binding when it rejects a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The host refused the value.
    Rejected(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for PantryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PantryError::Config(e) => write!(f, "Configuration error: {e}"),
            PantryError::Source(e) => write!(f, "Ingredient source error: {e}"),
            PantryError::Webhook(e) => write!(f, "Webhook error: {e}"),
            PantryError::Io(e) => write!(f, "I/O error: {e}"),
            PantryError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::MissingField(field) => write!(f, "Missing required field: {field}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unavailable(msg) => write!(f, "Source unavailable: {msg}"),
            SourceError::Status(code) => write!(f, "Source returned status {code}"),
            SourceError::MalformedPayload(msg) => write!(f, "Malformed payload: {msg}"),
            SourceError::Timeout => write!(f, "Lookup timed out"),
        }
    }
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookError::MissingUrl => {
                write!(f, "No webhook URL configured (use `pantry config --set-webhook URL`)")
            }
            WebhookError::InvalidUrl(url) => write!(f, "Invalid webhook URL: {url}"),
            WebhookError::NoIngredients => write!(f, "Please enter at least one ingredient"),
            WebhookError::RequestFailed(msg) => write!(f, "Request failed: {msg}"),
            WebhookError::Status(code) => write!(f, "Webhook returned status {code}"),
        }
    }
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::Rejected(msg) => write!(f, "Value rejected: {msg}"),
        }
    }
}

impl std::error::Error for PantryError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for SourceError {}
impl std::error::Error for WebhookError {}
impl std::error::Error for BindingError {}

/* ========================= Conversions ========================= */

impl From<io::Error> for PantryError {
    fn from(err: io::Error) -> Self {
        PantryError::Io(err)
    }
}

impl From<ConfigError> for PantryError {
    fn from(err: ConfigError) -> Self {
        PantryError::Config(err)
    }
}

impl From<SourceError> for PantryError {
    fn from(err: SourceError) -> Self {
        PantryError::Source(err)
    }
}

impl From<WebhookError> for PantryError {
    fn from(err: WebhookError) -> Self {
        PantryError::Webhook(err)
    }
}

impl From<String> for PantryError {
    fn from(msg: String) -> Self {
        PantryError::Generic(msg)
    }
}

impl From<&str> for PantryError {
    fn from(msg: &str) -> Self {
        PantryError::Generic(msg.to_owned())
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if let Some(status) = err.status() {
            SourceError::Status(status.as_u16())
        } else {
            SourceError::Unavailable(err.to_string())
        }
    }
}

impl From<reqwest::Error> for WebhookError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => WebhookError::Status(status.as_u16()),
            None => WebhookError::RequestFailed(err.to_string()),
        }
    }
}
