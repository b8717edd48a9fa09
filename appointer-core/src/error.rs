//! Error types for appointer.

use thiserror::Error;

/// Errors that can occur while interpreting or booking a request.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Unsupported phrase: {0}")]
    ParseUnsupported(String),

    #[error("Request is insufficiently specified: {0}")]
    UnderspecifiedRequest(String),

    #[error("Local time is not a single Europe/Zurich instant: {0}")]
    AmbiguousLocalTime(String),

    #[error("Interaction channel failed: {0}")]
    Channel(String),

    #[error("Calendar service failed: {0}")]
    CalendarService(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for appointer operations.
pub type BookingResult<T> = Result<T, BookingError>;
