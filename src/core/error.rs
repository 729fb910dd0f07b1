//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown level name passed to a strict parse
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Handler failure with the handler's name
    #[error("Handler error ({handler}): {message}")]
    HandlerError { handler: String, message: String },
}

impl LoggerError {
    /// Create a handler error
    pub fn handler(handler: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HandlerError {
            handler: handler.into(),
            message: message.into(),
        }
    }
}
