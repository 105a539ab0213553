use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ExternalServiceError("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::ExternalServiceError("Failed to connect to external service".to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => AppError::RateLimitError("Too many requests".to_string()),
                404 => AppError::NotFound("External resource not found".to_string()),
                _ => AppError::ApiError(format!("HTTP {}: {}", status, err)),
            }
        } else {
            AppError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::InvalidInput(format!("Invalid date: {}", err))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::InvalidInput(format!("Invalid number: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl AppError {
    /// Whether a failed call is worth repeating after a backoff
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::ExternalServiceError(_) | AppError::RateLimitError(_)
        )
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_error_is_invalid_input() {
        let err: AppError = "abc".parse::<u32>().unwrap_err().into();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_chrono_error_is_invalid_input() {
        let err: AppError = chrono::NaiveDate::parse_from_str("2017-13-01", "%Y-%m-%d")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("Invalid input: Invalid date"));
    }

    #[test]
    fn test_transient_errors() {
        assert!(AppError::RateLimitError("x".into()).is_transient());
        assert!(AppError::ExternalServiceError("x".into()).is_transient());
        assert!(!AppError::NotFound("x".into()).is_transient());
        assert!(!AppError::InvalidInput("x".into()).is_transient());
    }
}
