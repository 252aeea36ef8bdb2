//! Error types for menumaster

use thiserror::Error;

/// Banner shown when the analyze action fires without an image
pub const MISSING_IMAGE_MESSAGE: &str = "Please upload a menu image first.";

/// Banner shown for any failure of the outbound model call
pub const SERVICE_FAILURE_MESSAGE: &str = "Sorry, something went wrong while analyzing the menu. \
The image might be too blurry or an API error occurred. Please try again.";

/// Banner shown when the model reply does not match the requested structure
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "The response from the AI was not in the correct format.";

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Failure category, one per row of the error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally before any outbound call
    InputMissing,
    /// The model call itself failed
    Service,
    /// The reply arrived but did not parse as the expected structure
    SchemaViolation,
    /// Local I/O, configuration or image decoding problem
    Local,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),

    #[error("No menu image selected")]
    MissingImage,

    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    #[error("API key not set (export GEMINI_API_KEY or run `menumaster config --set-api-key`)")]
    MissingApiKey,

    #[error("AI service error: {0}")]
    Service(String),

    #[error("Malformed AI response: {reason}")]
    MalformedResponse { reason: String, raw: String },
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(ConfigError::ParseError(err.to_string()))
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(ConfigError::SaveError(err.to_string()))
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingImage => ErrorKind::InputMissing,
            Error::MissingApiKey | Error::Service(_) => ErrorKind::Service,
            Error::MalformedResponse { .. } => ErrorKind::SchemaViolation,
            _ => ErrorKind::Local,
        }
    }

    /// Text for the error banner.
    ///
    /// Service failures collapse into one generic message; the detail only
    /// goes to the log.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::InputMissing => MISSING_IMAGE_MESSAGE.to_string(),
            ErrorKind::Service => SERVICE_FAILURE_MESSAGE.to_string(),
            ErrorKind::SchemaViolation => MALFORMED_RESPONSE_MESSAGE.to_string(),
            ErrorKind::Local => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_follow_taxonomy() {
        assert_eq!(Error::MissingImage.kind(), ErrorKind::InputMissing);
        assert_eq!(Error::MissingApiKey.kind(), ErrorKind::Service);
        assert_eq!(Error::Service("quota".into()).kind(), ErrorKind::Service);
        let malformed = Error::MalformedResponse {
            reason: "expected value".into(),
            raw: "oops".into(),
        };
        assert_eq!(malformed.kind(), ErrorKind::SchemaViolation);
        assert_eq!(Error::FileNotFound("menu.jpg".into()).kind(), ErrorKind::Local);
    }

    #[test]
    fn test_service_detail_stays_out_of_banner() {
        let err = Error::Service("HTTP 429 quota exhausted".into());
        assert_eq!(err.user_message(), SERVICE_FAILURE_MESSAGE);
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_malformed_banner_differs_from_service_banner() {
        let malformed = Error::MalformedResponse {
            reason: "EOF".into(),
            raw: String::new(),
        };
        assert_ne!(malformed.user_message(), Error::Service("x".into()).user_message());
        assert_eq!(malformed.user_message(), MALFORMED_RESPONSE_MESSAGE);
    }
}
