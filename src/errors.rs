// errors.rs
use crate::event::EventId;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    HttpStatus(StatusCode),

    #[error("Event with ID {0} not found")]
    NotFound(EventId),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

/// Coarse classification callers match on instead of inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-success status or transport failure.
    Network,
    /// The remote side reported the resource as absent.
    NotFound,
    /// A draft or endpoint was rejected before any request was sent.
    Validation,
}

impl EventError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EventError::NetworkError(_) | EventError::HttpStatus(_) => ErrorKind::Network,
            EventError::NotFound(_) => ErrorKind::NotFound,
            EventError::MissingField(_) | EventError::InvalidUrl(_) => ErrorKind::Validation,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid base URL scheme '{0}'. Only http/https supported.")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_explicit() {
        assert_eq!(EventError::HttpStatus(StatusCode::BAD_GATEWAY).kind(), ErrorKind::Network);
        assert_eq!(EventError::NotFound(EventId::Numeric(7)).kind(), ErrorKind::NotFound);
        assert_eq!(EventError::MissingField("title").kind(), ErrorKind::Validation);
        assert!(!EventError::HttpStatus(StatusCode::NOT_FOUND).is_not_found());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            EventError::HttpStatus(StatusCode::INTERNAL_SERVER_ERROR).to_string(),
            "HTTP error! status: 500 Internal Server Error"
        );
        assert_eq!(
            EventError::NotFound(EventId::Text("abc".to_string())).to_string(),
            "Event with ID abc not found"
        );
    }
}
