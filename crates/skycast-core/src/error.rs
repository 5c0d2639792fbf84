//! Failure kinds for the resolution pipeline and the history log

use thiserror::Error;

/// Infrastructure fault talking to an external service
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    #[error("{service} returned an unreadable response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

impl UpstreamError {
    pub fn transport(service: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            service,
            message: message.into(),
        }
    }

    pub fn decode(service: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            service,
            message: message.into(),
        }
    }

    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Decode { .. } => "decode",
        }
    }
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The lookup answered but had no candidates for the name
    #[error("no place found for '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Errors surfaced by [`crate::WeatherResolver`]
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("city not found: {0}")]
    CityNotFound(String),

    #[error("upstream service failure")]
    UpstreamFailure(#[source] UpstreamError),
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// History store access fault
#[derive(Debug, Error)]
#[error("history store error: {source}")]
pub struct PersistenceError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl PersistenceError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_kind_labels() {
        assert_eq!(UpstreamError::transport("geocoding", "refused").kind(), "transport");
        assert_eq!(UpstreamError::decode("forecast", "eof").kind(), "decode");
    }

    #[test]
    fn persistence_error_wraps_message() {
        let err = PersistenceError::new("connection reset");
        assert_eq!(err.to_string(), "history store error: connection reset");
    }
}
