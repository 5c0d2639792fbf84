//! Mapping of failures onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skycast_core::{PersistenceError, ResolveError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("history is unavailable")]
    Persistence(#[from] PersistenceError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Resolve(ResolveError::CityNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Resolve(ResolveError::UpstreamFailure(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::UpstreamError;

    #[test]
    fn client_and_server_faults_stay_distinct() {
        assert_eq!(
            ApiError::InvalidRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ResolveError::CityNotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        let upstream = ResolveError::UpstreamFailure(UpstreamError::decode("forecast", "eof"));
        assert!(ApiError::from(upstream).status().is_server_error());
        assert!(ApiError::from(PersistenceError::new("gone"))
            .status()
            .is_server_error());
    }

    #[test]
    fn upstream_details_are_not_leaked() {
        let err = ApiError::from(ResolveError::UpstreamFailure(UpstreamError::transport(
            "geocoding",
            "tcp connect to 10.0.0.3 refused",
        )));
        assert_eq!(err.to_string(), "upstream service failure");
    }
}
