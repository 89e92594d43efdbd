//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use stringlab_core::{FilterError, QueryError, StoreError};
use thiserror::Error;

use crate::models::ErrorResponse;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request input
    #[error("{0}")]
    BadRequest(String),

    /// Input present but of the wrong type or shape
    #[error("{0}")]
    Unprocessable(String),

    /// No route matches the request path
    #[error("No route for '{0}'")]
    RouteNotFound(String),

    /// Store conflict or lookup failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid structured filter parameter
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Natural-language query failure
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Filter(_) => StatusCode::BAD_REQUEST,
            ApiError::Query(QueryError::InvalidNumber(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Query(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unprocessable(_) => "unprocessable",
            ApiError::RouteNotFound(_) => "not_found",
            ApiError::Store(StoreError::Conflict(_)) => "conflict",
            ApiError::Store(StoreError::NotFound(_)) => "not_found",
            ApiError::Filter(_) => "invalid_filter",
            ApiError::Query(QueryError::Missing) => "missing_query",
            ApiError::Query(QueryError::Uninterpretable(_)) => "uninterpretable_query",
            ApiError::Query(QueryError::InvalidNumber(_)) => "invalid_number",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, kind = self.kind(), error = %self, "request rejected");

        let body = Json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (ApiError::from(StoreError::Conflict("a".into())), StatusCode::CONFLICT),
            (ApiError::from(StoreError::NotFound("a".into())), StatusCode::NOT_FOUND),
            (ApiError::RouteNotFound("/nope".into()), StatusCode::NOT_FOUND),
            (ApiError::from(QueryError::Missing), StatusCode::BAD_REQUEST),
            (
                ApiError::from(QueryError::Uninterpretable("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(QueryError::InvalidNumber("x".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(FilterError::InvalidValue {
                    field: "minLength",
                    value: "x".into(),
                    expected: "a number",
                }),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.status(), status, "{error}");
        }
    }
}
