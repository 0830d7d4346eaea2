use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rutpoint_api_types::{ApiError, QueryError, messages};
use rutpoint_transit::{RankIdentifier, TransitError};

/// Request failure, mapped to a fixed status and message.
///
/// Detail is logged, never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid query: {0}")]
    Validation(String),

    #[error("rank not found: {0}")]
    NotFound(RankIdentifier),

    #[error(transparent)]
    Internal(#[from] TransitError),
}

impl From<QueryError> for ServiceError {
    fn from(error: QueryError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(detail) => {
                tracing::debug!(%detail, "rejected rank query");
                (StatusCode::BAD_REQUEST, messages::INVALID_QUERY)
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, messages::NOT_FOUND),
            Self::Internal(error) => {
                tracing::error!(%error, "rank query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL)
            }
        };

        (status, Json(ApiError::new(message))).into_response()
    }
}
