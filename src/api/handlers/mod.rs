//! Request handlers and wire DTOs.

mod auth;
mod system;
mod tasks;

use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;
use utoipa::ToSchema;

use crate::service::ServiceError;

pub use auth::*;
pub use system::*;
pub use tasks::*;

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Task not found")]
    pub error: String,
}

pub(crate) type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

pub(crate) fn error_response(e: ServiceError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Conflict { .. } => StatusCode::CONFLICT,
        ServiceError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        ServiceError::Backend { .. } => {
            error!(error = %e, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// JSON request body whose rejections are reported as 400 `ErrorResponse`s
/// instead of axum's plain-text 415/422.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: rejection.body_text(),
                }),
            )),
        }
    }
}
