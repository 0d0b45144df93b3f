//! Demo authentication handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::TaskStore;
use crate::service::{AuthSession, Credentials, Registration};

use super::{ApiResult, ErrorResponse, JsonBody, error_response};

#[derive(Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
    #[schema(example = "Ada")]
    pub name: Option<String>,
}

#[derive(Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "demo@taskforge.local")]
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    /// Opaque session token; not checked by the task endpoints
    #[schema(example = "token_demo-1")]
    pub token: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: UserResponse {
                id: session.user.id,
                email: session.user.email,
                name: session.user.name,
            },
            token: session.token,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn register<P: TaskStore>(
    State(state): State<AppState<P>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let session = state
        .auth()
        .register(Registration {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(AuthResponse::from(session))))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 401, description = "Unknown user or wrong password", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn login<P: TaskStore>(
    State(state): State<AppState<P>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let session = state
        .auth()
        .login(Credentials {
            email: req.email,
            password: req.password,
        })
        .map_err(error_response)?;

    Ok(Json(AuthResponse::from(session)))
}
