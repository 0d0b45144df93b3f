//! API route configuration.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::{delete, get, post, put};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, AuthResponse, CreateTaskRequest, DeleteResponse, ErrorResponse, HealthResponse,
    LoginRequest, RegisterRequest, TaskResponse, UpdateTaskRequest, UserResponse,
};
use super::state::AppState;
use crate::db::TaskStore;

/// Build routes with generic store type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the TaskStore trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($P:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$P>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TaskForge API",
        version = "0.1.0",
        description = "Task resource API with relational storage and in-memory fallback",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::list_tasks,
        handlers::create_task,
        handlers::update_task,
        handlers::delete_task,
        handlers::register,
        handlers::login,
    ),
    components(
        schemas(
            HealthResponse,
            TaskResponse,
            CreateTaskRequest,
            UpdateTaskRequest,
            DeleteResponse,
            RegisterRequest,
            LoginRequest,
            UserResponse,
            AuthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "auth", description = "Demo registration and login")
    )
)]
pub struct ApiDoc;

/// Cross-origin policy.
///
/// With no configured origins any origin may call the API, but credentials
/// are not advertised: browsers reject `Allow-Credentials: true` alongside a
/// wildcard origin. Configured origins are mirrored back with credentials
/// allowed.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(methods)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
}

/// Create the API router with OpenAPI documentation
pub fn create_router<P: TaskStore>(state: AppState<P>, cors_origins: &[String]) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = routes!(P => {
        get "/health" => handlers::health,
    });

    let task_routes = routes!(P => {
        get "/tasks" => handlers::list_tasks,
        post "/tasks" => handlers::create_task,
        put "/tasks/{id}" => handlers::update_task,
        delete "/tasks/{id}" => handlers::delete_task,
    });

    let auth_routes = routes!(P => {
        post "/auth/register" => handlers::register,
        post "/auth/login" => handlers::login,
    });

    Router::new()
        .nest("/api", system_routes.merge(task_routes).merge(auth_routes))
        .merge(Scalar::with_url("/docs", api))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}
