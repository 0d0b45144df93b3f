//! Demo register/login flow.
//!
//! Tokens are opaque `token_<id>` strings. Nothing in the task API checks
//! them.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::db::{User, UserStore};

use super::{ServiceError, ServiceResult};

/// Register request; every field is required.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Login request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User fields safe to return to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user: PublicUser,
    pub token: String,
}

impl AuthSession {
    fn for_user(user: &User) -> Self {
        Self {
            user: PublicUser::from(user),
            token: format!("token_{}", user.id),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<UserStore>,
}

impl AuthService {
    pub fn new(users: Arc<UserStore>) -> Self {
        Self { users }
    }

    #[instrument(skip_all)]
    pub fn register(&self, registration: Registration) -> ServiceResult<AuthSession> {
        let (Some(email), Some(password), Some(name)) = (
            present(registration.email),
            present(registration.password),
            present(registration.name),
        ) else {
            return Err(ServiceError::validation(
                "Name, email and password are required",
            ));
        };

        let user = self
            .users
            .insert(&email, &password, &name)
            .map_err(|_| ServiceError::Conflict {
                message: "User already exists".to_string(),
            })?;

        info!(user_id = %user.id, "Registered user");
        Ok(AuthSession::for_user(&user))
    }

    #[instrument(skip_all)]
    pub fn login(&self, credentials: Credentials) -> ServiceResult<AuthSession> {
        let (Some(email), Some(password)) =
            (present(credentials.email), present(credentials.password))
        else {
            return Err(ServiceError::validation("Email and password are required"));
        };

        let user = self.users.get(&email).ok_or_else(|| ServiceError::Unauthorized {
            message: "User not found".to_string(),
        })?;

        if !user.verify_password(&password) {
            return Err(ServiceError::Unauthorized {
                message: "Invalid password".to_string(),
            });
        }

        Ok(AuthSession::for_user(&user))
    }
}
