//! Tests for AuthService.

use std::sync::Arc;

use crate::db::UserStore;
use crate::service::{AuthService, Credentials, Registration, ServiceError};

fn service() -> AuthService {
    AuthService::new(Arc::new(UserStore::with_demo_user()))
}

fn registration(email: &str, password: &str, name: &str) -> Registration {
    Registration {
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        name: Some(name.to_string()),
    }
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials {
        email: Some(email.to_string()),
        password: Some(password.to_string()),
    }
}

#[test]
fn demo_account_can_log_in() {
    let session = service()
        .login(credentials("demo@taskforge.local", "demo123"))
        .unwrap();

    assert_eq!(session.user.id, "demo-1");
    assert_eq!(session.user.name, "Demo User");
    assert_eq!(session.token, "token_demo-1");
}

#[test]
fn register_then_login() {
    let auth = service();

    let registered = auth.register(registration("ada@example.com", "pw", "Ada")).unwrap();
    let logged_in = auth.login(credentials("ada@example.com", "pw")).unwrap();

    assert_eq!(registered, logged_in);
    assert_eq!(logged_in.token, format!("token_{}", logged_in.user.id));
}

#[test]
fn register_requires_every_field() {
    let auth = service();

    let err = auth.register(registration("ada@example.com", "pw", "")).unwrap_err();
    assert_eq!(
        err,
        ServiceError::validation("Name, email and password are required")
    );

    let err = auth.register(Registration::default()).unwrap_err();
    assert!(matches!(err, ServiceError::Validation { .. }));
}

#[test]
fn register_existing_email_conflicts() {
    let err = service()
        .register(registration("demo@taskforge.local", "x", "Again"))
        .unwrap_err();

    assert_eq!(err.to_string(), "User already exists");
    assert!(matches!(err, ServiceError::Conflict { .. }));
}

#[test]
fn login_reports_unknown_user_and_bad_password() {
    let auth = service();

    let unknown = auth.login(credentials("nobody@x.y", "pw")).unwrap_err();
    assert_eq!(unknown.to_string(), "User not found");

    let wrong = auth
        .login(credentials("demo@taskforge.local", "nope"))
        .unwrap_err();
    assert_eq!(wrong.to_string(), "Invalid password");
    assert!(matches!(wrong, ServiceError::Unauthorized { .. }));
}

#[test]
fn login_requires_email_and_password() {
    let err = service()
        .login(Credentials {
            email: Some("demo@taskforge.local".to_string()),
            password: None,
        })
        .unwrap_err();

    assert_eq!(err, ServiceError::validation("Email and password are required"));
}
