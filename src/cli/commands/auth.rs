use serde::{Deserialize, Serialize};

use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;

#[derive(Debug, Deserialize)]
struct User {
    id: String,
    email: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: User,
    token: String,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

fn format_session(verb: &str, auth: &AuthResponse) -> String {
    format!(
        "✓ {} {} <{}> ({})\nToken: {}",
        verb, auth.user.name, auth.user.email, auth.user.id, auth.token
    )
}

pub async fn register(
    api_client: &ApiClient,
    email: &str,
    password: &str,
    name: &str,
) -> CliResult<String> {
    let response = api_client
        .post("/auth/register")
        .json(&RegisterRequest {
            email,
            password,
            name,
        })
        .send()
        .await?;
    let auth: AuthResponse = ApiClient::handle_response(response).await?;

    Ok(format_session("Registered", &auth))
}

pub async fn login(api_client: &ApiClient, email: &str, password: &str) -> CliResult<String> {
    let response = api_client
        .post("/auth/login")
        .json(&LoginRequest { email, password })
        .send()
        .await?;
    let auth: AuthResponse = ApiClient::handle_response(response).await?;

    Ok(format_session("Logged in as", &auth))
}
