//! Login and signup flows on top of the session.

use crate::client::ApiClient;
use crate::errors::ApiError;
use crate::models::Credentials;
use crate::session::SessionManager;
use thiserror::Error;
use tracing::error;

/// Login/signup failure; `Display` is the message shown on the form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Invalid(String),

    #[error("An unexpected error occurred. Please try again.")]
    Unexpected,

    #[error("Failed to sign up: {0}")]
    Signup(String),
}

fn validate(credentials: &Credentials) -> Result<(), String> {
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err("Username and password are required".to_string());
    }
    Ok(())
}

pub async fn log_in(
    client: &ApiClient,
    session: &SessionManager,
    credentials: &Credentials,
) -> Result<(), AuthError> {
    validate(credentials).map_err(AuthError::Invalid)?;

    let response = client.login(credentials).await.map_err(|err| {
        error!("login error: {err}");
        match err.api_message() {
            Some(message) => AuthError::Invalid(message.to_string()),
            None => AuthError::Unexpected,
        }
    })?;

    session
        .login(response.token, credentials.username.clone())
        .await
        .map_err(|err| {
            error!("login error: {err}");
            AuthError::Unexpected
        })
}

/// Creates the account, then logs straight in with the same credentials.
pub async fn sign_up(
    client: &ApiClient,
    session: &SessionManager,
    credentials: &Credentials,
) -> Result<(), AuthError> {
    validate(credentials).map_err(AuthError::Signup)?;

    let signup_failed = |err: ApiError| {
        error!("signup error: {err}");
        AuthError::Signup(
            err.api_message()
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string()),
        )
    };

    client.signup(credentials).await.map_err(signup_failed)?;
    let response = client.login(credentials).await.map_err(signup_failed)?;

    session
        .login(response.token, credentials.username.clone())
        .await
        .map_err(|err| {
            error!("signup error: {err}");
            AuthError::Signup(err.to_string())
        })
}
