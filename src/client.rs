//! HTTP client for the external score API.
//!
//! The underlying `reqwest::Client` carries no default headers. Calls that
//! need authentication take the credential explicitly and attach it to that
//! one request.

use crate::errors::ApiError;
use crate::models::{
    ApiErrorBody, Credentials, LoginResponse, ScoreRecord, SubmitScoreRequest,
    ValidateTokenResponse,
};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::debug;

/// Opaque bearer credential.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Attaches `Authorization: Bearer <token>` when a credential is present.
pub fn authorize(request: RequestBuilder, credential: Option<&BearerToken>) -> RequestBuilder {
    match credential {
        Some(token) => request.bearer_auth(token.as_str()),
        None => request,
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get_scores(
        &self,
        credential: Option<&BearerToken>,
    ) -> Result<Vec<ScoreRecord>, ApiError> {
        let request = authorize(self.http.get(self.url("/api/get_scores")), credential);
        let response = request.send().await?;
        parse_json(response, Auth::Bearer).await
    }

    pub async fn submit_score(
        &self,
        credential: Option<&BearerToken>,
        body: &SubmitScoreRequest,
    ) -> Result<(), ApiError> {
        let request = authorize(self.http.post(self.url("/api/submit_score")), credential);
        let response = request.json(body).send().await?;
        expect_success(response, Auth::Bearer).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/api/login"))
            .json(credentials)
            .send()
            .await?;
        parse_json(response, Auth::Public).await
    }

    pub async fn signup(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/signup"))
            .json(credentials)
            .send()
            .await?;
        expect_success(response, Auth::Public).await
    }

    pub async fn validate_token(
        &self,
        credential: &BearerToken,
    ) -> Result<ValidateTokenResponse, ApiError> {
        let request = authorize(self.http.get(self.url("/api/validate_token")), Some(credential));
        let response = request.send().await?;
        parse_json(response, Auth::Bearer).await
    }
}

/// Whether a 401 on this call speaks about the session credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Public,
}

async fn parse_json<T: DeserializeOwned>(response: Response, auth: Auth) -> Result<T, ApiError> {
    let response = check_status(response, auth).await?;
    response
        .json()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn expect_success(response: Response, auth: Auth) -> Result<(), ApiError> {
    check_status(response, auth).await.map(|_| ())
}

async fn check_status(response: Response, auth: Auth) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    // A 401 from login/signup means bad credentials and carries a message.
    if status == StatusCode::UNAUTHORIZED && auth == Auth::Bearer {
        return Err(ApiError::Unauthorized);
    }

    let text = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), "score API rejected request");
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}
