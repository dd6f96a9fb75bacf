//! In-process stand-in for the external score API.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Default)]
struct StubData {
    users: HashMap<String, String>,
    tokens: HashMap<String, String>,
    scores: HashMap<String, BTreeMap<String, u8>>,
    next_token: u64,
    fail_submissions: bool,
    scores_delay: Option<Duration>,
    /// (path, Authorization header) for every authenticated-route request.
    seen_auth: Vec<(String, Option<String>)>,
}

#[derive(Clone, Default)]
pub struct StubApi {
    data: Arc<Mutex<StubData>>,
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
struct CredentialsBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
struct SubmitBody {
    date: String,
    score: i64,
}

impl StubApi {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub api");
        let addr = listener.local_addr().unwrap();
        let stub = Self {
            data: Arc::default(),
            base_url: format!("http://{addr}"),
        };

        let app = Router::new()
            .route("/api/signup", post(signup))
            .route("/api/login", post(login))
            .route("/api/validate_token", get(validate_token))
            .route("/api/get_scores", get(get_scores))
            .route("/api/submit_score", post(submit_score))
            .with_state(stub.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        stub
    }

    pub fn add_user(&self, username: &str, password: &str) {
        self.data
            .lock()
            .unwrap()
            .users
            .insert(username.to_string(), password.to_string());
    }

    pub fn issue_token(&self, username: &str) -> String {
        let mut data = self.data.lock().unwrap();
        data.next_token += 1;
        let token = format!("token-{}-{username}", data.next_token);
        data.tokens.insert(token.clone(), username.to_string());
        token
    }

    pub fn revoke_all(&self) {
        self.data.lock().unwrap().tokens.clear();
    }

    pub fn fail_submissions(&self, fail: bool) {
        self.data.lock().unwrap().fail_submissions = fail;
    }

    /// Holds every `/api/get_scores` answer back by `delay`.
    pub fn delay_scores(&self, delay: Duration) {
        self.data.lock().unwrap().scores_delay = Some(delay);
    }

    pub fn insert_score(&self, username: &str, date: &str, score: u8) {
        self.data
            .lock()
            .unwrap()
            .scores
            .entry(username.to_string())
            .or_default()
            .insert(date.to_string(), score);
    }

    pub fn last_auth_header(&self, path: &str) -> Option<Option<String>> {
        self.data
            .lock()
            .unwrap()
            .seen_auth
            .iter()
            .rev()
            .find(|(seen, _)| seen == path)
            .map(|(_, header)| header.clone())
    }

    fn authenticate(&self, path: &str, headers: &HeaderMap) -> Result<String, Response> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let mut data = self.data.lock().unwrap();
        data.seen_auth.push((path.to_string(), header.clone()));

        header
            .as_deref()
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|token| data.tokens.get(token).cloned())
            .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Invalid or expired token"))
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn signup(State(stub): State<StubApi>, Json(body): Json<CredentialsBody>) -> Response {
    if body.username.is_empty() || body.password.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Username and password are required");
    }
    let mut data = stub.data.lock().unwrap();
    if data.users.contains_key(&body.username) {
        return error(StatusCode::BAD_REQUEST, "Username already exists");
    }
    data.users.insert(body.username, body.password);
    (
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    )
        .into_response()
}

async fn login(State(stub): State<StubApi>, Json(body): Json<CredentialsBody>) -> Response {
    let known = stub
        .data
        .lock()
        .unwrap()
        .users
        .get(&body.username)
        .is_some_and(|password| *password == body.password);
    if !known {
        return error(StatusCode::UNAUTHORIZED, "Invalid username or password");
    }
    let token = stub.issue_token(&body.username);
    Json(json!({ "token": token })).into_response()
}

async fn validate_token(State(stub): State<StubApi>, headers: HeaderMap) -> Response {
    match stub.authenticate("/api/validate_token", &headers) {
        Ok(username) => Json(json!({ "username": username })).into_response(),
        Err(response) => response,
    }
}

async fn get_scores(State(stub): State<StubApi>, headers: HeaderMap) -> Response {
    let username = match stub.authenticate("/api/get_scores", &headers) {
        Ok(username) => username,
        Err(response) => return response,
    };
    let delay = stub.data.lock().unwrap().scores_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let data = stub.data.lock().unwrap();
    let scores: Vec<_> = data
        .scores
        .get(&username)
        .map(|days| {
            days.iter()
                .map(|(date, score)| json!({ "date": date, "score": score }))
                .collect()
        })
        .unwrap_or_default();
    Json(scores).into_response()
}

async fn submit_score(
    State(stub): State<StubApi>,
    headers: HeaderMap,
    Json(body): Json<SubmitBody>,
) -> Response {
    let username = match stub.authenticate("/api/submit_score", &headers) {
        Ok(username) => username,
        Err(response) => return response,
    };
    if stub.data.lock().unwrap().fail_submissions {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }
    let score = match u8::try_from(body.score) {
        Ok(score @ 1..=10) => score,
        _ => return error(StatusCode::BAD_REQUEST, "Score must be between 1 and 10"),
    };
    stub.insert_score(&username, &body.date, score);
    Json(json!({ "message": "Score submitted successfully" })).into_response()
}
