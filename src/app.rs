use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page).post(handlers::login_submit))
        .route("/signup", get(handlers::signup_page).post(handlers::signup_submit))
        .route("/logout", post(handlers::logout))
        .route("/dashboard", get(handlers::dashboard))
        .route("/scores", post(handlers::submit_score))
        .route("/api/session", get(handlers::get_session))
        .route("/api/heatmap", get(handlers::get_heatmap))
        .with_state(state)
}
