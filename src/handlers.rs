use crate::auth::{log_in, sign_up};
use crate::errors::ApiError;
use crate::heatmap::Heatmap;
use crate::models::{date_key, parse_date, Credentials, DashboardQuery, Score, ScoreForm};
use crate::session::{SessionSnapshot, SessionState};
use crate::state::AppState;
use crate::ui::{render_dashboard, render_loading, render_login, render_signup, DashboardView};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Local;

pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn login_page(State(state): State<AppState>) -> Response {
    if state.session.username().await.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(render_login("", None)).into_response()
}

pub async fn login_submit(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Response {
    match log_in(&state.client, &state.session, &credentials).await {
        Ok(()) => Redirect::to("/dashboard").into_response(),
        Err(err) => {
            Html(render_login(&credentials.username, Some(&err.to_string()))).into_response()
        }
    }
}

pub async fn signup_page(State(state): State<AppState>) -> Response {
    if state.session.username().await.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(render_signup("", None)).into_response()
}

pub async fn signup_submit(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Response {
    match sign_up(&state.client, &state.session, &credentials).await {
        Ok(()) => Redirect::to("/dashboard").into_response(),
        Err(err) => {
            Html(render_signup(&credentials.username, Some(&err.to_string()))).into_response()
        }
    }
}

pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.logout().await;
    Redirect::to("/login")
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    match state.session.state().await {
        SessionState::Loading => return Html(render_loading()).into_response(),
        SessionState::Anonymous => return Redirect::to("/login").into_response(),
        SessionState::Authenticated { .. } => {}
    }

    if let Err(ApiError::Unauthorized) = state.scores.refresh().await {
        return Redirect::to("/login").into_response();
    }

    let form = ScoreForm {
        date: query.date.unwrap_or_else(today_string),
        score: String::new(),
    };
    Html(dashboard_page(&state, &form, None).await).into_response()
}

pub async fn submit_score(
    State(state): State<AppState>,
    Form(form): Form<ScoreForm>,
) -> Response {
    let parsed = parse_date(&form.date)
        .and_then(|date| Score::parse(&form.score).map(|score| (date, score)));
    let (date, score) = match parsed {
        Ok(values) => values,
        Err(message) => {
            let page = dashboard_page(&state, &form, Some(&message)).await;
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
        }
    };

    match state.scores.submit(date, score).await {
        Ok(()) => Redirect::to(&format!("/dashboard?date={}", date_key(date))).into_response(),
        Err(ApiError::Unauthorized) => Redirect::to("/login").into_response(),
        // Already logged; the form comes back as the user left it.
        Err(_) => Html(dashboard_page(&state, &form, None).await).into_response(),
    }
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot().await)
}

pub async fn get_heatmap(State(state): State<AppState>) -> Json<Heatmap> {
    Json(state.scores.heatmap_at(Local::now().date_naive()).await)
}

async fn dashboard_page(state: &AppState, form: &ScoreForm, error: Option<&str>) -> String {
    let username = state
        .session
        .username()
        .await
        .unwrap_or_else(|| "User".to_string());
    let heatmap = state.scores.heatmap_at(Local::now().date_naive()).await;
    render_dashboard(&DashboardView {
        username: &username,
        form,
        error,
        heatmap: &heatmap,
    })
}

fn today_string() -> String {
    date_key(Local::now().date_naive())
}
