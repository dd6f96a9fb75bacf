pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod heatmap;
pub mod models;
pub mod scores;
pub mod session;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use client::ApiClient;
pub use config::Config;
pub use session::{SessionManager, SessionState};
pub use state::AppState;
pub use storage::TokenStore;
