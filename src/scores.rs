use crate::client::ApiClient;
use crate::errors::ApiError;
use crate::heatmap::{build_heatmap_at, Heatmap};
use crate::models::{date_key, Score, ScoreRecord, SubmitScoreRequest};
use crate::session::SessionManager;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Fetches and submits scores for the current session and keeps the last
/// fetched list in memory.
#[derive(Clone)]
pub struct ScoreService {
    client: ApiClient,
    session: SessionManager,
    scores: Arc<Mutex<Vec<ScoreRecord>>>,
}

impl ScoreService {
    pub fn new(client: ApiClient, session: SessionManager) -> Self {
        Self {
            client,
            session,
            scores: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn current(&self) -> Vec<ScoreRecord> {
        self.scores.lock().await.clone()
    }

    pub async fn clear(&self) {
        self.scores.lock().await.clear();
    }

    pub async fn heatmap_at(&self, today: NaiveDate) -> Heatmap {
        build_heatmap_at(today, &self.scores.lock().await)
    }

    /// Replaces the in-memory list with the API's. On failure the previous
    /// list stays; a 401 also ends the session.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let (credential, generation) = self.session.credential_at().await;
        let result = self.client.get_scores(credential.as_ref()).await;

        match self.session.check(result).await {
            Ok(scores) => {
                // Held while checking so a logout's clear() lands after this write.
                let mut current = self.scores.lock().await;
                if self.session.generation().await == generation {
                    *current = scores;
                } else {
                    debug!("discarding scores fetched for an ended session");
                }
                Ok(())
            }
            Err(err) => {
                if err.is_unauthorized() {
                    self.clear().await;
                } else {
                    error!("error fetching scores: {err}");
                }
                Err(err)
            }
        }
    }

    /// Sends one day's score, then re-fetches the list. A failed re-fetch is
    /// logged by `refresh` and does not fail the submission.
    pub async fn submit(&self, date: NaiveDate, score: Score) -> Result<(), ApiError> {
        let credential = self.session.credential().await;
        let body = SubmitScoreRequest {
            date: date_key(date),
            score,
        };
        let result = self.client.submit_score(credential.as_ref(), &body).await;

        match self.session.check(result).await {
            Ok(()) => {
                info!(date = %body.date, score = %score, "score submitted");
                let _ = self.refresh().await;
                Ok(())
            }
            Err(err) => {
                if err.is_unauthorized() {
                    self.clear().await;
                } else {
                    error!("error submitting score: {err}");
                }
                Err(err)
            }
        }
    }
}
