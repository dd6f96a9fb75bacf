use crate::client::ApiClient;
use crate::scores::ScoreService;
use crate::session::SessionManager;

#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub session: SessionManager,
    pub scores: ScoreService,
}

impl AppState {
    pub fn new(client: ApiClient, session: SessionManager) -> Self {
        let scores = ScoreService::new(client.clone(), session.clone());
        Self {
            client,
            session,
            scores,
        }
    }

    pub async fn logout(&self) {
        self.session.logout().await;
        self.scores.clear().await;
    }
}
