use std::sync::Arc;

use club_client::ClubApi;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn ClubApi>,
}

impl AppState {
    pub fn new(api: Arc<dyn ClubApi>) -> Self {
        Self { api }
    }
}
