use std::sync::Arc;

use crate::application::services::AnswerService;

#[derive(Clone)]
pub struct AppState {
    pub answer_service: Arc<AnswerService>,
    /// Static token expected in `Authorization: Bearer <token>`.
    pub bearer_token: Arc<str>,
}

impl AppState {
    pub fn new(answer_service: Arc<AnswerService>, bearer_token: impl Into<Arc<str>>) -> Self {
        Self {
            answer_service,
            bearer_token: bearer_token.into(),
        }
    }
}
