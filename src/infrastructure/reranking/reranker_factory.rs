use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::Reranker;
use crate::presentation::config::{RerankerProvider, RerankerSettings};

use super::{CandleCrossEncoder, HttpReranker, PassthroughReranker};

pub struct RerankerFactory;

#[derive(Debug, thiserror::Error)]
pub enum RerankerFactoryError {
    #[error("reranker.base_url is required for the http reranker")]
    MissingBaseUrl,
    #[error("reranker initialization failed: {0}")]
    InitializationFailed(String),
}

impl RerankerFactory {
    pub fn create(settings: &RerankerSettings) -> Result<Arc<dyn Reranker>, RerankerFactoryError> {
        match settings.provider {
            RerankerProvider::Local => {
                tracing::info!(model = %settings.model, "Loading local cross-encoder");
                let reranker = CandleCrossEncoder::new(&settings.model)
                    .map_err(|e| RerankerFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(reranker))
            }
            RerankerProvider::Http => {
                let base_url = settings
                    .base_url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .ok_or(RerankerFactoryError::MissingBaseUrl)?;
                tracing::info!(model = %settings.model, base_url, "Using HTTP reranker");
                let reranker = HttpReranker::new(
                    base_url,
                    settings.model.clone(),
                    Duration::from_secs(settings.timeout_secs),
                )
                .map_err(|e| RerankerFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(reranker))
            }
            RerankerProvider::None => {
                tracing::info!("Reranking disabled, keeping retrieval order");
                Ok(Arc::new(PassthroughReranker))
            }
        }
    }
}
