use std::sync::Arc;

use crate::application::ports::Embedder;
use crate::presentation::config::{EmbeddingProvider, EmbeddingsSettings};

use super::{LocalCandleEmbedder, OpenAiEmbedder};

pub struct EmbedderFactory;

#[derive(Debug, thiserror::Error)]
pub enum EmbedderFactoryError {
    #[error("missing API key: the openai embedder requires embeddings.api_key")]
    MissingApiKey,
    #[error("model initialization failed: {0}")]
    InitializationFailed(String),
}

impl EmbedderFactory {
    pub fn create(settings: &EmbeddingsSettings) -> Result<Arc<dyn Embedder>, EmbedderFactoryError> {
        match settings.provider {
            EmbeddingProvider::Local => {
                tracing::info!(model = %settings.model, "Loading local Candle embedding model");
                let embedder = LocalCandleEmbedder::new(&settings.model)
                    .map_err(|e| EmbedderFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(embedder))
            }
            EmbeddingProvider::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or(EmbedderFactoryError::MissingApiKey)?;
                tracing::info!(model = %settings.model, "Using OpenAI-compatible embeddings");
                Ok(Arc::new(OpenAiEmbedder::new(
                    settings.base_url.clone(),
                    key,
                    settings.model.clone(),
                )))
            }
        }
    }
}
