use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

pub const MOCK_EMBEDDING_DIMENSION: usize = 64;

/// Hashed bag-of-words vectors: texts sharing words land close together.
pub struct MockEmbedder;

impl MockEmbedder {
    fn vectorize(text: &str) -> Embedding {
        let mut values = vec![0.0f32; MOCK_EMBEDDING_DIMENSION];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            values[(hasher.finish() % MOCK_EMBEDDING_DIMENSION as u64) as usize] += 1.0;
        }

        let norm: f32 = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            values.iter_mut().for_each(|v| *v /= norm);
        }
        Embedding::new(values)
    }
}

#[async_trait::async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        Ok(Self::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }
}
