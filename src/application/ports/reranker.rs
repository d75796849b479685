use async_trait::async_trait;

/// Second-stage relevance scoring over a small candidate set.
#[async_trait]
pub trait Reranker: Send + Sync {
    /// Returns one score per passage, in input order. Higher is more relevant.
    async fn score(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>, RerankerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RerankerError {
    #[error("rerank api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid rerank response: {0}")]
    InvalidResponse(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("expected {expected} scores, got {actual}")]
    ScoreCountMismatch { expected: usize, actual: usize },
}
