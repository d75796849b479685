use async_trait::async_trait;

use crate::application::ports::{Reranker, RerankerError};

/// Keeps the nearest-neighbour order: earlier candidates score higher.
pub struct PassthroughReranker;

#[async_trait]
impl Reranker for PassthroughReranker {
    async fn score(&self, _query: &str, passages: &[&str]) -> Result<Vec<f32>, RerankerError> {
        let n = passages.len();
        Ok((0..n).map(|rank| (n - rank) as f32).collect())
    }
}
