use std::collections::HashSet;

use crate::application::ports::{Reranker, RerankerError};

/// Scores a passage by how many distinct query words it contains.
pub struct MockReranker;

fn words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[async_trait::async_trait]
impl Reranker for MockReranker {
    async fn score(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>, RerankerError> {
        let query_words = words(query);
        Ok(passages
            .iter()
            .map(|p| words(p).intersection(&query_words).count() as f32)
            .collect())
    }
}
