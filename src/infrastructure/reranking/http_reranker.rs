use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Reranker, RerankerError};

use super::sigmoid;

/// Cross-encoder served behind an OpenAI-style `/v1/rerank` endpoint.
pub struct HttpReranker {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [&'a str],
    top_n: usize,
}

#[derive(Deserialize)]
struct RerankResponse {
    results: Vec<RerankResultRaw>,
}

#[derive(Deserialize)]
struct RerankResultRaw {
    index: usize,
    relevance_score: f32,
}

impl HttpReranker {
    pub fn new(base_url: &str, model: String, timeout: Duration) -> Result<Self, RerankerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RerankerError::ApiRequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

#[async_trait]
impl Reranker for HttpReranker {
    async fn score(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>, RerankerError> {
        if passages.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(format!("{}/v1/rerank", self.base_url))
            .json(&RerankRequest {
                model: &self.model,
                query,
                documents: passages,
                top_n: passages.len(),
            })
            .send()
            .await
            .map_err(|e| RerankerError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RerankerError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body: RerankResponse = response
            .json()
            .await
            .map_err(|e| RerankerError::InvalidResponse(e.to_string()))?;

        scores_in_input_order(passages.len(), body.results)
    }
}

fn scores_in_input_order(
    len: usize,
    results: Vec<RerankResultRaw>,
) -> Result<Vec<f32>, RerankerError> {
    // Passages the server left out rank last.
    let mut scores = vec![f32::NEG_INFINITY; len];
    for result in results {
        let slot = scores.get_mut(result.index).ok_or_else(|| {
            RerankerError::InvalidResponse(format!("result index {} out of range", result.index))
        })?;
        *slot = sigmoid(result.relevance_score);
    }
    Ok(scores)
}
