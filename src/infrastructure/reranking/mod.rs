mod cross_encoder;
mod http_reranker;
mod mock_reranker;
mod passthrough_reranker;
mod reranker_factory;

pub use cross_encoder::CandleCrossEncoder;
pub use http_reranker::HttpReranker;
pub use mock_reranker::MockReranker;
pub use passthrough_reranker::PassthroughReranker;
pub use reranker_factory::{RerankerFactory, RerankerFactoryError};

/// Maps raw logits to `(0, 1)`.
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
