mod chat_completion_client;
mod embedder_factory;
mod local_candle_embedder;
mod mock_embedder;
mod mock_llm_client;
pub(crate) mod model_files;
mod openai_embedder;

pub use chat_completion_client::ChatCompletionClient;
pub use embedder_factory::{EmbedderFactory, EmbedderFactoryError};
pub use local_candle_embedder::LocalCandleEmbedder;
pub use mock_embedder::{MOCK_EMBEDDING_DIMENSION, MockEmbedder};
pub use mock_llm_client::MockLlmClient;
pub use openai_embedder::{OPENAI_BASE_URL, OpenAiEmbedder};
