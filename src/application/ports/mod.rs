mod document_fetcher;
mod embedder;
mod file_loader;
mod llm_client;
mod reranker;
mod text_splitter;

pub use document_fetcher::{DocumentFetchError, DocumentFetcher};
pub use embedder::{Embedder, EmbedderError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use reranker::{Reranker, RerankerError};
pub use text_splitter::{TextSplitter, TextSplitterError};
