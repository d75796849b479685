pub mod fetch;
pub mod llm;
pub mod observability;
pub mod reranking;
pub mod text_processing;
