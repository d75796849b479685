mod reranking;
mod text_processing;
