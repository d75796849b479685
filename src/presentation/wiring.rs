use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{AnswerService, RetrievalOptions};
use crate::infrastructure::fetch::HttpDocumentFetcher;
use crate::infrastructure::llm::{ChatCompletionClient, EmbedderFactory};
use crate::infrastructure::reranking::RerankerFactory;
use crate::infrastructure::text_processing::{ExtractorFactory, RecursiveCharacterSplitter};
use crate::presentation::config::{RetrievalSettings, Settings};

impl From<&RetrievalSettings> for RetrievalOptions {
    fn from(settings: &RetrievalSettings) -> Self {
        Self {
            k_initial: settings.k_initial,
            top_k_final: settings.top_k_final,
            max_questions: settings.max_questions,
            answered_questions_limit: settings.answered_questions_limit,
        }
    }
}

/// Builds the production pipeline. Models are loaded here, once per process.
pub fn build_answer_service(settings: &Settings) -> anyhow::Result<AnswerService> {
    let fetcher = HttpDocumentFetcher::new(
        Duration::from_secs(settings.document.download_timeout_secs),
        settings.document.max_document_bytes,
    )?;
    let file_loader = ExtractorFactory::create(settings.document.pdf_backend);
    let text_splitter = RecursiveCharacterSplitter::new(
        settings.chunking.chunk_size,
        settings.chunking.chunk_overlap,
    );
    let embedder = EmbedderFactory::create(&settings.embeddings)?;
    let reranker = RerankerFactory::create(&settings.reranker)?;

    if settings.llm.api_key.is_empty() {
        tracing::warn!("llm.api_key is empty; chat completion requests will be rejected");
    }
    let llm_client = ChatCompletionClient::new(&settings.llm)?;

    Ok(AnswerService::new(
        Arc::new(fetcher),
        file_loader,
        Arc::new(text_splitter),
        embedder,
        reranker,
        Arc::new(llm_client),
        RetrievalOptions::from(&settings.retrieval),
    ))
}
