use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{
    DocumentFetchError, DocumentFetcher, Embedder, EmbedderError, FileLoader, FileLoaderError,
    LlmClient, LlmClientError, Reranker, RerankerError, TextSplitter, TextSplitterError,
};
use crate::domain::{Chunk, Document, DocumentSource, FlatIndex, IndexError};

pub const NOT_PROCESSED_ANSWER: &str = "Not processed - focusing on accuracy for first questions";
pub const GENERATION_FAILED_ANSWER: &str = "Error generating the final answer.";

const CONTEXT_SEPARATOR: &str = "\n\n";

/// Retrieval depths and request limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalOptions {
    /// Passages pulled from the vector index per question.
    pub k_initial: usize,
    /// Passages kept after reranking and sent to the LLM.
    pub top_k_final: usize,
    pub max_questions: usize,
    /// Answer only the first `n` questions, the rest get a placeholder.
    pub answered_questions_limit: Option<usize>,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            k_initial: 8,
            top_k_final: 3,
            max_questions: 10,
            answered_questions_limit: None,
        }
    }
}

/// A parsed, split and embedded document ready to be queried.
pub struct IndexedDocument {
    pub document: Document,
    pub chunks: Vec<Chunk>,
    pub index: FlatIndex,
}

pub struct AnswerService {
    fetcher: Arc<dyn DocumentFetcher>,
    file_loader: Arc<dyn FileLoader>,
    text_splitter: Arc<dyn TextSplitter>,
    embedder: Arc<dyn Embedder>,
    reranker: Arc<dyn Reranker>,
    llm_client: Arc<dyn LlmClient>,
    options: RetrievalOptions,
}

impl AnswerService {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        file_loader: Arc<dyn FileLoader>,
        text_splitter: Arc<dyn TextSplitter>,
        embedder: Arc<dyn Embedder>,
        reranker: Arc<dyn Reranker>,
        llm_client: Arc<dyn LlmClient>,
        options: RetrievalOptions,
    ) -> Self {
        Self {
            fetcher,
            file_loader,
            text_splitter,
            embedder,
            reranker,
            llm_client,
            options,
        }
    }

    pub fn options(&self) -> RetrievalOptions {
        self.options
    }

    /// Downloads, parses, splits and indexes a document.
    #[tracing::instrument(skip_all, fields(source = %source))]
    pub async fn prepare(&self, source: &DocumentSource) -> Result<IndexedDocument, AnswerError> {
        let data = self
            .fetcher
            .fetch(source)
            .await
            .map_err(AnswerError::Download)?;

        let document = Document::new(source.clone(), data.len() as u64);
        tracing::info!(size_bytes = document.size_bytes, "Document downloaded");

        let text = self
            .file_loader
            .extract_text(&data, &document)
            .await
            .map_err(AnswerError::Extraction)?;

        let chunks = self
            .text_splitter
            .split(&text, document.id)
            .await
            .map_err(AnswerError::Splitting)?;

        if chunks.is_empty() {
            return Err(AnswerError::NoChunks);
        }
        tracing::info!(chunk_count = chunks.len(), "Document split into chunks");

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self
            .embedder
            .embed_batch(&texts)
            .await
            .map_err(AnswerError::Embedding)?;

        if embeddings.len() != chunks.len() {
            return Err(AnswerError::Embedding(EmbedderError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            ))));
        }

        let index = FlatIndex::from_embeddings(embeddings).map_err(AnswerError::Index)?;
        tracing::info!(
            vectors = index.len(),
            dimension = index.dimension(),
            "Flat index built"
        );

        Ok(IndexedDocument {
            document,
            chunks,
            index,
        })
    }

    /// Retrieves, reranks and answers a single question against a prepared document.
    pub async fn answer_question(
        &self,
        document: &IndexedDocument,
        question: &str,
    ) -> Result<String, AnswerError> {
        let context = self.build_context(document, question).await?;

        self.llm_client
            .complete(question, &context)
            .await
            .map_err(AnswerError::Completion)
    }

    async fn build_context(
        &self,
        document: &IndexedDocument,
        question: &str,
    ) -> Result<String, AnswerError> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(AnswerError::Embedding)?;

        let hits = document
            .index
            .search(&query_embedding, self.options.k_initial)
            .map_err(AnswerError::Index)?;

        let candidates: Vec<&str> = hits
            .iter()
            .filter_map(|hit| document.chunks.get(hit.position))
            .map(|chunk| chunk.text.as_str())
            .collect();

        let scores = self
            .reranker
            .score(question, &candidates)
            .await
            .map_err(AnswerError::Reranking)?;

        if scores.len() != candidates.len() {
            return Err(AnswerError::Reranking(RerankerError::ScoreCountMismatch {
                expected: candidates.len(),
                actual: scores.len(),
            }));
        }

        let mut ranked: Vec<(&str, f32)> = candidates.into_iter().zip(scores).collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        tracing::debug!(
            retrieved = ranked.len(),
            kept = ranked.len().min(self.options.top_k_final),
            best_score = ranked.first().map(|(_, s)| *s),
            "Candidates reranked"
        );

        Ok(ranked
            .into_iter()
            .take(self.options.top_k_final)
            .map(|(text, _)| text)
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR))
    }

    /// Answers every question against one document, one answer per question.
    ///
    /// Document-level failures fail the whole call. Per-question failures are
    /// written into that question's answer slot.
    #[tracing::instrument(skip_all, fields(source = %source, question_count = questions.len()))]
    pub async fn answer_all(
        &self,
        source: &DocumentSource,
        questions: &[String],
    ) -> Result<Vec<String>, AnswerError> {
        if questions.len() > self.options.max_questions {
            return Err(AnswerError::TooManyQuestions {
                count: questions.len(),
                max: self.options.max_questions,
            });
        }

        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let document = self.prepare(source).await?;

        let limit = self
            .options
            .answered_questions_limit
            .unwrap_or(questions.len());

        let mut answers = Vec::with_capacity(questions.len());
        for (i, question) in questions.iter().enumerate() {
            if i >= limit {
                answers.push(NOT_PROCESSED_ANSWER.to_string());
                continue;
            }

            tracing::info!(question_number = i + 1, "Processing question");

            let answer = match self.answer_question(&document, question).await {
                Ok(answer) => answer,
                Err(AnswerError::Completion(e)) => {
                    tracing::error!(question_number = i + 1, error = %e, "LLM call failed");
                    GENERATION_FAILED_ANSWER.to_string()
                }
                Err(e) => {
                    tracing::error!(question_number = i + 1, error = %e, "Question failed");
                    format!("Error processing question: {e}")
                }
            };
            answers.push(answer);

            tracing::info!(
                question_number = i + 1,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Question completed"
            );
        }

        tracing::info!(
            answered = limit.min(questions.len()),
            total_ms = started.elapsed().as_millis() as u64,
            "All questions processed"
        );

        Ok(answers)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("too many questions: {count} (max {max})")]
    TooManyQuestions { count: usize, max: usize },
    #[error("download: {0}")]
    Download(DocumentFetchError),
    #[error("extraction: {0}")]
    Extraction(FileLoaderError),
    #[error("text splitting: {0}")]
    Splitting(TextSplitterError),
    #[error("no text chunks to process")]
    NoChunks,
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("index: {0}")]
    Index(IndexError),
    #[error("reranking: {0}")]
    Reranking(RerankerError),
    #[error("completion: {0}")]
    Completion(LlmClientError),
}
