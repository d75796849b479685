use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert insurance policy analyst. Answer questions based ONLY on the provided context. Be precise, accurate, and provide specific details from the document. If the information is not clearly stated in the context, say 'Information not found in the document.' Focus on accuracy over completeness.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub document: DocumentSettings,
    pub chunking: ChunkingSettings,
    pub embeddings: EmbeddingsSettings,
    pub reranker: RerankerSettings,
    pub retrieval: RetrievalSettings,
    pub llm: LlmSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub bearer_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfBackend {
    /// pdfium text segments sorted into reading order
    Layout,
    /// pdf_oxide per-page text
    Plain,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    pub download_timeout_secs: u64,
    pub max_document_bytes: u64,
    pub pdf_backend: PdfBackend,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            download_timeout_secs: 30,
            max_document_bytes: 100 * 1024 * 1024,
            pdf_backend: PdfBackend::Layout,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 300,
            chunk_overlap: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingsSettings {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl Default for EmbeddingsSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::Local,
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            base_url: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RerankerProvider {
    Local,
    Http,
    None,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RerankerSettings {
    pub provider: RerankerProvider,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RerankerSettings {
    fn default() -> Self {
        Self {
            provider: RerankerProvider::Local,
            model: "cross-encoder/ms-marco-TinyBERT-L-2-v2".to_string(),
            base_url: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub k_initial: usize,
    pub top_k_final: usize,
    pub max_questions: usize,
    pub answered_questions_limit: Option<usize>,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            k_initial: 8,
            top_k_final: 3,
            max_questions: 10,
            answered_questions_limit: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub timeout_secs: u64,
    pub max_tokens: Option<usize>,
    pub temperature: Option<f32>,
    pub system_prompt: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            chat_model: "llama3-8b-8192".to_string(),
            timeout_secs: 90,
            max_tokens: None,
            temperature: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,docqa=debug,tower_http=debug".to_string(),
            enable_json: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Load(#[from] ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Settings {
    /// Layers `appsettings.{environment}` (optional) under `APP_*` environment
    /// variables, using `__` between nested keys (`APP_LLM__API_KEY`).
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str().to_lowercase()))
                    .required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Honors the deployment conventions `GROQ_API_KEY` and `PORT`.
    ///
    /// Returns the raw `PORT` value when it was not a valid port, so the caller
    /// can report it once logging is up.
    pub fn apply_conventional_env<F>(&mut self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.llm.api_key.is_empty() {
            if let Some(key) = lookup("GROQ_API_KEY") {
                self.llm.api_key = key;
            }
        }

        let raw_port = lookup("PORT")?;
        match raw_port.trim().parse::<u16>() {
            Ok(port) => {
                self.server.port = port;
                None
            }
            Err(_) => Some(raw_port),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        if self.chunking.chunk_size == 0 {
            return invalid("chunking.chunk_size must be greater than zero".to_string());
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return invalid(format!(
                "chunking.chunk_overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            ));
        }
        if self.retrieval.top_k_final == 0 {
            return invalid("retrieval.top_k_final must be greater than zero".to_string());
        }
        if self.retrieval.k_initial < self.retrieval.top_k_final {
            return invalid(format!(
                "retrieval.k_initial ({}) must be at least retrieval.top_k_final ({})",
                self.retrieval.k_initial, self.retrieval.top_k_final
            ));
        }
        if self.retrieval.max_questions == 0 {
            return invalid("retrieval.max_questions must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Extra checks for serving over HTTP.
    pub fn validate_for_server(&self) -> Result<(), SettingsError> {
        self.validate()?;
        if self.auth.bearer_token.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "auth.bearer_token must be set (APP_AUTH__BEARER_TOKEN)".to_string(),
            ));
        }
        Ok(())
    }
}
