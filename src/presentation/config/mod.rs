mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    AuthSettings, ChunkingSettings, DEFAULT_SYSTEM_PROMPT, DocumentSettings, EmbeddingProvider,
    EmbeddingsSettings, LlmSettings, LoggingSettings, PdfBackend, RerankerProvider,
    RerankerSettings, RetrievalSettings, ServerSettings, Settings, SettingsError,
};
