use async_trait::async_trait;

use crate::domain::DocumentSource;

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, source: &DocumentSource) -> Result<Vec<u8>, DocumentFetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentFetchError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP {status}")]
    HttpStatus { status: u16 },
    #[error("document is {size} bytes, limit is {max}")]
    TooLarge { size: u64, max: u64 },
    #[error("read failed: {0}")]
    Io(String),
}
