use crate::application::ports::{DocumentFetchError, DocumentFetcher};
use crate::domain::DocumentSource;

/// Returns the same bytes for every source.
pub struct MockDocumentFetcher {
    data: Vec<u8>,
}

impl MockDocumentFetcher {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for MockDocumentFetcher {
    async fn fetch(&self, _source: &DocumentSource) -> Result<Vec<u8>, DocumentFetchError> {
        Ok(self.data.clone())
    }
}
