use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{DocumentFetchError, DocumentFetcher};
use crate::domain::DocumentSource;

/// Fetches documents over HTTP(S) or from the local filesystem.
pub struct HttpDocumentFetcher {
    client: Client,
    max_bytes: u64,
}

impl HttpDocumentFetcher {
    pub fn new(timeout: Duration, max_bytes: u64) -> Result<Self, DocumentFetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DocumentFetchError::RequestFailed(e.to_string()))?;

        Ok(Self { client, max_bytes })
    }

    fn check_size(&self, size: u64) -> Result<(), DocumentFetchError> {
        if size > self.max_bytes {
            return Err(DocumentFetchError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }
        Ok(())
    }

    async fn fetch_url(&self, url: &reqwest::Url) -> Result<Vec<u8>, DocumentFetchError> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DocumentFetchError::RequestFailed(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(DocumentFetchError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        if let Some(length) = response.content_length() {
            self.check_size(length)?;
        }

        // Content-Length is optional, so the cap is enforced while streaming.
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| DocumentFetchError::RequestFailed(e.without_url().to_string()))?
        {
            self.check_size((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    #[tracing::instrument(skip_all, fields(source = %source))]
    async fn fetch(&self, source: &DocumentSource) -> Result<Vec<u8>, DocumentFetchError> {
        match source {
            DocumentSource::Url(url) => self.fetch_url(url).await,
            DocumentSource::Path(path) => {
                let metadata = tokio::fs::metadata(path)
                    .await
                    .map_err(|e| DocumentFetchError::Io(format!("{}: {e}", path.display())))?;
                self.check_size(metadata.len())?;

                tokio::fs::read(path)
                    .await
                    .map_err(|e| DocumentFetchError::Io(format!("{}: {e}", path.display())))
            }
        }
    }
}
