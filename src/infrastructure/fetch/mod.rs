mod http_document_fetcher;
mod mock_document_fetcher;

pub use http_document_fetcher::HttpDocumentFetcher;
pub use mock_document_fetcher::MockDocumentFetcher;
