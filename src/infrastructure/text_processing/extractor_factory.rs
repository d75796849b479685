use std::sync::Arc;

use crate::application::ports::FileLoader;
use crate::presentation::config::PdfBackend;

use super::{PdfAdapter, PdfLayoutAdapter};

pub struct ExtractorFactory;

impl ExtractorFactory {
    pub fn create(backend: PdfBackend) -> Arc<dyn FileLoader> {
        match backend {
            PdfBackend::Layout => {
                tracing::info!("Using pdfium layout-aware PDF extraction");
                Arc::new(PdfLayoutAdapter::new())
            }
            PdfBackend::Plain => {
                tracing::info!("Using plain per-page PDF extraction");
                Arc::new(PdfAdapter::new())
            }
        }
    }
}
