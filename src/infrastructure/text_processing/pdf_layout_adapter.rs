use async_trait::async_trait;
use pdfium_render::prelude::*;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{
    Document, TextBlock, TextRun, group_runs_into_lines, join_blocks, sort_reading_order,
};

use super::{EXTRACTION_TIMEOUT, ensure_pdf_signature};

/// Extracts pdfium text segments, regroups them into lines and emits them in
/// reading order: top-to-bottom, then left-to-right, page by page.
#[derive(Default)]
pub struct PdfLayoutAdapter;

impl PdfLayoutAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(data: &[u8]) -> Result<Vec<Vec<TextBlock>>, FileLoaderError> {
        let bindings = Pdfium::bind_to_system_library()
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("pdfium bind failed: {e}")))?;
        let pdfium = Pdfium::new(bindings);

        let document = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let mut pages = Vec::new();
        for (page_index, page) in document.pages().iter().enumerate() {
            // pdfium measures from the bottom edge
            let page_height = page.height().value;
            let text = page.text().map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("page {page_index} text failed: {e}"))
            })?;

            // segments are style runs; rebuild lines before ordering
            let runs: Vec<TextRun> = text
                .segments()
                .iter()
                .map(|segment| {
                    let bounds = segment.bounds();
                    TextRun::new(
                        bounds.left().value,
                        page_height - bounds.top().value,
                        page_height - bounds.bottom().value,
                        segment.text(),
                    )
                })
                .filter(|run| !run.text.trim().is_empty())
                .collect();

            let mut blocks = group_runs_into_lines(runs);
            sort_reading_order(&mut blocks);
            pages.push(blocks);
        }

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfLayoutAdapter {
    #[tracing::instrument(skip_all, fields(document_id = %document.id.as_uuid()))]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        ensure_pdf_signature(data)?;

        let owned = data.to_vec();
        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&owned)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        let block_count: usize = pages.iter().map(Vec::len).sum();
        tracing::info!(
            page_count = pages.len(),
            block_count,
            "PDF layout extraction complete"
        );

        let full_text: String = pages.iter().map(|blocks| join_blocks(blocks)).collect();

        if full_text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.source.to_string()));
        }

        Ok(full_text)
    }
}
