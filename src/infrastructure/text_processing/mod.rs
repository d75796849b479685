use std::time::Duration;

use crate::application::ports::FileLoaderError;

mod extractor_factory;
mod mock_file_loader;
mod pdf_adapter;
mod pdf_layout_adapter;
mod recursive_character_splitter;

pub use extractor_factory::ExtractorFactory;
pub use mock_file_loader::MockFileLoader;
pub use pdf_adapter::PdfAdapter;
pub use pdf_layout_adapter::PdfLayoutAdapter;
pub use recursive_character_splitter::RecursiveCharacterSplitter;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);
const PDF_SIGNATURE: &[u8] = b"%PDF";

fn ensure_pdf_signature(data: &[u8]) -> Result<(), FileLoaderError> {
    if data.starts_with(PDF_SIGNATURE) {
        Ok(())
    } else {
        Err(FileLoaderError::ExtractionFailed(
            "content is not a PDF document".to_string(),
        ))
    }
}
