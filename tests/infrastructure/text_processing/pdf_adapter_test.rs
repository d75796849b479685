use docqa::application::ports::{FileLoader, FileLoaderError};
use docqa::domain::{Document, DocumentSource};
use docqa::infrastructure::text_processing::{
    ExtractorFactory, MockFileLoader, PdfAdapter, PdfLayoutAdapter,
};
use docqa::presentation::config::PdfBackend;

fn document() -> Document {
    Document::new(DocumentSource::from_cli_arg("policy.pdf"), 0)
}

#[tokio::test]
async fn given_html_bytes_when_extracting_with_plain_adapter_then_rejects_before_parsing() {
    let result = PdfAdapter::new()
        .extract_text(b"<html>not found</html>", &document())
        .await;

    match result {
        Err(FileLoaderError::ExtractionFailed(message)) => {
            assert!(message.contains("not a PDF"));
        }
        other => panic!("expected ExtractionFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_empty_bytes_when_extracting_with_layout_adapter_then_rejects_before_parsing() {
    let result = PdfLayoutAdapter::new().extract_text(b"", &document()).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_each_backend_when_creating_extractor_then_rejects_non_pdf_bytes() {
    for backend in [PdfBackend::Layout, PdfBackend::Plain] {
        let loader = ExtractorFactory::create(backend);

        let result = loader.extract_text(b"PK\x03\x04zip", &document()).await;

        assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
    }
}

#[tokio::test]
async fn given_utf8_bytes_when_using_mock_loader_then_returns_text() {
    let text = MockFileLoader
        .extract_text("plain text".as_bytes(), &document())
        .await
        .unwrap();

    assert_eq!(text, "plain text");
}

const SAMPLE_PDF: &[u8] = include_bytes!("../fixtures/sample.pdf");
const EMPTY_PDF: &[u8] = include_bytes!("../fixtures/empty.pdf");
const LAYOUT_PDF: &[u8] = include_bytes!("../fixtures/layout.pdf");

fn pdfium_available() -> bool {
    pdfium_render::prelude::Pdfium::bind_to_system_library().is_ok()
}

#[tokio::test]
async fn given_two_page_pdf_when_extracting_with_plain_adapter_then_joins_pages_with_blank_line() {
    let text = PdfAdapter::new()
        .extract_text(SAMPLE_PDF, &document())
        .await
        .unwrap();

    let pages: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(pages.len(), 2, "unexpected page split: {text:?}");
    assert!(pages[0].contains("Grace"));
    assert!(pages[1].contains("Room"));
}

#[tokio::test]
async fn given_pdf_without_text_when_extracting_with_plain_adapter_then_returns_no_text_found() {
    let result = PdfAdapter::new().extract_text(EMPTY_PDF, &document()).await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(_))));
}

#[tokio::test]
async fn given_heading_drawn_after_body_when_extracting_with_layout_adapter_then_heading_comes_first()
{
    if !pdfium_available() {
        eprintln!("pdfium library not found, skipping");
        return;
    }

    let text = PdfLayoutAdapter::new()
        .extract_text(LAYOUT_PDF, &document())
        .await
        .unwrap();

    let title = text.find("Title").unwrap();
    let body = text.find("Body").unwrap();
    assert!(title < body, "heading should precede body: {text:?}");
}

#[tokio::test]
async fn given_pdf_without_text_when_extracting_with_layout_adapter_then_returns_no_text_found() {
    if !pdfium_available() {
        eprintln!("pdfium library not found, skipping");
        return;
    }

    let result = PdfLayoutAdapter::new()
        .extract_text(EMPTY_PDF, &document())
        .await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(_))));
}
