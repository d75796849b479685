use docqa::application::ports::{TextSplitter, TextSplitterError};
use docqa::domain::DocumentId;
use docqa::infrastructure::text_processing::RecursiveCharacterSplitter;

#[test]
fn given_short_text_when_splitting_then_returns_single_trimmed_chunk() {
    let splitter = RecursiveCharacterSplitter::new(100, 10);

    let chunks = splitter.split_text("  hello world  ").unwrap();

    assert_eq!(chunks, vec!["hello world"]);
}

#[test]
fn given_empty_text_when_splitting_then_returns_no_chunks() {
    let splitter = RecursiveCharacterSplitter::new(100, 10);

    assert!(splitter.split_text("").unwrap().is_empty());
    assert!(splitter.split_text(" \n\n \n").unwrap().is_empty());
}

#[test]
fn given_paragraphs_when_splitting_then_prefers_paragraph_boundaries() {
    let splitter = RecursiveCharacterSplitter::new(20, 0);

    let chunks = splitter
        .split_text("first paragraph\n\nsecond paragraph\n\nthird one")
        .unwrap();

    assert_eq!(chunks, vec!["first paragraph", "second paragraph", "third one"]);
}

#[test]
fn given_long_text_when_splitting_then_no_chunk_exceeds_size() {
    let splitter = RecursiveCharacterSplitter::new(50, 10);
    let text = "The insured person must notify the insurer within thirty days. ".repeat(20);

    let chunks = splitter.split_text(&text).unwrap();

    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.chars().count() <= 50));
}

#[test]
fn given_overlap_when_splitting_words_then_neighbours_share_trailing_words() {
    let splitter = RecursiveCharacterSplitter::new(10, 4);

    let chunks = splitter.split_text("aa bb cc dd ee ff").unwrap();

    assert_eq!(chunks, vec!["aa bb cc", "cc dd ee", "ee ff"]);
}

#[test]
fn given_unbroken_word_when_splitting_then_falls_back_to_characters() {
    let splitter = RecursiveCharacterSplitter::new(4, 0);

    let chunks = splitter.split_text("abcdefghij").unwrap();

    assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
}

#[test]
fn given_multibyte_text_when_splitting_then_counts_characters() {
    let splitter = RecursiveCharacterSplitter::new(3, 0);

    let chunks = splitter.split_text("ééééé").unwrap();

    assert_eq!(chunks, vec!["ééé", "éé"]);
}

#[test]
fn given_overlap_not_below_size_when_splitting_then_returns_configuration_error() {
    let splitter = RecursiveCharacterSplitter::new(10, 10);

    let result = splitter.split_text("anything");

    assert!(matches!(
        result,
        Err(TextSplitterError::InvalidConfiguration(_))
    ));
}

#[test]
fn given_zero_size_when_splitting_then_returns_configuration_error() {
    let result = RecursiveCharacterSplitter::new(0, 0).split_text("anything");

    assert!(matches!(
        result,
        Err(TextSplitterError::InvalidConfiguration(_))
    ));
}

#[test]
fn given_custom_separators_when_splitting_then_uses_them() {
    let splitter = RecursiveCharacterSplitter::new(6, 0)
        .with_separators(vec!["|".to_string(), String::new()]);

    let chunks = splitter.split_text("abc|def|ghi").unwrap();

    assert_eq!(chunks, vec!["abc", "|def", "|ghi"]);
}

#[tokio::test]
async fn given_document_when_splitting_through_port_then_chunks_are_numbered() {
    let splitter = RecursiveCharacterSplitter::new(20, 0);
    let document_id = DocumentId::new();

    let chunks = splitter
        .split("first paragraph\n\nsecond paragraph", document_id)
        .await
        .unwrap();

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].index, 0);
    assert_eq!(chunks[1].index, 1);
    assert!(chunks.iter().all(|c| c.document_id == document_id));
}
