use docqa::application::ports::{Embedder, LlmClient};
use docqa::infrastructure::llm::{
    ChatCompletionClient, EmbedderFactory, EmbedderFactoryError, MOCK_EMBEDDING_DIMENSION,
    MockEmbedder, MockLlmClient,
};
use docqa::presentation::config::{EmbeddingProvider, EmbeddingsSettings, LlmSettings};

#[tokio::test]
async fn given_texts_when_embedding_with_mock_then_vectors_are_normalized() {
    let embeddings = MockEmbedder
        .embed_batch(&["grace period", "room rent"])
        .await
        .unwrap();

    assert_eq!(embeddings.len(), 2);
    for embedding in &embeddings {
        assert_eq!(embedding.dimensions(), MOCK_EMBEDDING_DIMENSION);
        let norm: f32 = embedding.values.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}

#[tokio::test]
async fn given_same_words_when_embedding_with_mock_then_vectors_match() {
    let a = MockEmbedder.embed("Grace Period").await.unwrap();
    let b = MockEmbedder.embed("period grace").await.unwrap();

    assert!((a.cosine_similarity(&b) - 1.0).abs() < 1e-5);
}

#[test]
fn given_openai_provider_without_key_when_creating_embedder_then_fails() {
    let settings = EmbeddingsSettings {
        provider: EmbeddingProvider::OpenAi,
        api_key: None,
        ..EmbeddingsSettings::default()
    };

    let result = EmbedderFactory::create(&settings);

    assert!(matches!(result, Err(EmbedderFactoryError::MissingApiKey)));
}

#[test]
fn given_openai_provider_with_key_when_creating_embedder_then_succeeds() {
    let settings = EmbeddingsSettings {
        provider: EmbeddingProvider::OpenAi,
        api_key: Some("sk-test".to_string()),
        model: "text-embedding-3-small".to_string(),
        ..EmbeddingsSettings::default()
    };

    assert!(EmbedderFactory::create(&settings).is_ok());
}

#[test]
fn given_default_llm_settings_when_creating_chat_client_then_succeeds() {
    assert!(ChatCompletionClient::new(&LlmSettings::default()).is_ok());
}

#[tokio::test]
async fn given_mock_llm_when_completing_then_mentions_question() {
    let answer = MockLlmClient
        .complete("Is cataract covered?", "context")
        .await
        .unwrap();

    assert!(answer.contains("Is cataract covered?"));
}
