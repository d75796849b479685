use docqa::application::ports::Reranker;
use docqa::infrastructure::reranking::{
    MockReranker, PassthroughReranker, RerankerFactory, RerankerFactoryError, sigmoid,
};
use docqa::presentation::config::{RerankerProvider, RerankerSettings};

#[test]
fn given_logits_when_applying_sigmoid_then_maps_into_unit_interval() {
    assert!((sigmoid(0.0) - 0.5).abs() < f32::EPSILON);
    assert!(sigmoid(8.0) > 0.99);
    assert!(sigmoid(-8.0) < 0.01);
    assert!(sigmoid(1.0) > sigmoid(0.5));
}

#[tokio::test]
async fn given_passthrough_reranker_when_scoring_then_keeps_input_order() {
    let scores = PassthroughReranker
        .score("anything", &["a", "b", "c"])
        .await
        .unwrap();

    assert_eq!(scores, vec![3.0, 2.0, 1.0]);
}

#[tokio::test]
async fn given_no_passages_when_scoring_then_returns_no_scores() {
    let scores = PassthroughReranker.score("q", &[]).await.unwrap();

    assert!(scores.is_empty());
}

#[tokio::test]
async fn given_mock_reranker_when_scoring_then_counts_shared_query_words() {
    let scores = MockReranker
        .score(
            "grace period premium",
            &["The grace period for premium payment", "Room rent limits"],
        )
        .await
        .unwrap();

    assert_eq!(scores, vec![3.0, 0.0]);
}

#[tokio::test]
async fn given_disabled_provider_when_creating_reranker_then_returns_passthrough() {
    let settings = RerankerSettings {
        provider: RerankerProvider::None,
        ..RerankerSettings::default()
    };

    let reranker = RerankerFactory::create(&settings).unwrap_or_else(|e| panic!("{e}"));
    let scores = reranker.score("q", &["x", "y"]).await.unwrap();

    assert_eq!(scores, vec![2.0, 1.0]);
}

#[test]
fn given_http_provider_without_base_url_when_creating_reranker_then_fails() {
    let settings = RerankerSettings {
        provider: RerankerProvider::Http,
        base_url: None,
        ..RerankerSettings::default()
    };

    let result = RerankerFactory::create(&settings);

    assert!(matches!(result, Err(RerankerFactoryError::MissingBaseUrl)));
}

#[test]
fn given_http_provider_with_base_url_when_creating_reranker_then_succeeds() {
    let settings = RerankerSettings {
        provider: RerankerProvider::Http,
        base_url: Some("http://localhost:8080".to_string()),
        ..RerankerSettings::default()
    };

    assert!(RerankerFactory::create(&settings).is_ok());
}
