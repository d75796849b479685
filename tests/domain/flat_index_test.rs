use docqa::domain::{Embedding, FlatIndex, IndexError};

fn vector(values: &[f32]) -> Embedding {
    Embedding::new(values.to_vec())
}

fn sample_index() -> FlatIndex {
    FlatIndex::from_embeddings(vec![
        vector(&[0.0, 0.0]),
        vector(&[1.0, 0.0]),
        vector(&[0.0, 3.0]),
        vector(&[5.0, 5.0]),
    ])
    .unwrap()
}

#[test]
fn given_zero_dimension_when_creating_index_then_fails() {
    assert_eq!(FlatIndex::new(0).unwrap_err(), IndexError::ZeroDimension);
}

#[test]
fn given_no_embeddings_when_building_index_then_fails() {
    assert!(FlatIndex::from_embeddings(Vec::new()).is_err());
}

#[test]
fn given_vectors_when_searching_then_hits_ascend_by_squared_distance() {
    let index = sample_index();

    let hits = index.search(&vector(&[0.9, 0.0]), 3).unwrap();

    let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
    assert_eq!(positions, vec![1, 0, 2]);
    assert!((hits[0].distance - 0.01).abs() < 1e-5);
    assert!((hits[1].distance - 0.81).abs() < 1e-5);
}

#[test]
fn given_k_larger_than_index_when_searching_then_returns_every_vector() {
    let index = sample_index();

    let hits = index.search(&vector(&[0.0, 0.0]), 100).unwrap();

    assert_eq!(hits.len(), index.len());
}

#[test]
fn given_k_zero_when_searching_then_returns_nothing() {
    let hits = sample_index().search(&vector(&[0.0, 0.0]), 0).unwrap();

    assert!(hits.is_empty());
}

#[test]
fn given_equidistant_vectors_when_searching_then_lower_position_wins() {
    let index = FlatIndex::from_embeddings(vec![
        vector(&[1.0, 0.0]),
        vector(&[-1.0, 0.0]),
        vector(&[0.0, 1.0]),
    ])
    .unwrap();

    let hits = index.search(&vector(&[0.0, 0.0]), 3).unwrap();

    let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[test]
fn given_wrong_dimension_query_when_searching_then_fails() {
    let result = sample_index().search(&vector(&[1.0, 2.0, 3.0]), 2);

    assert_eq!(
        result.unwrap_err(),
        IndexError::DimensionMismatch {
            expected: 2,
            actual: 3
        }
    );
}

#[test]
fn given_wrong_dimension_vector_when_adding_then_index_is_unchanged() {
    let mut index = FlatIndex::new(2).unwrap();
    index.add(vec![vector(&[1.0, 1.0])]).unwrap();

    let result = index.add(vec![vector(&[1.0, 1.0]), vector(&[1.0])]);

    assert!(result.is_err());
    assert_eq!(index.len(), 1);
}

#[test]
fn given_incremental_adds_when_searching_then_positions_follow_insertion_order() {
    let mut index = FlatIndex::new(1).unwrap();
    assert!(index.is_empty());
    index.add(vec![vector(&[10.0])]).unwrap();
    index.add(vec![vector(&[20.0]), vector(&[30.0])]).unwrap();

    let hits = index.search(&vector(&[29.0]), 1).unwrap();

    assert_eq!(hits[0].position, 2);
    assert_eq!(index.dimension(), 1);
}
