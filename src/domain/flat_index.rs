use std::cmp::Ordering;

use super::Embedding;

/// Exhaustive nearest-neighbour index over squared L2 distance.
///
/// Rows are numbered in insertion order, so a hit's `position` is the index of
/// the vector in the slice(s) passed to [`FlatIndex::add`].
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Embedding>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexHit {
    pub position: usize,
    pub distance: f32,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("dimension mismatch: index has {expected}, vector has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("index dimension must be greater than zero")]
    ZeroDimension,
}

impl FlatIndex {
    pub fn new(dimension: usize) -> Result<Self, IndexError> {
        if dimension == 0 {
            return Err(IndexError::ZeroDimension);
        }
        Ok(Self {
            dimension,
            vectors: Vec::new(),
        })
    }

    /// Builds an index sized after the first embedding.
    pub fn from_embeddings(embeddings: Vec<Embedding>) -> Result<Self, IndexError> {
        let dimension = embeddings.first().map(Embedding::dimensions).unwrap_or(0);
        let mut index = Self::new(dimension)?;
        index.add(embeddings)?;
        Ok(index)
    }

    pub fn add(&mut self, embeddings: Vec<Embedding>) -> Result<(), IndexError> {
        if let Some(bad) = embeddings.iter().find(|e| e.dimensions() != self.dimension) {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: bad.dimensions(),
            });
        }
        self.vectors.extend(embeddings);
        Ok(())
    }

    pub fn search(&self, query: &Embedding, k: usize) -> Result<Vec<IndexHit>, IndexError> {
        if query.dimensions() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.dimensions(),
            });
        }

        let mut hits: Vec<IndexHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, v)| IndexHit {
                position,
                distance: query.squared_l2_distance(v),
            })
            .collect();

        hits.sort_by(|a, b| match a.distance.total_cmp(&b.distance) {
            Ordering::Equal => a.position.cmp(&b.position),
            other => other,
        });
        hits.truncate(k);

        Ok(hits)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
