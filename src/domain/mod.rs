mod chunk;
mod document;
mod embedding;
mod flat_index;
mod text_block;

pub use chunk::{Chunk, ChunkId, DocumentId};
pub use document::{Document, DocumentSource, DocumentSourceError};
pub use embedding::Embedding;
pub use flat_index::{FlatIndex, IndexError, IndexHit};
pub use text_block::{
    TextBlock, TextRun, group_runs_into_lines, join_blocks, sort_reading_order,
};
