//! Document chunking, embeddings, and in-memory vector retrieval.
//!
//! This crate owns the retrieval side of the pipeline:
//! - Split a source document into overlapping chunks ([`ChunkSplitter`])
//! - Embed chunks through a pluggable provider ([`EmbeddingProvider`])
//! - Hold (chunk, vector) pairs in an in-memory cosine index ([`VectorIndex`])
//! - Build the index at startup ([`build_index`]) and answer top-k queries
//!   ([`retrieve`])
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules. The index is rebuilt deterministically from the same
//! document and chunking configuration; there is no on-disk format.

pub mod chunker;
pub mod embed;
pub mod error;
pub mod index;
pub mod ingest;
pub mod record;
pub mod retrieve;
pub mod testing;

pub use chunker::ChunkSplitter;
pub use embed::EmbeddingProvider;
pub use embed::service::ServiceEmbedder;
pub use error::IndexError;
pub use index::VectorIndex;
pub use ingest::{build_index, load_document};
pub use record::{Chunk, Document, ScoredChunk};
pub use retrieve::retrieve;
