#![warn(missing_docs)]
//! Markdown FAQ chunking for retrieval-augmented generation pipelines.
//!
//! Raw markdown is cleaned, split into `##` sections and turned into Q&A,
//! paragraph, fixed-length or header-delimited chunks ready for embedding.

pub mod chunk;
pub mod cleaner;
pub mod config;
pub mod corpus;
pub mod error;
pub mod fixed_length;
pub mod headers;
pub mod output;
pub mod paragraph;
pub mod processor;
pub mod qa;
pub mod sections;

pub use chunk::{Chunk, ChunkBody, ChunkKind, Metadata};
pub use cleaner::clean_markdown;
pub use config::{ChunkingConfig, ChunkingStrategy};
pub use corpus::{
    collect_files, read_document, BatchOptions, BatchPolicy, BatchReport, FileFailure,
};
pub use error::ChunkError;
pub use fixed_length::chunk_by_fixed_length;
pub use headers::chunk_by_headers;
pub use paragraph::chunk_by_paragraph;
pub use processor::{Document, FaqProcessor};
pub use qa::{
    extract_qa_pairs, section_intro, QaExtraction, QA_FALLBACK_PATTERN, QA_PRIMARY_PATTERN,
};
pub use sections::{split_document, split_sections, Section, SectionSplit, SECTION_PATTERN};
