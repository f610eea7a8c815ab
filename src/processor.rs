//! Strategy dispatch over a single markdown document.

use crate::chunk::{section_metadata, source_metadata, Chunk};
use crate::cleaner::clean_markdown;
use crate::config::{ChunkingConfig, ChunkingStrategy};
use crate::error::ChunkError;
use crate::fixed_length::chunk_by_fixed_length;
use crate::headers::chunk_by_headers;
use crate::paragraph::chunk_by_paragraph;
use crate::qa::{extract_qa_pairs, section_intro, QaExtraction};
use crate::sections::split_document;
use tracing::debug;

/// Markdown text plus the identifier recorded as `source` metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Originating identifier, usually a file name or relative path.
    pub source: String,
    /// Raw markdown.
    pub text: String,
}

impl Document {
    /// Builds a document from its identifier and raw text.
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}

/// Stateless markdown chunking service.
#[derive(Debug, Clone, Default)]
pub struct FaqProcessor {
    config: ChunkingConfig,
}

impl FaqProcessor {
    /// Builds a processor with the given parameters.
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Returns the underlying config reference.
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Cleans and chunks a document with the chosen strategy.
    pub fn process(
        &self,
        document: &Document,
        strategy: ChunkingStrategy,
    ) -> Result<Vec<Chunk>, ChunkError> {
        self.process_text(&document.text, &document.source, strategy)
    }

    /// Like [`FaqProcessor::process`], resolving the strategy by name first.
    pub fn process_named(
        &self,
        document: &Document,
        strategy: &str,
    ) -> Result<Vec<Chunk>, ChunkError> {
        self.process(document, strategy.parse()?)
    }

    /// Cleans and chunks raw markdown attributed to `source`.
    pub fn process_text(
        &self,
        raw: &str,
        source: &str,
        strategy: ChunkingStrategy,
    ) -> Result<Vec<Chunk>, ChunkError> {
        let cleaned = clean_markdown(raw);
        let chunks = match strategy {
            ChunkingStrategy::QaPair => self.chunk_by_qa_pair(&cleaned, source),
            ChunkingStrategy::Paragraph => {
                chunk_by_paragraph(&cleaned, &source_metadata(source))
            }
            ChunkingStrategy::FixedLength => chunk_by_fixed_length(
                &cleaned,
                self.config.max_length,
                self.config.overlap_tokens,
                &source_metadata(source),
            )?,
            ChunkingStrategy::MarkdownHeader => chunk_by_headers(
                &cleaned,
                &self.config.header_levels,
                &source_metadata(source),
            ),
        };
        debug!(source, %strategy, chunks = chunks.len(), "chunked document");
        Ok(chunks)
    }

    /// Runs Q&A extraction over every `##` section of already cleaned text.
    ///
    /// Text ahead of the first section, text ahead of a section's first Q&A
    /// heading and sections without Q&A headings are paragraph-chunked so that
    /// no content is dropped.
    pub fn chunk_by_qa_pair(&self, cleaned: &str, source: &str) -> Vec<Chunk> {
        let split = split_document(cleaned);
        let mut chunks = chunk_by_paragraph(split.preamble, &source_metadata(source));

        for section in &split.sections {
            match extract_qa_pairs(section, source) {
                QaExtraction::Extracted(pairs) => {
                    chunks.extend(chunk_by_paragraph(
                        section_intro(section),
                        &section_metadata(source, section.title),
                    ));
                    chunks.extend(pairs);
                }
                QaExtraction::Empty => {
                    debug!(
                        source,
                        section = section.title,
                        "no Q&A pairs found, using paragraph chunking"
                    );
                    chunks.extend(chunk_by_paragraph(
                        section.content,
                        &section_metadata(source, section.title),
                    ));
                }
            }
        }

        chunks
    }
}
