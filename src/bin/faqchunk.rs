use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use faqchunk::corpus::DEFAULT_EXTENSION;
use faqchunk::output::{write_json, write_jsonl};
use faqchunk::{BatchOptions, BatchPolicy, ChunkingConfig, ChunkingStrategy, FaqProcessor};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "faqchunk",
    version,
    about = "Chunk markdown FAQ documents for RAG ingestion"
)]
struct ChunkCli {
    /// Markdown file or directory to process
    #[arg(short, long, env = "FAQCHUNK_INPUT")]
    input: PathBuf,

    /// Output file receiving the chunk records
    #[arg(short, long, env = "FAQCHUNK_OUTPUT")]
    output: PathBuf,

    /// Chunking strategy (qa_pair, paragraph, fixed_length, markdown_header)
    #[arg(short, long, env = "FAQCHUNK_STRATEGY", default_value = "qa_pair")]
    strategy: ChunkingStrategy,

    /// Maximum words per chunk for the fixed_length strategy
    #[arg(short, long, env = "FAQCHUNK_MAX_LENGTH", default_value_t = 500)]
    max_length: usize,

    /// Words shared by consecutive fixed_length chunks
    #[arg(long, env = "FAQCHUNK_OVERLAP", default_value_t = 50)]
    overlap: usize,

    /// Heading levels that start a markdown_header chunk, comma separated
    #[arg(long, env = "FAQCHUNK_HEADER_LEVELS", default_value = "1,2,3,4")]
    header_levels: String,

    /// File extension matched when the input is a directory
    #[arg(long, env = "FAQCHUNK_EXTENSION", default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Output encoding
    #[arg(long, env = "FAQCHUNK_FORMAT", value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Abort on the first unreadable file instead of skipping it
    #[arg(long, default_value_t = false)]
    fail_fast: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON array.
    Json,
    /// One JSON object per line.
    Jsonl,
}

impl ChunkCli {
    fn build_config(&self) -> Result<ChunkingConfig> {
        Ok(ChunkingConfig {
            max_length: self.max_length,
            overlap_tokens: self.overlap,
            header_levels: self.levels_vec()?,
        })
    }

    fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            policy: if self.fail_fast {
                BatchPolicy::FailFast
            } else {
                BatchPolicy::SkipFailures
            },
            extension: self.extension.trim_start_matches('.').to_string(),
        }
    }

    fn levels_vec(&self) -> Result<Vec<u8>> {
        let levels = self
            .header_levels
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u8>()
                    .with_context(|| format!("invalid header level '{s}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        anyhow::ensure!(
            levels.iter().all(|level| (1..=6).contains(level)),
            "header levels must be between 1 and 6"
        );
        Ok(levels)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = ChunkCli::parse();
    init_tracing(cli.verbose);

    let processor = FaqProcessor::new(cli.build_config()?);
    let report = processor
        .process_path(&cli.input, cli.strategy, &cli.batch_options())
        .with_context(|| format!("failed to chunk {:?}", cli.input))?;

    let output =
        File::create(&cli.output).with_context(|| format!("failed to create {:?}", cli.output))?;
    let mut writer = BufWriter::new(output);
    let written = match cli.format {
        OutputFormat::Json => write_json(&mut writer, &report.chunks),
        OutputFormat::Jsonl => write_jsonl(&mut writer, &report.chunks),
    };
    written.with_context(|| format!("failed to write {:?}", cli.output))?;
    writer.flush()?;

    tracing::info!(
        files = report.files,
        skipped = report.failures.len(),
        "processed {} chunks, saved to {}",
        report.chunks.len(),
        cli.output.display()
    );
    Ok(())
}
