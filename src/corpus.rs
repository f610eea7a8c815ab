//! File and directory inputs: enumeration, reading and batch processing.

use crate::chunk::Chunk;
use crate::config::ChunkingStrategy;
use crate::error::ChunkError;
use crate::fixed_length::validate_window;
use crate::processor::{Document, FaqProcessor};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Extension matched when walking a directory.
pub const DEFAULT_EXTENSION: &str = "md";

/// What a batch does when one file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Log the failure, record it in the report and keep going.
    #[default]
    SkipFailures,
    /// Abort the batch on a failure. Files not yet started are never read;
    /// files already running in parallel finish but their chunks are discarded.
    FailFast,
}

/// Directory walk settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Failure handling.
    pub policy: BatchPolicy,
    /// File extension to match, without the leading dot.
    pub extension: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            policy: BatchPolicy::default(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// A file skipped under [`BatchPolicy::SkipFailures`].
#[derive(Debug)]
pub struct FileFailure {
    /// File that failed.
    pub path: PathBuf,
    /// Why it failed.
    pub error: ChunkError,
}

/// Result of chunking a file or directory.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files matched by the walk.
    pub files: usize,
    /// Chunks of every successful file, file by file in path order.
    pub chunks: Vec<Chunk>,
    /// Files that could not be processed.
    pub failures: Vec<FileFailure>,
}

/// Lists files under `root` whose extension matches, sorted by path.
///
/// A file `root` is returned as is. Unreadable directory entries are logged and skipped.
pub fn collect_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, ChunkError> {
    if !root.exists() {
        return Err(ChunkError::NotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "walkdir error, skipping entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Reads a UTF-8 markdown file into a [`Document`] attributed to `source`.
pub fn read_document(path: &Path, source: impl Into<String>) -> Result<Document, ChunkError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Document::new(source, text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(ChunkError::NotFound(path.to_path_buf()))
        }
        Err(err) => Err(ChunkError::io(path, err)),
    }
}

fn file_source(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn relative_source(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

impl FaqProcessor {
    /// Reads and chunks one file; `source` metadata is the file name.
    pub fn process_file(
        &self,
        path: &Path,
        strategy: ChunkingStrategy,
    ) -> Result<Vec<Chunk>, ChunkError> {
        let document = read_document(path, file_source(path))?;
        self.process(&document, strategy)
    }

    /// Chunks a file, or every matching file below a directory.
    ///
    /// Directory files are processed in parallel and reported in path order,
    /// each attributed to its path relative to `path`.
    pub fn process_path(
        &self,
        path: &Path,
        strategy: ChunkingStrategy,
        options: &BatchOptions,
    ) -> Result<BatchReport, ChunkError> {
        if !path.exists() {
            return Err(ChunkError::NotFound(path.to_path_buf()));
        }
        if path.is_file() {
            let chunks = self.process_file(path, strategy)?;
            return Ok(BatchReport {
                files: 1,
                chunks,
                failures: Vec::new(),
            });
        }

        if strategy == ChunkingStrategy::FixedLength {
            validate_window(self.config().max_length, self.config().overlap_tokens)?;
        }

        let files = collect_files(path, &options.extension)?;
        if files.is_empty() {
            warn!(root = %path.display(), extension = %options.extension, "no matching files found");
        }
        info!(root = %path.display(), files = files.len(), %strategy, "processing directory");

        let mut report = BatchReport {
            files: files.len(),
            ..BatchReport::default()
        };
        match options.policy {
            BatchPolicy::FailFast => {
                let per_file: Vec<Vec<Chunk>> = files
                    .par_iter()
                    .map(|file| self.process_batch_file(path, file, strategy))
                    .collect::<Result<_, _>>()?;
                report.chunks = per_file.into_iter().flatten().collect();
            }
            BatchPolicy::SkipFailures => {
                let results: Vec<(PathBuf, Result<Vec<Chunk>, ChunkError>)> = files
                    .into_par_iter()
                    .map(|file| {
                        let result = self.process_batch_file(path, &file, strategy);
                        (file, result)
                    })
                    .collect();
                for (file, result) in results {
                    match result {
                        Ok(chunks) => report.chunks.extend(chunks),
                        Err(error) => {
                            warn!(path = %file.display(), %error, "skipping file");
                            report.failures.push(FileFailure { path: file, error });
                        }
                    }
                }
            }
        }
        info!(
            chunks = report.chunks.len(),
            failures = report.failures.len(),
            "directory processed"
        );
        Ok(report)
    }

    fn process_batch_file(
        &self,
        root: &Path,
        file: &Path,
        strategy: ChunkingStrategy,
    ) -> Result<Vec<Chunk>, ChunkError> {
        let document = read_document(file, relative_source(root, file))?;
        self.process(&document, strategy)
    }
}
