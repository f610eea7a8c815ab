//! Chunk persistence for command-line callers.

use crate::chunk::Chunk;
use serde::Serialize;
use std::io::{self, Write};

/// Writes `chunks` as one pretty-printed JSON array.
pub fn write_json<W: Write>(writer: &mut W, chunks: &[Chunk]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, chunks)?;
    writer.write_all(b"\n")
}

/// Writes one compact JSON object per line.
pub fn write_jsonl<W: Write, T: Serialize>(writer: &mut W, records: &[T]) -> io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
