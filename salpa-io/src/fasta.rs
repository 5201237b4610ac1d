//! FASTA reading and writing.
//!
//! Reading goes through `needletail`, so gzipped inputs and FASTQ
//! headers are handled transparently; the full header text after `>`
//! becomes the record id. Writing wraps sequence lines at a
//! configurable width.

use std::fs;
use std::path::Path;

use needletail::parse_fastx_file;
use salpa_core::{Result, SalpaError};

/// A raw FASTA record: header id and sequence bytes, unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

/// Read all records from a FASTA file.
///
/// Empty files are rejected by the underlying parser.
pub fn read_fasta(path: impl AsRef<Path>) -> Result<Vec<FastaRecord>> {
    let mut reader =
        parse_fastx_file(path.as_ref()).map_err(|e| SalpaError::Parse(e.to_string()))?;
    let mut records = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| SalpaError::Parse(e.to_string()))?;
        records.push(FastaRecord {
            id: String::from_utf8_lossy(record.id()).into_owned(),
            seq: record.seq().into_owned(),
        });
    }
    Ok(records)
}

/// Render records as FASTA text, wrapping sequences at `line_length`
/// characters. A `line_length` of 0 writes each sequence on one line.
pub fn write_fasta(records: &[FastaRecord], line_length: usize) -> String {
    let width = if line_length == 0 {
        usize::MAX
    } else {
        line_length
    };
    let mut out = String::new();
    for record in records {
        out.push('>');
        out.push_str(&record.id);
        out.push('\n');
        for chunk in record.seq.chunks(width) {
            out.push_str(&String::from_utf8_lossy(chunk));
            out.push('\n');
        }
    }
    out
}

/// Write records to a FASTA file.
pub fn write_fasta_file(
    path: impl AsRef<Path>,
    records: &[FastaRecord],
    line_length: usize,
) -> Result<()> {
    fs::write(path, write_fasta(records, line_length))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
