//! FASTA validation and the small amount of text surgery the pipeline needs.
//!
//! Input arrives from the command line as either a bare protein sequence or a
//! FASTA string. [`header_check`] normalises the former into the latter;
//! [`strip_newlines`] collapses wrapped bodies so the query can be prepended
//! to the ortholog set returned by OMA.

use orthocons_core::OrthoconsError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Header synthesised for input that carries none
pub const DEFAULT_HEADER: &str = ">Input Sequence";

/// Line width used when writing FASTA files
const LINE_WIDTH: usize = 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Empty Sequence entered.")]
    Empty,

    #[error("Not a FASTA sequence. Please try again")]
    NotFasta,

    #[error("Record {index} requested but the input holds {count} record(s)")]
    MissingRecord { index: usize, count: usize },

    #[error("Record '{header}' has no sequence")]
    MissingBody { header: String },
}

impl From<SequenceError> for OrthoconsError {
    fn from(err: SequenceError) -> Self {
        OrthoconsError::InvalidInput(err.to_string())
    }
}

/// A single FASTA record. The header is stored without the leading `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub header: String,
    pub sequence: String,
}

impl FastaRecord {
    pub fn new(header: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            sequence: sequence.into(),
        }
    }

    /// First whitespace-delimited token of the header
    pub fn id(&self) -> &str {
        self.header.split_whitespace().next().unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl std::fmt::Display for FastaRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ">{}\n{}", self.header, self.sequence)
    }
}

/// Make sure the input carries a FASTA header.
///
/// Input starting with `>` is returned unchanged. Input starting with a letter
/// gets [`DEFAULT_HEADER`] prepended on its own line. Anything else is rejected.
pub fn header_check(sequences: &str) -> Result<String, SequenceError> {
    if sequences.starts_with('>') {
        return Ok(sequences.to_string());
    }

    match sequences.chars().next() {
        None => Err(SequenceError::Empty),
        Some(c) if c.is_alphabetic() => Ok(format!("{}\n{}", DEFAULT_HEADER, sequences)),
        Some(_) => Err(SequenceError::NotFasta),
    }
}

/// Split FASTA text into its individual `>` blocks, header and newlines
/// included. Text that does not start with `>` is returned as one block.
pub fn split_records(text: &str) -> Vec<String> {
    if !text.starts_with('>') {
        return vec![text.to_string()];
    }

    text.split('>')
        .filter(|block| !block.is_empty())
        .map(|block| format!(">{}", block))
        .collect()
}

/// Sequence of the record at `index`, header removed and lines joined.
pub fn sequence_at(text: &str, index: usize) -> Result<String, SequenceError> {
    let blocks = split_records(text);
    let block = blocks.get(index).ok_or(SequenceError::MissingRecord {
        index,
        count: blocks.len(),
    })?;

    Ok(block
        .lines()
        .filter(|line| !line.starts_with('>'))
        .map(str::trim)
        .collect())
}

/// Remove the line breaks inside every sequence body while keeping each
/// header on its own line.
pub fn strip_newlines(text: &str) -> Result<String, SequenceError> {
    let checked = header_check(text)?;
    let mut stripped = Vec::new();

    for block in split_records(&checked) {
        let mut lines = block.lines().map(str::trim).filter(|line| !line.is_empty());
        let header = lines.next().unwrap_or(">");
        let body: String = lines.collect();
        if body.is_empty() {
            return Err(SequenceError::MissingBody {
                header: header.trim_start_matches('>').to_string(),
            });
        }
        stripped.push(format!("{}\n{}", header, body));
    }

    Ok(stripped.join("\n"))
}

/// Parse FASTA text (or a bare sequence) into records.
pub fn parse_records(text: &str) -> Result<Vec<FastaRecord>, SequenceError> {
    let checked = header_check(text.trim_start())?;
    let mut records: Vec<FastaRecord> = Vec::new();

    for line in checked.lines() {
        let line = line.trim();
        if let Some(header) = line.strip_prefix('>') {
            records.push(FastaRecord::new(header.trim(), String::new()));
        } else if let Some(current) = records.last_mut() {
            current.sequence.push_str(line);
        }
    }

    if let Some(empty) = records.iter().find(|r| r.is_empty()) {
        return Err(SequenceError::MissingBody {
            header: empty.header.clone(),
        });
    }

    Ok(records)
}

/// Write records to a FASTA file, wrapping sequence lines.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[FastaRecord]) -> Result<(), OrthoconsError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    for record in records {
        writeln!(writer, ">{}", record.header)?;
        for chunk in record.sequence.as_bytes().chunks(LINE_WIDTH) {
            writer.write_all(chunk)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()?;

    tracing::debug!(
        "Wrote {} records to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}
