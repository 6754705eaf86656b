//! FASTA file parser.
//!
//! This module handles reading and parsing FASTA format files.
//! It supports both single-line and multi-line sequences.
//!
//! ## FASTA Format
//!
//! ```text
//! >gene_identifier optional description
//! ccttgcATGCATGCAtttgca...
//! >another_gene
//! ...
//! ```
//!
//! Sequence case is preserved: uppercase letters mark the exon, lowercase
//! letters the flanking introns.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::model::Sequence;

/// Errors that can occur during FASTA parsing and gene record derivation.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to read FASTA file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed record: sequence without header at line {0}")]
    SequenceWithoutHeader(usize),

    #[error("Malformed record: empty sequence identifier at line {0}")]
    EmptyIdentifier(usize),

    #[error("Malformed record '{0}': empty sequence")]
    EmptySequence(String),

    #[error("Malformed record '{0}': sequence contains non-ASCII characters")]
    NonAsciiSequence(String),

    #[error("Malformed record '{0}': no exon (uppercase region) found")]
    NoExon(String),

    #[error("Malformed record '{0}': identifier used more than once")]
    DuplicateIdentifier(String),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses a FASTA file and returns its sequences in file order.
///
/// # Examples
///
/// ```no_run
/// use motifmark::fasta::parse_fasta_file;
///
/// let sequences = parse_fasta_file("genes.fasta").unwrap();
/// println!("Loaded {} sequences", sequences.len());
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<Vec<Sequence>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    parse_fasta(reader)
}

/// Parses FASTA content from a reader.
///
/// The identifier is the whole header line after '>', trimmed. Returns an
/// empty vector for input without any record.
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<Vec<Sequence>> {
    let mut sequences = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_seq = String::new();
    let mut line_number = 0;

    for line_result in reader.lines() {
        line_number += 1;
        let line = line_result?;
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                sequences.push(finish_record(id, std::mem::take(&mut current_seq))?);
            }

            let id = header.trim();
            if id.is_empty() {
                return Err(FastaError::EmptyIdentifier(line_number));
            }
            current_id = Some(id.to_string());
        } else {
            if current_id.is_none() {
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }

            // Wrapped lines are concatenated, internal whitespace dropped
            if line.bytes().all(|b| !b.is_ascii_whitespace()) {
                current_seq.push_str(line);
            } else {
                current_seq.extend(line.chars().filter(|c| !c.is_whitespace()));
            }
        }
    }

    // Don't forget the last record
    if let Some(id) = current_id {
        sequences.push(finish_record(id, current_seq)?);
    }

    Ok(sequences)
}

fn finish_record(id: String, data: String) -> FastaResult<Sequence> {
    if data.is_empty() {
        return Err(FastaError::EmptySequence(id));
    }
    Ok(Sequence::new(id, data))
}

/// Parses FASTA content from a string.
///
/// Useful for testing or processing in-memory data.
pub fn parse_fasta_str(content: &str) -> FastaResult<Vec<Sequence>> {
    parse_fasta(content.as_bytes())
}
