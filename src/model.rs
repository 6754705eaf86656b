//! Data model for motif annotation.
//!
//! This module contains the data structures shared by the pipeline stages:
//! - Raw sequences as read from the FASTA file
//! - Gene records (length and single exon span)
//! - Motif hits
//! - The per-run gene index, in input order

use std::collections::HashMap;

use log::{debug, warn};

use crate::fasta::{FastaError, FastaResult};
use crate::iupac::MotifPattern;
use crate::locator::locate;

/// Represents a single sequence with its identifier and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (FASTA header without '>')
    pub id: String,
    /// The sequence data, case preserved (uppercase = exon, lowercase = intron)
    pub data: String,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }

    /// Gets the sequence data as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }
}

/// Structural coordinates of one gene: its length and its single exon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRecord {
    /// Gene identifier
    pub id: String,
    /// Total sequence length (introns and exon)
    pub length: usize,
    /// 0-based offset of the first exon base
    pub exon_start: usize,
    /// Number of bases in the exon
    pub exon_len: usize,
}

impl GeneRecord {
    /// Derives the gene structure from a sequence.
    ///
    /// The exon is the first run of uppercase letters. When the sequence has no
    /// lowercase letter after the exon starts, the exon reaches the end of the
    /// sequence. Only one exon is modelled: later uppercase runs are ignored.
    /// Sequences must be ASCII, so lengths and offsets count bases.
    pub fn from_sequence(sequence: &Sequence) -> FastaResult<Self> {
        let bytes = sequence.as_bytes();
        if bytes.is_empty() {
            return Err(FastaError::EmptySequence(sequence.id.clone()));
        }
        if !bytes.is_ascii() {
            return Err(FastaError::NonAsciiSequence(sequence.id.clone()));
        }

        let exon_start = bytes
            .iter()
            .position(u8::is_ascii_uppercase)
            .ok_or_else(|| FastaError::NoExon(sequence.id.clone()))?;

        let exon_len = bytes[exon_start..]
            .iter()
            .position(u8::is_ascii_lowercase)
            .unwrap_or(bytes.len() - exon_start);

        let exon_end = exon_start + exon_len;
        if bytes[exon_end..].iter().any(u8::is_ascii_uppercase) {
            warn!(
                "{}: more than one exon found, only the first ({}..{}) is drawn",
                sequence.id, exon_start, exon_end
            );
        }

        Ok(Self {
            id: sequence.id.clone(),
            length: bytes.len(),
            exon_start,
            exon_len,
        })
    }

    /// Offset one past the last exon base.
    pub fn exon_end(&self) -> usize {
        self.exon_start + self.exon_len
    }
}

/// One occurrence of a motif in a gene sequence.
///
/// The gene is identified by the index slot the hit is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotifHit {
    /// Index of the motif in the motif list
    pub motif: usize,
    /// 0-based start offset in the full gene sequence
    pub start: usize,
}

/// Gene records and motif hits for one run, keyed by gene identifier.
///
/// Iteration follows input order, which is also the top-to-bottom drawing order.
#[derive(Debug, Clone, Default)]
pub struct GeneIndex {
    records: Vec<GeneRecord>,
    hits: Vec<Vec<MotifHit>>,
    positions: HashMap<String, usize>,
}

impl GeneIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives every gene record and locates every motif in every sequence.
    pub fn build(sequences: &[Sequence], patterns: &[MotifPattern]) -> FastaResult<Self> {
        let mut index = Self::new();
        for sequence in sequences {
            let record = GeneRecord::from_sequence(sequence)?;
            let hits = locate(sequence.as_bytes(), patterns);
            debug!(
                "{}: length {}, exon {}..{}, {} motif hits",
                record.id,
                record.length,
                record.exon_start,
                record.exon_end(),
                hits.len()
            );
            index.insert(record, hits)?;
        }
        Ok(index)
    }

    /// Adds a gene at the end of the index.
    pub fn insert(&mut self, record: GeneRecord, hits: Vec<MotifHit>) -> FastaResult<()> {
        if self.positions.contains_key(&record.id) {
            return Err(FastaError::DuplicateIdentifier(record.id));
        }
        self.positions.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        self.hits.push(hits);
        Ok(())
    }

    /// Returns the number of genes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the index holds no gene.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Gets a gene record by identifier.
    pub fn record(&self, id: &str) -> Option<&GeneRecord> {
        self.positions.get(id).map(|&i| &self.records[i])
    }

    /// Gets the motif hits of a gene by identifier.
    pub fn hits(&self, id: &str) -> Option<&[MotifHit]> {
        self.positions.get(id).map(|&i| self.hits[i].as_slice())
    }

    /// Iterates over genes and their hits in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&GeneRecord, &[MotifHit])> {
        self.records
            .iter()
            .zip(self.hits.iter().map(Vec::as_slice))
    }

    /// Length of the longest gene.
    pub fn max_length(&self) -> Option<usize> {
        self.records.iter().map(|r| r.length).max()
    }

    /// Total number of motif hits over all genes.
    pub fn hit_count(&self) -> usize {
        self.hits.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iupac::compile;

    fn record(data: &str) -> FastaResult<GeneRecord> {
        GeneRecord::from_sequence(&Sequence::new("gene", data))
    }

    #[test]
    fn test_exon_between_introns() {
        let r = record("aaaACGTaaa").unwrap();
        assert_eq!(r.length, 10);
        assert_eq!(r.exon_start, 3);
        assert_eq!(r.exon_len, 4);
        assert_eq!(r.exon_end(), 7);
    }

    #[test]
    fn test_exon_reaches_end_of_sequence() {
        let r = record("AAAA").unwrap();
        assert_eq!((r.length, r.exon_start, r.exon_len), (4, 0, 4));

        let r = record("ccGGG").unwrap();
        assert_eq!((r.exon_start, r.exon_len), (2, 3));
    }

    #[test]
    fn test_only_first_exon_kept() {
        let r = record("aAAaaCCa").unwrap();
        assert_eq!((r.exon_start, r.exon_len), (1, 2));
    }

    #[test]
    fn test_no_exon() {
        assert!(matches!(record("acgt"), Err(FastaError::NoExon(id)) if id == "gene"));
    }

    #[test]
    fn test_empty_sequence() {
        assert!(matches!(record(""), Err(FastaError::EmptySequence(_))));
    }

    #[test]
    fn test_non_ascii_sequence() {
        assert!(matches!(record("aaÅCGTaa"), Err(FastaError::NonAsciiSequence(id)) if id == "gene"));
        assert!(matches!(record("ACGTé"), Err(FastaError::NonAsciiSequence(_))));
    }

    #[test]
    fn test_index_preserves_input_order() {
        let sequences = vec![
            Sequence::new("zeta", "aaACGTaa"),
            Sequence::new("alpha", "ACGTACGTac"),
            Sequence::new("mid", "ttTTtt"),
        ];
        let patterns = vec![compile("ACGT").unwrap()];
        let index = GeneIndex::build(&sequences, &patterns).unwrap();

        let ids: Vec<&str> = index.iter().map(|(r, _)| r.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.max_length(), Some(10));
        assert_eq!(index.record("alpha").unwrap().exon_len, 8);
        assert_eq!(
            index.hits("alpha").unwrap(),
            &[MotifHit { motif: 0, start: 0 }, MotifHit { motif: 0, start: 4 }]
        );
        assert!(index.hits("mid").unwrap().is_empty());
        assert_eq!(index.hit_count(), 3);
        assert!(index.record("missing").is_none());
    }

    #[test]
    fn test_duplicate_identifier() {
        let sequences = vec![Sequence::new("g", "ACGT"), Sequence::new("g", "aCGT")];
        let result = GeneIndex::build(&sequences, &[]);
        assert!(matches!(result, Err(FastaError::DuplicateIdentifier(id)) if id == "g"));
    }
}
