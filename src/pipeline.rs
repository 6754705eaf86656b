//! Loading of the input files and the two-pass annotation run.
//!
//! A run goes through the following stages, each finished before the next
//! starts:
//! 1. Compile every motif
//! 2. Parse every FASTA record, derive its gene record and locate the motifs
//! 3. Compute the layout from the complete gene index

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::fasta::{parse_fasta, FastaError};
use crate::iupac::{compile, MotifError, MotifPattern};
use crate::layout::{Layout, LayoutConfig, LayoutError};
use crate::model::GeneIndex;

/// Errors that can end a run.
#[derive(Error, Debug)]
pub enum MarkError {
    #[error("Failed to read input: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Motif file, line {line}: {source}")]
    Motif { line: usize, source: MotifError },

    #[error("FASTA error: {0}")]
    Fasta(#[from] FastaError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Result type for a run.
pub type MarkResult<T> = Result<T, MarkError>;

/// Everything produced by a run.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub motifs: Vec<MotifPattern>,
    pub index: GeneIndex,
    pub layout: Layout,
}

/// Compiles one motif per non-blank line.
pub fn parse_motifs<R: BufRead>(reader: R) -> MarkResult<Vec<MotifPattern>> {
    let mut motifs = Vec::new();
    for (i, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }
        let pattern = compile(&line).map_err(|source| MarkError::Motif { line: i + 1, source })?;
        motifs.push(pattern);
    }
    Ok(motifs)
}

/// Compiles the motifs of an in-memory motif list.
pub fn parse_motifs_str(content: &str) -> MarkResult<Vec<MotifPattern>> {
    parse_motifs(content.as_bytes())
}

/// Compiles the motifs of a motif file.
pub fn load_motifs<P: AsRef<Path>>(path: P) -> MarkResult<Vec<MotifPattern>> {
    let file = File::open(path)?;
    parse_motifs(BufReader::new(file))
}

/// Runs the annotation on already compiled motifs and FASTA content.
pub fn annotate<R: BufRead>(
    fasta: R,
    motifs: Vec<MotifPattern>,
    config: &LayoutConfig,
) -> MarkResult<Annotation> {
    let sequences = parse_fasta(fasta)?;
    let index = GeneIndex::build(&sequences, &motifs)?;
    info!(
        "Found {} motif hits in {} genes",
        index.hit_count(),
        index.len()
    );

    let layout = Layout::compute(&index, config)?;
    Ok(Annotation {
        motifs,
        index,
        layout,
    })
}

/// Runs the annotation on a FASTA file and a motif file.
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    fasta_path: P,
    motif_path: Q,
    config: &LayoutConfig,
) -> MarkResult<Annotation> {
    let motifs = load_motifs(&motif_path)?;
    info!(
        "Loaded {} motifs from {}",
        motifs.len(),
        motif_path.as_ref().display()
    );

    let file = File::open(fasta_path)?;
    annotate(BufReader::new(file), motifs, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_motifs() {
        let motifs = parse_motifs_str("ygcy\n\nGCAUG\n  catag \n").unwrap();
        let symbols: Vec<&str> = motifs.iter().map(|m| m.symbols()).collect();
        assert_eq!(symbols, vec!["YGCY", "GCAUG", "CATAG"]);
    }

    #[test]
    fn test_invalid_motif_reports_line() {
        let result = parse_motifs_str("ygcy\n\nGCXUG\n");
        match result {
            Err(MarkError::Motif { line, source }) => {
                assert_eq!(line, 3);
                assert!(matches!(source, MotifError::InvalidSymbol { symbol: 'X', .. }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_annotate() {
        let motifs = parse_motifs_str("AA\n").unwrap();
        let fasta = ">g1\naaaaaAAAaaa\n>g2\ncccccAAAAAAAAAcc\n";
        let annotation = annotate(fasta.as_bytes(), motifs, &LayoutConfig::default()).unwrap();

        assert_eq!(annotation.index.len(), 2);
        assert_eq!(annotation.layout.width, 20);
        assert_eq!(annotation.layout.height, 240);
        assert_eq!(annotation.layout.genes[1].ticks.len(), 8);
    }

    #[test]
    fn test_annotate_empty_input() {
        let motifs = parse_motifs_str("AA\n").unwrap();
        let result = annotate("".as_bytes(), motifs, &LayoutConfig::default());
        assert!(matches!(result, Err(MarkError::Layout(LayoutError::NoRecords))));
    }

    #[test]
    fn test_annotate_non_ascii_record() {
        let result = annotate(">g1\naaACGTÅaa\n".as_bytes(), Vec::new(), &LayoutConfig::default());
        assert!(matches!(result, Err(MarkError::Fasta(FastaError::NonAsciiSequence(_)))));
    }

    #[test]
    fn test_annotate_malformed_record() {
        let result = annotate(">g1\nacgt\n".as_bytes(), Vec::new(), &LayoutConfig::default());
        assert!(matches!(result, Err(MarkError::Fasta(FastaError::NoExon(_)))));
    }
}
