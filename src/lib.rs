//! # motifmark - Motif Mark
//!
//! Draws each gene of a FASTA file as a line with its exon as a box, and marks
//! every occurrence of a set of degenerate (IUPAC) motifs along it.
//!
//! ## Architecture
//!
//! The run is a two-pass batch, every stage completing before the next:
//! - `iupac`: IUPAC code table and motif compilation
//! - `fasta`: FASTA parsing
//! - `model`: Gene records, motif hits and the per-run gene index
//! - `locator`: Motif scanning, overlapping hits included
//! - `layout`: Canvas size and pixel coordinates
//! - `render`: SVG output
//! - `pipeline`: File loading and orchestration

pub mod fasta;
pub mod iupac;
pub mod layout;
pub mod locator;
pub mod model;
pub mod pipeline;
pub mod render;
