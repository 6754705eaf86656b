//! Motif location in gene sequences.
//!
//! The whole sequence is scanned (exon and flanking introns alike). Hits are
//! grouped by motif in motif-list order, ascending within each motif.

use crate::iupac::Matcher;
use crate::model::MotifHit;

/// Finds every occurrence of every pattern in `sequence`.
///
/// Overlapping occurrences of the same motif are all reported.
pub fn locate<M: Matcher>(sequence: &[u8], patterns: &[M]) -> Vec<MotifHit> {
    patterns
        .iter()
        .enumerate()
        .flat_map(|(motif, pattern)| {
            pattern
                .find_starts(sequence)
                .into_iter()
                .map(move |start| MotifHit { motif, start })
        })
        .collect()
}
