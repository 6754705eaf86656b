//! IUPAC nucleotide codes and motif compilation.
//!
//! This module provides:
//! - The fixed table of the 16 nucleotide symbols (A, C, G, T, U and the ambiguity codes)
//! - Compilation of a degenerate motif string into a [`MotifPattern`]
//! - The [`Matcher`] trait used by the motif locator
//!
//! Matching is case-insensitive and treats T and U as the same base, so a motif
//! written for DNA also finds its sites in RNA input and vice versa.

use thiserror::Error;

const BASE_A: u8 = 1;
const BASE_C: u8 = 2;
const BASE_G: u8 = 4;
/// T and U share one bit.
const BASE_T: u8 = 8;
const BASE_ANY: u8 = BASE_A | BASE_C | BASE_G | BASE_T;

/// Symbol to base-set table.
const IUPAC_TABLE: [(char, u8); 16] = [
    ('A', BASE_A),
    ('C', BASE_C),
    ('G', BASE_G),
    ('T', BASE_T),
    ('U', BASE_T),
    ('W', BASE_A | BASE_T),
    ('S', BASE_G | BASE_C),
    ('M', BASE_A | BASE_C),
    ('K', BASE_G | BASE_T),
    ('R', BASE_A | BASE_G),
    ('Y', BASE_C | BASE_T),
    ('B', BASE_C | BASE_G | BASE_T),
    ('D', BASE_A | BASE_G | BASE_T),
    ('H', BASE_A | BASE_C | BASE_T),
    ('V', BASE_A | BASE_C | BASE_G),
    ('N', BASE_ANY),
];

/// Errors that can occur while compiling a motif.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MotifError {
    #[error("Invalid IUPAC symbol '{symbol}' at position {position} in motif '{motif}'")]
    InvalidSymbol {
        symbol: char,
        position: usize,
        motif: String,
    },

    #[error("Empty motif")]
    Empty,
}

/// Result type for motif compilation.
pub type MotifResult<T> = Result<T, MotifError>;

/// A set of nucleotides accepted at one motif position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseSet(u8);

impl BaseSet {
    /// Looks up an uppercase IUPAC symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        IUPAC_TABLE
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|&(_, mask)| Self(mask))
    }

    /// Maps a sequence byte to its base bit. Anything that is not a nucleotide
    /// letter maps to the empty set and never matches.
    #[inline(always)]
    fn of_base(byte: u8) -> u8 {
        match byte {
            b'A' | b'a' => BASE_A,
            b'C' | b'c' => BASE_C,
            b'G' | b'g' => BASE_G,
            b'T' | b't' | b'U' | b'u' => BASE_T,
            _ => 0,
        }
    }

    /// Returns true if the sequence byte belongs to this set (either case).
    #[inline(always)]
    pub fn accepts(self, byte: u8) -> bool {
        self.0 & Self::of_base(byte) != 0
    }
}

/// Anything that can report every offset where it matches in a text.
pub trait Matcher {
    /// Returns the start offset of every match, ascending. Overlapping matches
    /// are all reported and no match extends past the end of `text`.
    fn find_starts(&self, text: &[u8]) -> Vec<usize>;
}

/// A compiled degenerate motif.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifPattern {
    /// Uppercase IUPAC symbols as given in the motif file
    symbols: String,
    /// One base set per motif position
    classes: Vec<BaseSet>,
}

impl MotifPattern {
    /// The motif as uppercase IUPAC symbols.
    pub fn symbols(&self) -> &str {
        &self.symbols
    }

    /// Length of the motif in bases.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the motif has no position (never the case once compiled).
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns true if the motif matches `text` starting exactly at `start`.
    pub fn matches_at(&self, text: &[u8], start: usize) -> bool {
        match text.get(start..start + self.classes.len()) {
            Some(window) => self
                .classes
                .iter()
                .zip(window)
                .all(|(class, &byte)| class.accepts(byte)),
            None => false,
        }
    }
}

impl Matcher for MotifPattern {
    fn find_starts(&self, text: &[u8]) -> Vec<usize> {
        let len = self.classes.len();
        if len == 0 || text.len() < len {
            return Vec::new();
        }
        // Step of one base: a match does not consume its region.
        (0..=text.len() - len)
            .filter(|&start| self.matches_at(text, start))
            .collect()
    }
}

/// Compiles a motif string into a case-insensitive, ambiguity-aware pattern.
///
/// The motif is trimmed and each symbol upper-cased (ASCII only), so `ygcy` and
/// `YGCY` compile to the same pattern. Any other character, non-ASCII letters
/// included, is rejected at its position in the trimmed motif.
///
/// # Examples
///
/// ```
/// use motifmark::iupac::{compile, Matcher};
///
/// let pattern = compile("YGCY").unwrap();
/// assert_eq!(pattern.find_starts(b"ttgctgcu"), vec![1, 4]);
/// ```
pub fn compile(motif: &str) -> MotifResult<MotifPattern> {
    let motif = motif.trim();
    if motif.is_empty() {
        return Err(MotifError::Empty);
    }

    let mut symbols = String::with_capacity(motif.len());
    let mut classes = Vec::with_capacity(motif.len());
    for (position, symbol) in motif.chars().enumerate() {
        let upper = symbol.to_ascii_uppercase();
        let class = BaseSet::from_symbol(upper).ok_or_else(|| MotifError::InvalidSymbol {
            symbol,
            position,
            motif: motif.to_string(),
        })?;
        symbols.push(upper);
        classes.push(class);
    }

    Ok(MotifPattern { symbols, classes })
}
