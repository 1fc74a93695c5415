//! Placement of reads back onto the reference.
//!
//! A read is placed at the reference position with the fewest mismatches (ties go to the
//! leftmost position) provided that count does not exceed `max_errors`.  Only substitutions are
//! considered, which is all the generator introduces.  [`BruteForce`] scans every position,
//! [`SeedIndex`] restricts candidates to positions sharing the read's exact prefix, looked up in
//! a suffix array, and then drops candidates failing a [`SpacedSeed`] test.
use crate::check::{incorrect_nuc, nucleotide_alphabet, trim_line};
use crate::{Error, Reference, Result};
use bio::data_structures::suffix_array::{suffix_array, RawSuffixArray};
use log::{debug, trace};
use std::fmt;
use std::io::{BufRead, Write};
use std::ops::Range;

/// Default largest number of mismatches for a read to count as placed
pub const DEFAULT_MAX_ERRORS: usize = 10;
/// Default length of the exact prefix looked up in the suffix array
pub const DEFAULT_SEED_LENGTH: usize = 10;
/// Default spaced seed, `1` marks compared positions
pub const DEFAULT_SPACED_SEED: &str = "1101101";

const SENTINEL: u8 = b'$';

/// Position of a read on the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Start of the read on the reference
    pub pos: usize,
    /// Mismatches against the reference at `pos`
    pub mismatches: usize,
}

/// Strategy placing a read on the reference
pub trait Locate {
    /// Best placement of `read`, `None` when no position is within the error budget
    fn locate(&self, read: &[u8]) -> Option<Hit>;
}

/// Number of positions at which `a` and `b` differ, compared over the shorter of the two
pub fn count_mismatches(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

fn best_hit<I>(reference: &Reference, read: &[u8], candidates: I, max_errors: usize) -> Option<Hit>
where
    I: IntoIterator<Item = usize>,
{
    let mut best: Option<Hit> = None;
    for pos in candidates {
        let window = match reference.window(pos, read.len()) {
            Some(window) => window,
            None => continue,
        };
        let mismatches = count_mismatches(read, window);
        let better = match best {
            Some(hit) => (mismatches, pos) < (hit.mismatches, hit.pos),
            None => true,
        };
        if better {
            best = Some(Hit { pos, mismatches });
        }
    }
    best.filter(|hit| hit.mismatches <= max_errors)
}

/// Compares the read against every position of the reference
#[derive(Debug)]
pub struct BruteForce<'a> {
    reference: &'a Reference,
    max_errors: usize,
}

impl<'a> BruteForce<'a> {
    /// Places reads on `reference` accepting at most `max_errors` mismatches
    pub fn new(reference: &'a Reference, max_errors: usize) -> Self {
        Self {
            reference,
            max_errors,
        }
    }
}

impl Locate for BruteForce<'_> {
    fn locate(&self, read: &[u8]) -> Option<Hit> {
        let last = self.reference.len().checked_sub(read.len())?;
        let mut best: Option<Hit> = None;
        for pos in 0..=last {
            let window = &self.reference.as_bytes()[pos..pos + read.len()];
            let mismatches = count_mismatches(read, window);
            if best.map_or(true, |hit| mismatches < hit.mismatches) {
                best = Some(Hit { pos, mismatches });
                if mismatches == 0 {
                    break;
                }
            }
        }
        best.filter(|hit| hit.mismatches <= self.max_errors)
    }
}

/// Mask of compared positions at the start of a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpacedSeed {
    mask: Vec<bool>,
}

impl Default for SpacedSeed {
    fn default() -> Self {
        Self {
            mask: vec![true, true, false, true, true, false, true],
        }
    }
}

impl SpacedSeed {
    /// Parses a pattern of `0` and `1`, with at least one `1`
    pub fn parse(pattern: &str) -> Result<Self> {
        let mask = pattern
            .chars()
            .map(|c| match c {
                '1' => Ok(true),
                '0' => Ok(false),
                _ => Err(Error::InvalidSeedPattern(pattern.to_string())),
            })
            .collect::<Result<Vec<bool>>>()?;
        if !mask.iter().any(|care| *care) {
            return Err(Error::InvalidSeedPattern(pattern.to_string()));
        }
        Ok(Self { mask })
    }

    /// Number of compared positions
    pub fn weight(&self) -> usize {
        self.mask.iter().filter(|care| **care).count()
    }

    /// True when at most half of `max_errors` compared positions differ between `window` and
    /// `read`
    pub fn passes(&self, window: &[u8], read: &[u8], max_errors: usize) -> bool {
        let (matched, compared) = self
            .mask
            .iter()
            .zip(window.iter().zip(read))
            .filter(|(care, _)| **care)
            .fold((0, 0), |(matched, compared), (_, (a, b))| {
                (matched + (a == b) as usize, compared + 1)
            });
        matched + max_errors / 2 >= compared
    }
}

/// Suffix array over the reference, looked up with an exact seed taken from the read start.
///
/// Reads with a substitution inside the seed are not found, use [`BruteForce`] for those.
pub struct SeedIndex<'a> {
    reference: &'a Reference,
    text: Vec<u8>,
    sa: RawSuffixArray,
    seed_length: usize,
    spaced_seed: SpacedSeed,
    max_errors: usize,
}

impl fmt::Debug for SeedIndex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedIndex")
            .field("reference_length", &self.reference.len())
            .field("seed_length", &self.seed_length)
            .field("spaced_seed", &self.spaced_seed)
            .field("max_errors", &self.max_errors)
            .finish()
    }
}

impl<'a> SeedIndex<'a> {
    /// Builds the suffix array of `reference`
    pub fn new(
        reference: &'a Reference,
        seed_length: usize,
        spaced_seed: SpacedSeed,
        max_errors: usize,
    ) -> Result<Self> {
        if seed_length == 0 {
            return Err(Error::ZeroSeedLength);
        }
        let mut text = reference.as_bytes().to_vec();
        text.push(SENTINEL);
        debug!("Building suffix array over {} bases", reference.len());
        let sa = suffix_array(&text);
        Ok(Self {
            reference,
            text,
            sa,
            seed_length,
            spaced_seed,
            max_errors,
        })
    }

    fn prefix(&self, pos: usize, len: usize) -> &[u8] {
        &self.text[pos..std::cmp::min(pos + len, self.text.len())]
    }

    /// Range of the suffix array holding suffixes that start with `seed`
    pub fn seed_range(&self, seed: &[u8]) -> Range<usize> {
        let left = self
            .sa
            .partition_point(|&pos| self.prefix(pos, seed.len()) < seed);
        let right = self
            .sa
            .partition_point(|&pos| self.prefix(pos, seed.len()) <= seed);
        left..right
    }

    /// Reference positions starting with `seed`, in suffix order
    pub fn seed_positions(&self, seed: &[u8]) -> &[usize] {
        &self.sa[self.seed_range(seed)]
    }
}

impl Locate for SeedIndex<'_> {
    fn locate(&self, read: &[u8]) -> Option<Hit> {
        let seed = &read[..std::cmp::min(self.seed_length, read.len())];
        let candidates = self
            .seed_positions(seed)
            .iter()
            .copied()
            .filter(|&pos| match self.reference.window(pos, read.len()) {
                Some(window) => self.spaced_seed.passes(window, read, self.max_errors),
                None => false,
            });
        best_hit(self.reference, read, candidates, self.max_errors)
    }
}

/// Writes `index`, position and mismatches tab separated, `*` for unplaced reads
pub fn write_hit<W: Write>(wtr: &mut W, index: usize, hit: Option<Hit>) -> Result<()> {
    match hit {
        Some(hit) => writeln!(wtr, "{}\t{}\t{}", index, hit.pos, hit.mismatches)?,
        None => writeln!(wtr, "{}\t*\t*", index)?,
    }
    Ok(())
}

/// Counts over a placed reads file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocateSummary {
    /// Reads seen
    pub reads: usize,
    /// Reads placed within the error budget
    pub placed: usize,
    /// Mismatches summed over placed reads
    pub mismatches: usize,
}

/// Places every non-empty line of `rdr` and writes one [`write_hit`] line per read to `wtr`
pub fn locate_all<L, R, W>(locator: &L, mut rdr: R, wtr: &mut W) -> Result<LocateSummary>
where
    L: Locate + ?Sized,
    R: BufRead,
    W: Write,
{
    let alphabet = nucleotide_alphabet();
    let mut summary = LocateSummary::default();
    let mut line = Vec::new();
    while rdr.read_until(b'\n', &mut line)? > 0 {
        let read = trim_line(&line);
        if !read.is_empty() {
            if !alphabet.is_word(read) {
                return Err(incorrect_nuc(&alphabet, read));
            }
            let hit = locator.locate(read);
            trace!("Read {} placed at {:?}", summary.reads, hit);
            write_hit(wtr, summary.reads, hit)?;
            summary.reads += 1;
            if let Some(hit) = hit {
                summary.placed += 1;
                summary.mismatches += hit.mismatches;
            }
        }
        line.clear();
    }
    Ok(summary)
}
