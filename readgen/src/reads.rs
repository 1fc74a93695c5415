use crate::{Reference, Result, SimParams, NUCLEOTIDES};
use log::trace;
use rand::Rng;
use std::io::Write;

/// A single substitution applied to a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    /// Offset inside the read
    pub pos: usize,
    /// Base at `pos` right before the substitution
    pub from: u8,
    /// Replacement base, never equal to `from`
    pub to: u8,
}

/// Fixed length window of the reference, possibly carrying substitutions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Read {
    /// Start of the window on the reference
    pub start: usize,
    /// Bases of the read after mutation
    pub seq: Vec<u8>,
    /// Substitutions in the order they were applied
    pub mutations: Vec<Mutation>,
}

impl Read {
    /// True when at least one substitution was applied
    pub fn is_mutated(&self) -> bool {
        !self.mutations.is_empty()
    }

    /// Number of bases in the read
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// True for a zero length read
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// Applies `count` substitutions at uniformly drawn positions of `seq`.
///
/// Positions are drawn independently, so the same position can be hit twice.  Each
/// substitution replaces whatever base is present at that moment, which means a second hit can
/// restore the original base.
pub fn mutate<R: Rng + ?Sized>(seq: &mut [u8], count: usize, rng: &mut R) -> Vec<Mutation> {
    if seq.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let pos = rng.gen_range(0..seq.len());
            let from = seq[pos];
            let to = substitute(from, rng);
            seq[pos] = to;
            Mutation { pos, from, to }
        })
        .collect()
}

/// Uniform choice among the other three nucleotides
fn substitute<R: Rng + ?Sized>(base: u8, rng: &mut R) -> u8 {
    let n = NUCLEOTIDES.len();
    match NUCLEOTIDES.iter().position(|nuc| *nuc == base) {
        Some(idx) => NUCLEOTIDES[(idx + rng.gen_range(1..n)) % n],
        None => NUCLEOTIDES[rng.gen_range(0..n)],
    }
}

/// Iterator over reads cut from a reference at a fixed stride.
///
/// Reads start at `0, stride, 2 * stride, ...` and stop after `read_count` reads or as soon as
/// a full read no longer fits, whichever comes first.  Reads are produced lazily so they can be
/// written out without holding the whole set in memory.
#[derive(Debug)]
pub struct ReadSampler<'a, R: ?Sized> {
    reference: &'a Reference,
    params: &'a SimParams,
    rng: &'a mut R,
    next_start: usize,
    emitted: usize,
}

impl<'a, R: Rng + ?Sized> ReadSampler<'a, R> {
    /// Validates `params` and positions the sampler at the start of the reference
    pub fn new(reference: &'a Reference, params: &'a SimParams, rng: &'a mut R) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            reference,
            params,
            rng,
            next_start: 0,
            emitted: 0,
        })
    }

    fn remaining(&self) -> usize {
        let left = self.params.read_count.saturating_sub(self.emitted);
        let fits = match self.reference.len().checked_sub(self.params.read_length) {
            Some(max_start) if self.next_start <= max_start => {
                (max_start - self.next_start) / self.params.stride + 1
            }
            _ => 0,
        };
        std::cmp::min(left, fits)
    }
}

impl<'a, R: Rng + ?Sized> Iterator for ReadSampler<'a, R> {
    type Item = Read;

    fn next(&mut self) -> Option<Read> {
        if self.emitted >= self.params.read_count {
            return None;
        }
        let start = self.next_start;
        let mut seq = self
            .reference
            .window(start, self.params.read_length)?
            .to_vec();

        let mutations = if self.rng.gen_bool(self.params.mutation_rate) {
            let count = self
                .rng
                .gen_range(self.params.min_mutations..=self.params.max_mutations);
            mutate(&mut seq, count, &mut *self.rng)
        } else {
            Vec::new()
        };
        for m in mutations.iter() {
            trace!(
                "Read at {}: {} > {} at offset {}",
                start,
                m.from as char,
                m.to as char,
                m.pos
            );
        }

        self.next_start = start.saturating_add(self.params.stride);
        self.emitted += 1;
        Some(Read {
            start,
            seq,
            mutations,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

/// Writes a read as a single newline terminated line
pub fn write_read<W: Write>(wtr: &mut W, read: &Read) -> Result<()> {
    wtr.write_all(&read.seq)?;
    wtr.write_all(b"\n")?;
    Ok(())
}
