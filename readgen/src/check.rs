//! Verification of generated files against the reference they were sampled from.
//!
//! Files are read back the way downstream aligners read them: the reference is the
//! concatenation of its lines and every non-empty line of the reads file is one read.
use crate::{Error, Reference, Result, SimParams, NUCLEOTIDES};
use bio::alphabets::Alphabet;
use log::debug;
use std::fmt;
use std::io::BufRead;

pub(crate) fn nucleotide_alphabet() -> Alphabet {
    Alphabet::new(&NUCLEOTIDES)
}

pub(crate) fn trim_line(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|c| *c != b'\n' && *c != b'\r')
        .map_or(0, |pos| pos + 1);
    &line[..end]
}

pub(crate) fn incorrect_nuc(alphabet: &Alphabet, seq: &[u8]) -> Error {
    let found = seq
        .iter()
        .find(|c| !alphabet.symbols.contains(**c as usize))
        .map_or_else(String::new, |c| (*c as char).to_string());
    Error::IncorrectNuc(found)
}

/// Loads a line wrapped reference, rejecting anything outside `ACGT`
pub fn load_reference<R: BufRead>(mut rdr: R) -> Result<Reference> {
    let alphabet = nucleotide_alphabet();
    let mut seq = Vec::new();
    let mut line = Vec::new();
    let mut lines = 0usize;
    while rdr.read_until(b'\n', &mut line)? > 0 {
        let bases = trim_line(&line);
        if !alphabet.is_word(bases) {
            return Err(incorrect_nuc(&alphabet, bases));
        }
        seq.extend_from_slice(bases);
        line.clear();
        lines += 1;
    }
    debug!("Loaded {} bases from {} lines", seq.len(), lines);
    Ok(Reference::from_seq(seq))
}

/// Summary of a verified reads file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Bases in the reference
    pub reference_length: usize,
    /// Reads verified
    pub reads: usize,
    /// Reads that differ from their reference window
    pub mutated_reads: usize,
    /// Differing positions summed over all reads
    pub mismatches: usize,
    /// Reads expected for the reference and parameters
    pub expected_reads: usize,
}

impl CheckReport {
    /// True when the number of reads is exactly what generation would produce
    pub fn is_complete(&self) -> bool {
        self.reads == self.expected_reads
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "reference_length\t{}", self.reference_length)?;
        writeln!(f, "reads\t{}", self.reads)?;
        writeln!(f, "expected_reads\t{}", self.expected_reads)?;
        writeln!(f, "mutated_reads\t{}", self.mutated_reads)?;
        write!(f, "mismatches\t{}", self.mismatches)
    }
}

/// Checks reads one at a time against the reference windows they should come from
pub struct ReadChecker<'a> {
    reference: &'a Reference,
    params: SimParams,
    alphabet: Alphabet,
    report: CheckReport,
}

impl fmt::Debug for ReadChecker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadChecker")
            .field("reference_length", &self.reference.len())
            .field("params", &self.params)
            .field("report", &self.report)
            .finish()
    }
}

impl<'a> ReadChecker<'a> {
    /// Uses `read_length`, `stride`, `max_mutations` and `read_count` from `params`, the
    /// reference length is taken from `reference`.  `min_mutations` plays no part in checking
    /// and is lowered to `max_mutations` when larger.
    pub fn new(reference: &'a Reference, params: &SimParams) -> Result<Self> {
        let params = SimParams {
            reference_length: reference.len(),
            min_mutations: params.min_mutations.min(params.max_mutations),
            ..params.clone()
        };
        params.validate()?;
        let report = CheckReport {
            reference_length: reference.len(),
            expected_reads: params.expected_read_count(),
            ..Default::default()
        };
        Ok(Self {
            reference,
            params,
            alphabet: nucleotide_alphabet(),
            report,
        })
    }

    /// Verifies the read at `index` and returns how many positions differ from the reference
    pub fn check(&mut self, index: usize, read: &[u8]) -> Result<usize> {
        let invalid = |reason: String| Error::InvalidRead { index, reason };

        if read.len() != self.params.read_length {
            return Err(invalid(format!(
                "length {} instead of {}",
                read.len(),
                self.params.read_length
            )));
        }
        if index >= self.report.expected_reads {
            return Err(invalid(format!(
                "only {} reads fit the reference",
                self.report.expected_reads
            )));
        }
        if !self.alphabet.is_word(read) {
            return Err(invalid(format!(
                "{}",
                incorrect_nuc(&self.alphabet, read)
            )));
        }

        let start = index * self.params.stride;
        let window = self
            .reference
            .window(start, self.params.read_length)
            .ok_or_else(|| invalid(format!("start {} is past the reference end", start)))?;
        let mismatches = window.iter().zip(read).filter(|(a, b)| a != b).count();
        if mismatches > self.params.max_mutations {
            return Err(invalid(format!(
                "{} mismatches against reference at {}, at most {} allowed",
                mismatches, start, self.params.max_mutations
            )));
        }

        self.report.reads += 1;
        self.report.mismatches += mismatches;
        if mismatches > 0 {
            self.report.mutated_reads += 1;
        }
        Ok(mismatches)
    }

    /// Verifies every non-empty line of `rdr` as consecutive reads
    pub fn check_all<R: BufRead>(&mut self, mut rdr: R) -> Result<()> {
        let mut line = Vec::new();
        let mut index = 0;
        while rdr.read_until(b'\n', &mut line)? > 0 {
            let read = trim_line(&line);
            if !read.is_empty() {
                self.check(index, read)?;
                index += 1;
            }
            line.clear();
        }
        Ok(())
    }

    /// Summary of the reads verified so far
    pub fn report(&self) -> &CheckReport {
        &self.report
    }

    /// Consumes the checker, returning the final summary
    pub fn into_report(self) -> CheckReport {
        self.report
    }
}
