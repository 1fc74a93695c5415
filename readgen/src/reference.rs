use crate::{Result, NUCLEOTIDES};
use log::debug;
use rand::Rng;
use std::io::Write;

/// Random reference sequence reads are sampled from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    seq: Vec<u8>,
}

impl Reference {
    /// Draws `len` bases independently and uniformly from `ACGT`
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        debug!("Drawing {} random bases", len);
        let seq = (0..len)
            .map(|_| NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())])
            .collect();
        Self { seq }
    }

    /// Wraps an existing sequence, see [`crate::load_reference`] for a validating loader
    pub fn from_seq(seq: Vec<u8>) -> Self {
        Self { seq }
    }

    /// Bases of the reference
    pub fn as_bytes(&self) -> &[u8] {
        &self.seq
    }

    /// Number of bases
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// True for a zero length reference
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Window of `len` bases starting at `start`, `None` if it would run past the end
    pub fn window(&self, start: usize, len: usize) -> Option<&[u8]> {
        let end = start.checked_add(len)?;
        self.seq.get(start..end)
    }

    /// Writes the sequence as lines of at most `width` bases, each newline terminated
    pub fn write_wrapped<W: Write>(&self, wtr: &mut W, width: usize) -> Result<()> {
        for line in self.seq.chunks(width.max(1)) {
            wtr.write_all(line)?;
            wtr.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl AsRef<[u8]> for Reference {
    fn as_ref(&self) -> &[u8] {
        &self.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn random_reference_over_acgt() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let reference = Reference::random(10_000, &mut rng);
        assert_eq!(reference.len(), 10_000);
        assert!(reference.as_bytes().iter().all(|b| NUCLEOTIDES.contains(b)));
        for nuc in NUCLEOTIDES.iter() {
            let count = reference.as_bytes().iter().filter(|b| *b == nuc).count();
            assert!(count > 2_000 && count < 3_000, "{} drawn {} times", *nuc as char, count);
        }
    }

    #[test]
    fn same_seed_same_reference() {
        let first = Reference::random(1_000, &mut Xoshiro256StarStar::seed_from_u64(42));
        let second = Reference::random(1_000, &mut Xoshiro256StarStar::seed_from_u64(42));
        let other = Reference::random(1_000, &mut Xoshiro256StarStar::seed_from_u64(43));
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn wrapped_lines() {
        let reference = Reference::from_seq(b"ACGTACGTAC".to_vec());
        let mut out = Vec::new();
        reference.write_wrapped(&mut out, 4).unwrap();
        assert_eq!(out, b"ACGT\nACGT\nAC\n");

        let mut out = Vec::new();
        reference.write_wrapped(&mut out, 5).unwrap();
        assert_eq!(out, b"ACGTA\nCGTAC\n");
    }

    #[test]
    fn wrapped_lines_concatenate_back() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let reference = Reference::random(1_234, &mut rng);
        let mut out = Vec::new();
        reference.write_wrapped(&mut out, 100).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[..12].iter().all(|l| l.len() == 100));
        assert_eq!(lines[12].len(), 34);
        assert_eq!(lines.concat().as_bytes(), reference.as_bytes());
    }

    #[test]
    fn empty_reference_writes_nothing() {
        let mut out = Vec::new();
        Reference::from_seq(Vec::new())
            .write_wrapped(&mut out, 100)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn window_bounds() {
        let reference = Reference::from_seq(b"ACGTACGTAC".to_vec());
        assert_eq!(reference.window(0, 5), Some(&b"ACGTA"[..]));
        assert_eq!(reference.window(5, 5), Some(&b"CGTAC"[..]));
        assert_eq!(reference.window(6, 5), None);
        assert_eq!(reference.window(usize::MAX, 2), None);
    }
}
