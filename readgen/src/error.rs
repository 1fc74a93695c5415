use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while generating or verifying sequences
pub enum Error {
    #[error("Could not read or write sequence data")]
    /// I/O failure on the underlying reader or writer
    Io(#[from] std::io::Error),
    #[error("Stride must be at least 1")]
    /// Zero stride would never advance the read window
    ZeroStride,
    #[error("Read length must be at least 1")]
    /// Zero length reads are not meaningful
    ZeroReadLength,
    #[error("Reference line width must be at least 1")]
    /// Zero width lines cannot hold the reference
    ZeroLineWidth,
    #[error("Mutation rate must be within [0, 1] but got {0}")]
    /// Mutation probability out of range
    InvalidMutationRate(f64),
    #[error("Minimum mutations {0} is larger than maximum mutations {1}")]
    /// Empty mutation count range
    InvalidMutationRange(usize, usize),
    #[error("Only A, G, C and T nucleotides are allowed but got {0}")]
    /// Incorrect nucleotide supplied
    IncorrectNuc(String),
    #[error("Read {index} failed verification: {reason}")]
    /// Read is inconsistent with the reference it was sampled from
    InvalidRead {
        /// Zero based position of the read in the reads file
        index: usize,
        /// Description of the violated property
        reason: String,
    },
    #[error("Seed length must be at least 1")]
    /// Empty seeds would make every reference position a candidate
    ZeroSeedLength,
    #[error("Spaced seed must consist of 0 and 1 with at least one 1 but got {0}")]
    /// Malformed spaced seed pattern
    InvalidSeedPattern(String),
}
