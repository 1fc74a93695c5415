#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]

//! Crate for generating synthetic sequencing test data.  A random reference over `ACGT` is
//! drawn first and reads of fixed length are then cut from it at a fixed stride.  A fraction of
//! the reads carries one or two substitutions to mimic sequencing errors.
//!
//! All randomness comes from a caller supplied [`rand::Rng`], so a seeded generator reproduces
//! the same reference and reads byte for byte.
//!
//! Reads can be placed back onto the reference with the strategies in [`locate`].

pub mod check;
mod error;
pub mod locate;
mod params;
mod reads;
mod reference;

pub use crate::check::{load_reference, CheckReport, ReadChecker};
pub use crate::error::Error;
pub use crate::locate::{BruteForce, Hit, Locate, SeedIndex, SpacedSeed};
pub use crate::params::SimParams;
pub use crate::reads::{mutate, write_read, Mutation, Read, ReadSampler};
pub use crate::reference::Reference;

/// Nucleotide alphabet used
pub const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Default reference length
pub const DEFAULT_REFERENCE_LENGTH: usize = 100_000_000;
/// Default number of reads to attempt
pub const DEFAULT_READ_COUNT: usize = 20_000_000;
/// Default read length
pub const DEFAULT_READ_LENGTH: usize = 50;
/// Default offset between consecutive read starts
pub const DEFAULT_STRIDE: usize = 5;
/// Default probability of a read being mutated
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;
/// Default smallest number of substitutions in a mutated read
pub const DEFAULT_MIN_MUTATIONS: usize = 1;
/// Default largest number of substitutions in a mutated read
pub const DEFAULT_MAX_MUTATIONS: usize = 2;
/// Default number of bases per line in the reference file
pub const DEFAULT_LINE_WIDTH: usize = 100;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
