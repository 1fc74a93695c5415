use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors of which majority are related to I/O issues or inconsistent output files
pub enum Error {
    #[error("Could not generate or verify sequences")]
    /// Generation or verification failure
    Sim(#[from] readgen::Error),
    #[error("Could not create output file {}", .0.display())]
    /// Output file could not be created
    CreateFile(PathBuf, #[source] std::io::Error),
    #[error("Could not write to {}", .0.display())]
    /// Writing or flushing an output file failed
    WriteFile(PathBuf, #[source] readgen::Error),
    #[error("Could not open input file {}", .0.display())]
    /// Input file missing or with unreadable compression
    OpenFile(PathBuf, #[source] niffler::Error),
    #[error("Reads file holds {0} reads but {1} were expected")]
    /// Reads file ends before every read that fits the reference
    MissingReads(usize, usize),
}
