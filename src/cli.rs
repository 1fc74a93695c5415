use log::LevelFilter;
use readgen::SimParams;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "readsim",
    about = "Generates a random reference and overlapping reads sampled from it"
)]
pub(crate) struct ReadSim {
    #[structopt(
        short,
        long,
        parse(from_occurrences),
        help = "Logging verbosity, repeat for more (-v info, -vv debug, -vvv trace)"
    )]
    pub(crate) verbose: u8,
    #[structopt(subcommand)]
    pub(crate) cmd: Command,
}

#[derive(Debug, StructOpt)]
pub(crate) enum Command {
    /// Write a random reference and the reads sampled from it
    Generate {
        #[structopt(flatten)]
        sampling: Sampling,
        #[structopt(
            short = "n",
            long,
            help = "Length of the random reference",
            default_value = "100000000"
        )]
        reference_length: usize,
        #[structopt(
            long,
            help = "Smallest number of substitutions in a mutated read",
            default_value = "1"
        )]
        min_mutations: usize,
        #[structopt(
            short = "p",
            long,
            help = "Probability of a read carrying substitutions",
            default_value = "0.1"
        )]
        mutation_rate: f64,
        #[structopt(
            short = "w",
            long,
            help = "Bases per line in the reference file",
            default_value = "100"
        )]
        line_width: usize,
        #[structopt(long, help = "Seed for the random generator, drawn at random if absent")]
        seed: Option<u64>,
        #[structopt(
            long,
            help = "Reference output file",
            default_value = "reference_10.txt",
            parse(from_os_str)
        )]
        reference_out: PathBuf,
        #[structopt(
            long,
            help = "Reads output file",
            default_value = "reads_20.txt",
            parse(from_os_str)
        )]
        reads_out: PathBuf,
    },
    /// Verify a reference and reads file against each other
    Check {
        #[structopt(flatten)]
        sampling: Sampling,
        #[structopt(help = "Reference file, optionally gzip compressed", parse(from_os_str))]
        reference: PathBuf,
        #[structopt(help = "Reads file, optionally gzip compressed", parse(from_os_str))]
        reads: PathBuf,
    },
    /// Place every read at the reference position with the fewest mismatches
    Locate {
        #[structopt(
            short = "e",
            long,
            help = "Largest number of mismatches for a read to be placed",
            default_value = "10"
        )]
        max_errors: usize,
        #[structopt(
            long,
            help = "Length of the exact read prefix looked up in the suffix array",
            default_value = "10"
        )]
        seed_length: usize,
        #[structopt(
            long,
            help = "Spaced seed filtering candidates, 1 marks compared positions",
            default_value = "1101101"
        )]
        spaced_seed: String,
        #[structopt(
            long,
            help = "Compare every read against every reference position instead of using seeds"
        )]
        brute_force: bool,
        #[structopt(help = "Reference file, optionally gzip compressed", parse(from_os_str))]
        reference: PathBuf,
        #[structopt(help = "Reads file, optionally gzip compressed", parse(from_os_str))]
        reads: PathBuf,
    },
}

/// Options shared between generating reads and verifying them
#[derive(Debug, StructOpt)]
pub(crate) struct Sampling {
    #[structopt(
        short = "m",
        long = "reads",
        help = "Number of reads to attempt",
        default_value = "20000000"
    )]
    pub(crate) read_count: usize,
    #[structopt(short = "l", long, help = "Length of every read", default_value = "50")]
    pub(crate) read_length: usize,
    #[structopt(
        short,
        long,
        help = "Offset between consecutive read starts",
        default_value = "5"
    )]
    pub(crate) stride: usize,
    #[structopt(
        long,
        help = "Largest number of substitutions in a mutated read",
        default_value = "2"
    )]
    pub(crate) max_mutations: usize,
}

impl Sampling {
    pub(crate) fn params(&self) -> SimParams {
        SimParams {
            read_count: self.read_count,
            read_length: self.read_length,
            stride: self.stride,
            max_mutations: self.max_mutations,
            ..Default::default()
        }
    }
}

impl ReadSim {
    pub(crate) fn set_logging(&self) {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        env_logger::Builder::new().filter_level(level).init();
    }
}
