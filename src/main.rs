#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]

//! Generator of synthetic sequencing test data: a random reference and overlapping, lightly
//! mutated reads cut from it at a fixed stride.  Generated files can be verified against each
//! other and reads placed back onto the reference.
mod cli;
mod error;

use crate::cli::{Command, Sampling};
use crate::error::Error;
use log::{debug, info};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use readgen::{
    write_read, BruteForce, Locate, ReadChecker, ReadSampler, Reference, SeedIndex, SimParams,
    SpacedSeed,
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use structopt::StructOpt;

/// Reads between progress messages
pub const PROGRESS_INTERVAL: usize = 1_000_000;

type Result<T> = std::result::Result<T, crate::error::Error>;

fn main() -> Result<()> {
    let opt = cli::ReadSim::from_args();
    opt.set_logging();

    match opt.cmd {
        Command::Generate {
            sampling,
            reference_length,
            min_mutations,
            mutation_rate,
            line_width,
            seed,
            reference_out,
            reads_out,
        } => {
            let params = SimParams {
                reference_length,
                min_mutations,
                mutation_rate,
                line_width,
                ..sampling.params()
            };
            generate(&params, seed, &reference_out, &reads_out)
        }
        Command::Check {
            sampling,
            reference,
            reads,
        } => check(&sampling, &reference, &reads),
        Command::Locate {
            max_errors,
            seed_length,
            spaced_seed,
            brute_force,
            reference,
            reads,
        } => {
            let spaced_seed = SpacedSeed::parse(&spaced_seed)?;
            locate(
                &reference,
                &reads,
                max_errors,
                seed_length,
                spaced_seed,
                brute_force,
            )
        }
    }
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| Error::CreateFile(path.to_path_buf(), e))?;
    Ok(BufWriter::new(file))
}

fn open_input(path: &Path) -> Result<BufReader<Box<dyn std::io::Read>>> {
    let (rdr, format) =
        niffler::from_path(path).map_err(|e| Error::OpenFile(path.to_path_buf(), e))?;
    debug!("Opened {} as {:?}", path.display(), format);
    Ok(BufReader::new(rdr))
}

fn write_error(path: &Path) -> impl Fn(readgen::Error) -> Error + '_ {
    move |e| Error::WriteFile(path.to_path_buf(), e)
}

fn generate(
    params: &SimParams,
    seed: Option<u64>,
    reference_out: &Path,
    reads_out: &Path,
) -> Result<()> {
    params.validate()?;
    info!("Generating with {:?}", params);

    let seed = seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    let reference = Reference::random(params.reference_length, &mut rng);
    let mut wtr = create_output(reference_out)?;
    reference
        .write_wrapped(&mut wtr, params.line_width)
        .map_err(write_error(reference_out))?;
    wtr.flush()
        .map_err(|e| write_error(reference_out)(e.into()))?;
    info!(
        "Wrote {} bases to {}",
        reference.len(),
        reference_out.display()
    );

    let mut wtr = create_output(reads_out)?;
    let (mut reads, mut mutated) = (0usize, 0usize);
    for read in ReadSampler::new(&reference, params, &mut rng)? {
        write_read(&mut wtr, &read).map_err(write_error(reads_out))?;
        reads += 1;
        if read.is_mutated() {
            mutated += 1;
        }
        if reads % PROGRESS_INTERVAL == 0 {
            debug!("{} reads written", reads);
        }
    }
    wtr.flush().map_err(|e| write_error(reads_out)(e.into()))?;
    info!(
        "Wrote {} reads ({} mutated) to {}",
        reads,
        mutated,
        reads_out.display()
    );
    Ok(())
}

fn check(sampling: &Sampling, reference_path: &Path, reads_path: &Path) -> Result<()> {
    info!("Loading reference {}", reference_path.display());
    let reference = readgen::load_reference(open_input(reference_path)?)?;

    let mut checker = ReadChecker::new(&reference, &sampling.params())?;
    info!("Verifying reads {}", reads_path.display());
    checker.check_all(open_input(reads_path)?)?;

    let report = checker.into_report();
    println!("{}", report);
    if report.is_complete() {
        Ok(())
    } else {
        Err(Error::MissingReads(report.reads, report.expected_reads))
    }
}

fn locate(
    reference_path: &Path,
    reads_path: &Path,
    max_errors: usize,
    seed_length: usize,
    spaced_seed: SpacedSeed,
    brute_force: bool,
) -> Result<()> {
    info!("Loading reference {}", reference_path.display());
    let reference = readgen::load_reference(open_input(reference_path)?)?;

    let locator: Box<dyn Locate + '_> = if brute_force {
        Box::new(BruteForce::new(&reference, max_errors))
    } else {
        Box::new(SeedIndex::new(
            &reference,
            seed_length,
            spaced_seed,
            max_errors,
        )?)
    };

    info!("Placing reads {}", reads_path.display());
    let stdout = std::io::stdout();
    let mut wtr = BufWriter::new(stdout.lock());
    let summary =
        readgen::locate::locate_all(locator.as_ref(), open_input(reads_path)?, &mut wtr)?;
    wtr.flush().map_err(readgen::Error::from)?;
    info!(
        "Placed {} of {} reads with {} mismatches in total",
        summary.placed, summary.reads, summary.mismatches
    );
    Ok(())
}
