//! LFU page replacement simulator
//!
//! Replays a page reference string through an LFU cache and prints one
//! table row per reference.

use anyhow::{Context, Result};
use clap::Parser;
use lfu_simulator::error::SimulationError;
use lfu_simulator::runner::Simulation;
use lfu_simulator::{input, report, Page};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// LFU page replacement simulator CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of frames (cache capacity)
    #[arg(short, long, default_value = "3")]
    capacity: usize,

    /// Maximum number of references to simulate
    #[arg(short, long, default_value = "15")]
    max_numbers: usize,

    /// Space separated page references; read from stdin when omitted
    #[arg(short, long, value_name = "LIST", allow_hyphen_values = true)]
    numbers: Option<String>,

    /// Generate COUNT random references instead of reading input
    #[arg(long, value_name = "COUNT", conflicts_with = "numbers")]
    random: Option<usize>,

    /// Highest page number for --random
    #[arg(long, default_value = "9")]
    max_page: Page,

    /// Seed for --random
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Export every step to a CSV file
    #[arg(long, value_name = "PATH")]
    output_csv: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging on stderr so the table on stdout stays clean
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let references = read_references(&args)?;
    let references = input::truncate_references(references, args.max_numbers);
    if references.is_empty() {
        return Err(SimulationError::EmptyInput.into());
    }

    info!(
        capacity = args.capacity,
        references = references.len(),
        "starting simulation"
    );

    let mut simulation = Simulation::new(args.capacity);
    let records = simulation.run(&references);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_header(&mut out)?;
    for record in &records {
        report::write_step(&mut out, record)?;
    }
    report::write_final_table(&mut out, &simulation.cache().frequency_table())?;
    report::write_summary(&mut out, simulation.cache().metrics())?;
    out.flush().context("Failed to flush output")?;

    if let Some(csv_path) = args.output_csv {
        report::export_csv(&csv_path, &records)
            .with_context(|| format!("Failed to export CSV to {}", csv_path.display()))?;
        info!("Results exported to: {}", csv_path.display());
    }

    Ok(())
}

/// Collect references from --random, --numbers, or a stdin prompt.
fn read_references(args: &Args) -> Result<Vec<Page>> {
    if let Some(count) = args.random {
        return input::random_references(count, args.max_page, args.seed)
            .context("Failed to generate random references");
    }

    let line = match &args.numbers {
        Some(numbers) => numbers.clone(),
        None => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            input::prompt_line(&mut stdin.lock(), &mut stdout, args.max_numbers)
                .context("Failed to read page references")?
        }
    };

    let parsed = input::parse_references(&line);
    for token in &parsed.rejected {
        println!("{}", SimulationError::InvalidNumber(token.clone()));
    }
    Ok(parsed.references)
}
