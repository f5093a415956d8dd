//! Batch audio normalization command-line tool.
//!
//! Mirrors an input tree of audio files into an output tree of WAV files at
//! a uniform sample rate, trimmed or padded into a duration window.

use audioprep::processor::{self, ProcessorConfig};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "audioprep")]
#[command(about = "Normalize an audio tree to a uniform sample rate and duration", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory scanned recursively for audio files
    input_dir: PathBuf,

    /// Directory receiving the mirrored WAV tree
    output_dir: PathBuf,

    /// Target sample rate in Hz
    #[arg(short = 'r', long, default_value_t = 16_000)]
    sample_rate: u32,

    /// Minimum output duration in seconds (shorter files are zero-padded)
    #[arg(long, default_value_t = 3.0)]
    min_duration: f64,

    /// Maximum output duration in seconds (longer files are clipped)
    #[arg(long, default_value_t = 5.0)]
    max_duration: f64,

    /// Worker thread count (default: available parallelism)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let config = ProcessorConfig {
        target_sample_rate: cli.sample_rate,
        min_duration: cli.min_duration,
        max_duration: cli.max_duration,
    };

    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return ExitCode::from(2);
    }

    let tasks = match processor::collect_tasks(&cli.input_dir, &cli.output_dir, config) {
        Ok(tasks) => tasks,
        Err(e) => {
            eprintln!("Failed to read {}: {}", cli.input_dir.display(), e);
            return ExitCode::from(2);
        }
    };

    println!("audioprep {}", audioprep::VERSION);
    println!("Input:  {}", cli.input_dir.display());
    println!("Output: {}", cli.output_dir.display());
    println!("Target sample rate: {} Hz", config.target_sample_rate);
    println!(
        "Duration window: {:.1}s - {:.1}s",
        config.min_duration, config.max_duration
    );
    println!("Found {} audio files", tasks.len());

    if tasks.is_empty() {
        println!("No audio files found.");
        return ExitCode::SUCCESS;
    }

    if let Err(e) = processor::ensure_output_dirs(&tasks) {
        eprintln!("{}", e);
        return ExitCode::from(2);
    }

    let threads = processor::scheduler::resolve_thread_count(cli.threads, tasks.len());
    info!("Processing with {} threads", threads);

    let report = processor::run(&tasks, cli.threads);

    println!(
        "Processing complete: {} processed, {} failed",
        report.processed, report.failed
    );

    if report.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
