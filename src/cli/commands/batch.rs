//! Batch conversion command
//!
//! Converts every matching file in a directory. Each file is an independent
//! job on a blocking worker, with at most `workers` jobs in flight. Inputs
//! that would write the same output path fail instead of racing.

use super::shared::{create_progress_bar, format_duration_ms};
use crate::cli::args::BatchArgs;
use crate::grid::GridSource;
use crate::models::ConversionStats;
use crate::processor::TotalsConverter;
use crate::processor::discovery::InputDiscovery;

use anyhow::{Context, Result};
use colored::*;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result of one job in a batch
#[derive(Debug)]
enum JobOutcome {
    Converted { reports: usize },
    Skipped { reason: String },
    Failed { error: String },
    Cancelled,
}

/// Run the batch command and print a summary
pub async fn run_batch(
    args: BatchArgs,
    show_progress: bool,
    cancellation_token: CancellationToken,
) -> Result<ConversionStats> {
    let config = args.to_config();
    let discovery = InputDiscovery::new(&args.pattern, args.recursive)?;
    let files = discovery
        .discover(&args.input_dir)
        .with_context(|| format!("Failed to list {}", args.input_dir.display()))?;

    if let Some(dir) = &args.output_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    println!(
        "{} {} files matching '{}' in {}",
        "Found".bright_green(),
        files.len().to_string().bright_white().bold(),
        args.pattern,
        args.input_dir.display()
    );

    let converter = Arc::new(TotalsConverter::new(config).context("Invalid conversion options")?);
    let stats = convert_files(
        converter,
        files,
        args.output_dir.clone(),
        args.options.grid_source(),
        show_progress,
        cancellation_token,
    )
    .await;

    print_summary(&stats);
    Ok(stats)
}

/// Convert `files` concurrently and collect statistics
pub async fn convert_files(
    converter: Arc<TotalsConverter>,
    files: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    grid: GridSource,
    show_progress: bool,
    cancellation_token: CancellationToken,
) -> ConversionStats {
    let start = Instant::now();
    let workers = converter.config().workers;
    debug!("Converting {} files with {} workers", files.len(), workers);

    let jobs = plan_outputs(&converter, files, output_dir.as_deref());
    let grid = Arc::new(grid);
    let progress = (show_progress && !jobs.is_empty())
        .then(|| create_progress_bar(jobs.len() as u64, "Converting WERA totals"));

    let outcomes: Vec<(PathBuf, JobOutcome)> = stream::iter(jobs)
        .map(|(input, output)| {
            let converter = converter.clone();
            let grid = grid.clone();
            let token = cancellation_token.clone();
            let progress = progress.clone();
            async move {
                let outcome = match output {
                    Err(error) => JobOutcome::Failed { error },
                    Ok(_) if token.is_cancelled() => JobOutcome::Cancelled,
                    Ok(output) => run_job(converter, input.clone(), output, grid).await,
                };
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                (input, outcome)
            }
        })
        .buffer_unordered(workers)
        .collect()
        .await;

    if let Some(pb) = progress {
        pb.finish_with_message("Done");
    }

    let mut stats = ConversionStats::default();
    for (input, outcome) in outcomes {
        match outcome {
            JobOutcome::Converted { reports } => {
                stats.files_converted += 1;
                stats.total_reports += reports;
            }
            JobOutcome::Skipped { reason } => {
                warn!("Skipped {}: {}", input.display(), reason);
                stats.files_skipped += 1;
            }
            JobOutcome::Failed { error } => {
                warn!("Failed {}: {}", input.display(), error);
                stats.files_failed += 1;
                stats.failures.push((input, error));
            }
            JobOutcome::Cancelled => {
                stats.files_failed += 1;
                stats.failures.push((input, "cancelled".to_string()));
            }
        }
    }
    stats.failures.sort();
    stats.processing_time_ms = start.elapsed().as_millis();
    stats
}

/// Output path for each input
///
/// The first input to claim an output path keeps it; later inputs mapping
/// to the same path get an error instead.
fn plan_outputs(
    converter: &TotalsConverter,
    files: Vec<PathBuf>,
    output_dir: Option<&Path>,
) -> Vec<(PathBuf, std::result::Result<PathBuf, String>)> {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    files
        .into_iter()
        .map(|input| {
            let output = converter.config().default_output_path(&input, output_dir);
            let planned = match claimed.get(&output) {
                Some(first) => Err(format!(
                    "output {} is already written by {}",
                    output.display(),
                    first.display()
                )),
                None => {
                    claimed.insert(output.clone(), input.clone());
                    Ok(output)
                }
            };
            (input, planned)
        })
        .collect()
}

async fn run_job(
    converter: Arc<TotalsConverter>,
    input: PathBuf,
    output: PathBuf,
    grid: Arc<GridSource>,
) -> JobOutcome {
    let result = task::spawn_blocking(move || converter.convert(&input, &output, &grid)).await;
    match result {
        Ok(Ok(summary)) => JobOutcome::Converted {
            reports: summary.reports,
        },
        Ok(Err(e)) if e.is_empty_input() => JobOutcome::Skipped {
            reason: e.to_string(),
        },
        Ok(Err(e)) => JobOutcome::Failed {
            error: e.to_string(),
        },
        Err(join_error) => JobOutcome::Failed {
            error: format!("conversion task failed: {}", join_error),
        },
    }
}

fn print_summary(stats: &ConversionStats) {
    println!("\n{}", "Batch conversion complete".bright_green().bold());
    println!(
        "  {} {}",
        "Converted:".bright_cyan(),
        stats.files_converted.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Skipped (no data):".bright_cyan(),
        stats.files_skipped
    );
    let failed = stats.files_failed.to_string();
    println!(
        "  {} {}",
        "Failed:".bright_cyan(),
        if stats.files_failed > 0 {
            failed.bright_red().bold()
        } else {
            failed.normal()
        }
    );
    println!("  {} {}", "Reports:".bright_cyan(), stats.total_reports);
    println!(
        "  {} {}",
        "Time:".bright_cyan(),
        format_duration_ms(stats.processing_time_ms)
    );

    for (path, error) in &stats.failures {
        println!("  {} {}: {}", "x".bright_red(), display_name(path), error);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
