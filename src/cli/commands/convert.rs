//! Single-file conversion command

use super::shared::format_duration_ms;
use crate::cli::args::ConvertArgs;
use crate::processor::{ExportSummary, TotalsConverter};

use anyhow::{Context, Result};
use colored::*;
use tokio::task;

/// Convert one totals file
pub async fn run_convert(args: ConvertArgs) -> Result<()> {
    let config = args.options.to_config();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.default_output_path(&args.input, None));
    let grid = args.options.grid_source();
    let converter = TotalsConverter::new(config).context("Invalid conversion options")?;

    let input = args.input.clone();
    let output_for_task = output.clone();
    let summary = task::spawn_blocking(move || converter.convert(&input, &output_for_task, &grid))
        .await
        .context("Conversion task failed")?
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    print_summary(&args, &summary);
    Ok(())
}

fn print_summary(args: &ConvertArgs, summary: &ExportSummary) {
    println!(
        "{} {} {} {}",
        "Converted".bright_green().bold(),
        args.input.display(),
        "->".bright_cyan(),
        summary.output.display()
    );
    println!(
        "  {} {} reports, {} of {} cells",
        "Data:".bright_cyan(),
        summary.reports.to_string().bright_white().bold(),
        summary.reported_cells,
        summary.size_x * summary.size_y
    );
    println!(
        "  {} {}",
        "Grid:".bright_cyan(),
        if summary.rectilinear {
            "rectilinear (grid file)"
        } else {
            "curvilinear (geodesic)"
        }
    );
    println!(
        "  {} {}",
        "Time:".bright_cyan(),
        format_duration_ms(summary.processing_time_ms)
    );
}
