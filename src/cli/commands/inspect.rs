//! Inspect command: parse a totals file and report what it contains

use crate::cli::args::InspectArgs;
use crate::config::ConversionConfig;
use crate::models::{ParsedTotals, TotalsMetadata};
use crate::processor::TotalsConverter;

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::path::Path;

pub fn run_inspect(args: InspectArgs) -> Result<()> {
    let converter = TotalsConverter::new(ConversionConfig::default().with_dialect(args.dialect))?;
    let totals = converter
        .inspect(&args.input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    if args.json {
        let report = InspectReport::new(&args.input, &totals);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args, &totals);
    }
    Ok(())
}

fn print_report(args: &InspectArgs, totals: &ParsedTotals) {
    println!("{} {}", "File:".bright_cyan(), args.input.display());
    println!(
        "  {} {}",
        "Stations reporting:".bright_cyan(),
        totals.declared_stations
    );

    let Some(meta) = &totals.metadata else {
        println!("  {}", "No stations reporting, nothing to convert".yellow());
        return;
    };

    println!("  {} {}", "Dialect:".bright_cyan(), meta.dialect);
    println!(
        "  {} {}",
        "Origin time:".bright_cyan(),
        meta.origin_time.format("%Y-%m-%dT%H:%M:%SZ")
    );
    println!(
        "  {} ({}, {})",
        "Origin lon/lat:".bright_cyan(),
        meta.grid.origin_x,
        meta.grid.origin_y
    );
    println!(
        "  {} {} x {} at {} m",
        "Grid:".bright_cyan(),
        meta.grid.size_x,
        meta.grid.size_y,
        meta.grid.grid_spacing
    );
    println!(
        "  {} {}",
        "Reports:".bright_cyan(),
        totals.reports.len().to_string().bright_white().bold()
    );

    if totals.is_valid() {
        println!("  {}", "Valid for export".bright_green());
    } else {
        println!("  {}", "No report rows, nothing to convert".yellow());
    }
}

/// Parsed metadata without the report rows
#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    input: &'a Path,
    declared_stations: i64,
    metadata: Option<&'a TotalsMetadata>,
    reports: usize,
    valid: bool,
}

impl<'a> InspectReport<'a> {
    fn new(input: &'a Path, totals: &'a ParsedTotals) -> Self {
        Self {
            input,
            declared_stations: totals.declared_stations,
            metadata: totals.metadata.as_ref(),
            reports: totals.reports.len(),
            valid: totals.is_valid(),
        }
    }
}
