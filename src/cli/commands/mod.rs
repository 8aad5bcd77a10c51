//! Command implementations for the WERA converter CLI
//!
//! Each subcommand lives in its own module:
//! - `convert`: one totals file to one NetCDF file
//! - `batch`: a directory of totals files, converted concurrently
//! - `inspect`: parse a file and report its metadata

pub mod batch;
pub mod convert;
pub mod inspect;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::Result;
use tokio_util::sync::CancellationToken;

/// Dispatch to the subcommand handler
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<()> {
    shared::setup_logging(&args)?;
    let show_progress = args.show_progress();

    match args.command {
        Commands::Convert(convert_args) => convert::run_convert(convert_args).await,
        Commands::Batch(batch_args) => {
            batch::run_batch(batch_args, show_progress, cancellation_token)
                .await
                .map(|_| ())
        }
        Commands::Inspect(inspect_args) => inspect::run_inspect(inspect_args),
    }
}
