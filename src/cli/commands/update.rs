//! Update command implementation.
//!
//! Resolves every entry, writes TMDB data back and saves the record file
//! periodically and on exit (including Ctrl-C).

use super::{batch_options, progress_bar, shutdown_signal};
use crate::cli::args::RunArgs;
use crate::core::batch::{BatchRunner, BatchSummary};
use crate::core::diagnostics::DiagnosticLog;
use crate::core::store::RecordStore;
use crate::models::config::Config;
use crate::services::CatalogClient;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Execute the update command.
pub async fn update(
    config: &Config,
    catalog: &CatalogClient,
    run: &RunArgs,
    save_every: Option<usize>,
    no_resume: bool,
    error_log: &Path,
) -> Result<BatchSummary> {
    println!("{}", "🎬 Updating TMDB data...".bold().cyan());
    println!("  {} {}", "File:".bold(), run.file.display());
    println!();

    // Logs start empty for every update run
    let error_log = DiagnosticLog::create(error_log, false)?;
    let debug_log = if run.debug_match {
        Some(DiagnosticLog::create(&run.debug_log, false)?)
    } else {
        None
    };

    let mut store = RecordStore::load(&run.file)?;

    let mut options = batch_options(config, run)?;
    if let Some(n) = save_every {
        options.save_every = n;
    }
    options.resume = !no_resume;

    let runner = BatchRunner::new(catalog, options)
        .with_error_log(Some(&error_log))
        .with_debug_log(debug_log.as_ref())
        .with_progress(progress_bar(store.item_count()));

    let summary = runner.run_update(&mut store, shutdown_signal()).await?;

    println!();
    println!("{}", "📋 Update Summary".bold().green());
    println!("  {} {}", "Updated:".bold(), summary.updated);
    println!("  {} {}", "No change:".bold(), summary.unchanged);
    println!("  {} {}", "No match:".bold(), summary.unmatched);
    println!("  {} {}", "Skipped:".bold(), summary.skipped);
    if summary.failed > 0 {
        println!(
            "  {} {} (see {})",
            "Errors:".bold().red(),
            summary.failed,
            error_log.path().display()
        );
    }
    println!();
    println!("Done. Updated {}/{} items.", summary.updated, summary.total);

    Ok(summary)
}
