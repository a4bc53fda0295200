//! Check command implementation.
//!
//! Dry run: resolves entries without touching the record file and reports
//! stored TMDB IDs that disagree with the current resolution.

use super::{batch_options, progress_bar, shutdown_signal};
use crate::cli::args::RunArgs;
use crate::core::batch::{BatchRunner, CheckReport};
use crate::core::diagnostics::DiagnosticLog;
use crate::core::store::RecordStore;
use crate::models::config::Config;
use crate::services::CatalogClient;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Execute the check command.
pub async fn check(
    config: &Config,
    catalog: &CatalogClient,
    run: &RunArgs,
    check_output: &Path,
    check_append: bool,
) -> Result<CheckReport> {
    println!("{}", "🔍 Checking TMDB matches...".bold().cyan());
    println!("  {} {}", "File:".bold(), run.file.display());
    println!();

    let debug_log = if run.debug_match {
        Some(DiagnosticLog::create(&run.debug_log, false)?)
    } else {
        None
    };

    let options = batch_options(config, run)?;
    let store = RecordStore::load(&run.file)?;

    let progress = progress_bar(store.item_count());
    progress.set_message("checking");
    let runner = BatchRunner::new(catalog, options)
        .with_debug_log(debug_log.as_ref())
        .with_progress(progress.clone());

    let report = runner.run_check(&store, shutdown_signal()).await;
    progress.finish_and_clear();

    let output = DiagnosticLog::create(check_output, check_append)?;
    output.append_all(&report.rows)?;

    if report.interrupted {
        println!("{}", "Interrupted. Writing partial results...".yellow());
    }
    println!(
        "Check complete. Mismatches: {} -> {}",
        report.rows.len(),
        check_output.display()
    );

    Ok(report)
}
