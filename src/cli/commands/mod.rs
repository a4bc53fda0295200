//! CLI command implementations.

pub mod check;
pub mod missing;
pub mod update;

use super::args::RunArgs;
use crate::core::batch::BatchOptions;
use crate::models::config::Config;
use crate::services::douban::DoubanClient;
use crate::services::tmdb::{TmdbClient, TmdbConfig};
use crate::services::CatalogClient;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Build the TMDB + Douban catalog from config and an optional `--token`.
pub fn build_catalog(config: &Config, token: Option<&str>) -> Result<CatalogClient> {
    let token = config
        .tmdb
        .resolve_token(token)
        .ok_or(crate::Error::TmdbTokenMissing)?;
    let tmdb = TmdbClient::new(TmdbConfig::new(&config.tmdb, &token)?)?;
    let douban = DoubanClient::new(&config.douban)?;
    Ok(CatalogClient::new(tmdb, douban, &config.tmdb.language))
}

/// Batch options from config defaults overridden by command line flags.
pub fn batch_options(config: &Config, run: &RunArgs) -> Result<BatchOptions> {
    let seconds = run.sleep.unwrap_or(config.batch.sleep).max(0.0);
    let sleep = Duration::try_from_secs_f64(seconds)
        .map_err(|e| crate::Error::other(format!("Invalid sleep of {} seconds: {}", seconds, e)))?;
    Ok(BatchOptions {
        sleep,
        save_every: config.batch.save_every,
        limit: run.limit,
        offset: run.offset,
        resume: true,
        language: config.tmdb.language.clone(),
        image_base: config.tmdb.image_base.clone(),
    })
}

/// Progress bar for a run over `len` entries.
fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
