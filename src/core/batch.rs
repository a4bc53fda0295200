//! Batch driver.
//!
//! Walks the record store entry by entry:
//! 1. Apply offset/limit and the resume policy
//! 2. Resolve the entry through the cascade
//! 3. Apply the result and count the outcome
//! 4. Save every `save_every` positions and once more at the end
//!
//! Processing is strictly sequential with a sleep between entries to stay
//! under the provider's rate limit. When the shutdown future completes the
//! in-flight entry is abandoned and pending changes are flushed.

use super::diagnostics::DiagnosticLog;
use super::posters::PosterPreferences;
use super::resolver::{Resolution, Resolver};
use super::store::RecordStore;
use super::updater::{ApplyOutcome, EntryUpdater};
use crate::models::entry::Entry;
use crate::services::catalog::Catalog;
use crate::Result;
use colored::Colorize;
use indicatif::ProgressBar;
use std::future::Future;
use std::time::Duration;

/// Knobs for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Pause between processed entries.
    pub sleep: Duration,
    /// Save every N positions; 0 disables periodic saves.
    pub save_every: usize,
    /// Process at most N entries; 0 means no limit.
    pub limit: usize,
    /// Skip the first N entries.
    pub offset: usize,
    /// Skip entries that are already complete.
    pub resume: bool,
    /// Local language for searches and posters.
    pub language: String,
    /// Prefix for poster paths.
    pub image_base: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            sleep: Duration::from_millis(250),
            save_every: 10,
            limit: 0,
            offset: 0,
            resume: true,
            language: "zh-CN".to_string(),
            image_base: "https://image.tmdb.org/t/p/original".to_string(),
        }
    }
}

/// Result of processing one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Skipped,
    Updated,
    Unchanged,
    Unmatched,
    Failed(String),
}

impl EntryOutcome {
    fn from_apply(outcome: ApplyOutcome) -> Self {
        match (outcome.matched, outcome.changed) {
            (true, true) => EntryOutcome::Updated,
            (true, false) => EntryOutcome::Unchanged,
            (false, _) => EntryOutcome::Unmatched,
        }
    }
}

/// Counts for a finished update run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub processed: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub unmatched: usize,
    pub skipped: usize,
    pub failed: usize,
    pub saves: usize,
    pub interrupted: bool,
}

impl BatchSummary {
    fn count(&mut self, outcome: &EntryOutcome) {
        match outcome {
            EntryOutcome::Skipped => self.skipped += 1,
            EntryOutcome::Updated => self.updated += 1,
            EntryOutcome::Unchanged => self.unchanged += 1,
            EntryOutcome::Unmatched => self.unmatched += 1,
            EntryOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Rows produced by a check run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub checked: usize,
    pub rows: Vec<String>,
    pub interrupted: bool,
}

/// Drives the resolver and updater over a record store.
pub struct BatchRunner<'a, C> {
    resolver: Resolver<'a, C>,
    updater: EntryUpdater<'a, C>,
    options: BatchOptions,
    error_log: Option<&'a DiagnosticLog>,
    progress: ProgressBar,
}

impl<'a, C: Catalog> BatchRunner<'a, C> {
    pub fn new(catalog: &'a C, options: BatchOptions) -> Self {
        let resolver = Resolver::new(catalog, &options.language);
        let updater = EntryUpdater::new(
            catalog,
            PosterPreferences::for_language(&options.language),
            &options.image_base,
        );
        Self {
            resolver,
            updater,
            options,
            error_log: None,
            progress: ProgressBar::hidden(),
        }
    }

    /// Write per-entry update errors to `log`.
    pub fn with_error_log(mut self, log: Option<&'a DiagnosticLog>) -> Self {
        self.error_log = log;
        self
    }

    /// Write cascade lookup errors to `log`.
    pub fn with_debug_log(mut self, log: Option<&'a DiagnosticLog>) -> Self {
        self.resolver = self.resolver.with_debug_log(log);
        self
    }

    /// Report progress lines through `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Resolve and apply a single entry.
    pub async fn process_entry(&self, entry: &mut Entry) -> Result<ApplyOutcome> {
        let migrated = self.updater.migrate_legacy_title(entry);
        let (resolution, media_type) = self.resolver.resolve(entry).await;
        let mut outcome = self.updater.apply(entry, &resolution, media_type).await?;
        outcome.changed |= migrated;
        Ok(outcome)
    }

    /// Where `position` (1-based, counting every item) falls relative to offset/limit.
    fn in_window(&self, position: usize, processed: usize) -> Window {
        if self.options.offset > 0 && position <= self.options.offset {
            return Window::Before;
        }
        if self.options.limit > 0 && processed >= self.options.limit {
            return Window::After;
        }
        Window::Inside
    }

    /// Update mode: mutate entries and persist them.
    ///
    /// Store write failures abort the run; everything else is per entry.
    pub async fn run_update<F>(&self, store: &mut RecordStore, shutdown: F) -> Result<BatchSummary>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let total = store.item_count();
        let mut summary = BatchSummary {
            total,
            ..Default::default()
        };
        self.progress.set_length(total as u64);

        for idx in 0..store.len() {
            let position = store.position(idx);
            match self.in_window(position, summary.processed) {
                Window::Before => continue,
                Window::After => break,
                Window::Inside => {}
            }
            self.progress.set_position(position as u64);

            let label = store.entries()[idx].label();
            if self.options.resume && should_skip(&store.entries()[idx]) {
                self.report(position, total, &label, &EntryOutcome::Skipped);
                summary.count(&EntryOutcome::Skipped);
                continue;
            }

            let outcome = tokio::select! {
                result = self.process_entry(&mut store.entries_mut()[idx]) => match result {
                    Ok(applied) => EntryOutcome::from_apply(applied),
                    Err(e) => EntryOutcome::Failed(e.to_string()),
                },
                _ = &mut shutdown => {
                    summary.interrupted = true;
                    break;
                }
            };

            self.report(position, total, &label, &outcome);
            if let (EntryOutcome::Failed(reason), Some(log)) = (&outcome, self.error_log) {
                log.record(&format!("[{}] {}\t{}", position, label, reason));
            }
            summary.count(&outcome);
            summary.processed += 1;

            if self.options.save_every > 0
                && position % self.options.save_every == 0
                && store.is_dirty()
            {
                store.save()?;
                summary.saves += 1;
            }

            if !self.options.sleep.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(self.options.sleep) => {}
                    _ = &mut shutdown => {
                        summary.interrupted = true;
                        break;
                    }
                }
            }
        }

        if summary.interrupted {
            self.say(format!("{}", "Interrupted. Saving progress...".yellow()));
        }
        if store.is_dirty() {
            store.save()?;
            summary.saves += 1;
        }
        self.progress.finish_and_clear();

        Ok(summary)
    }

    /// Check mode: resolve only and report disagreements with stored IDs.
    pub async fn run_check<F>(&self, store: &RecordStore, shutdown: F) -> CheckReport
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let total = store.item_count();
        let expected = if self.options.limit > 0 {
            self.options.limit
        } else {
            total
        };
        let mut report = CheckReport::default();

        for (idx, entry) in store.entries().iter().enumerate() {
            let position = store.position(idx);
            match self.in_window(position, report.checked) {
                Window::Before => continue,
                Window::After => break,
                Window::Inside => {}
            }

            let resolution = tokio::select! {
                (resolution, _) = self.resolver.resolve(entry) => resolution,
                _ = &mut shutdown => {
                    report.interrupted = true;
                    break;
                }
            };
            if let Some(row) = check_row(position, entry, &resolution) {
                report.rows.push(row);
            }

            report.checked += 1;
            if !self.options.sleep.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(self.options.sleep) => {}
                    _ = &mut shutdown => {
                        report.interrupted = true;
                        break;
                    }
                }
            }

            if report.checked % 10 == 0 {
                self.say(format!("Checked {}/{}...", report.checked, expected));
            }
        }

        report
    }

    fn report(&self, position: usize, total: usize, label: &str, outcome: &EntryOutcome) {
        let status = match outcome {
            EntryOutcome::Skipped => "Skipped".dimmed().to_string(),
            EntryOutcome::Updated => "Updated".green().to_string(),
            EntryOutcome::Unchanged => "No change".normal().to_string(),
            EntryOutcome::Unmatched => "No match".yellow().to_string(),
            EntryOutcome::Failed(_) => "Error".red().to_string(),
        };
        let line = match outcome {
            EntryOutcome::Failed(reason) => {
                format!("[{}/{}] {}: {} -> {}", position, total, status, label, reason)
            }
            _ => format!("[{}/{}] {}: {}", position, total, status, label),
        };
        self.say(line);
    }

    /// Print above the progress bar, or plainly when there is none.
    fn say(&self, line: String) {
        if self.progress.is_hidden() {
            println!("{}", line);
        } else {
            self.progress.println(line);
        }
    }
}

enum Window {
    Before,
    Inside,
    After,
}

/// Resume policy: entries with every enrichment field present are skipped.
pub fn should_skip(entry: &Entry) -> bool {
    entry.is_complete()
}

/// Check-mode row for an entry, if its stored ID disagrees with the resolution.
pub fn check_row(position: usize, entry: &Entry, resolution: &Resolution) -> Option<String> {
    let existing = entry.tmdb_id?;
    let label = entry.label();
    match resolution.tmdb_id() {
        Some(found) if found != existing => Some(format!(
            "[{}] MISMATCH\t{}\t{}\t{}",
            position, label, existing, found
        )),
        Some(_) => None,
        None => Some(format!("[{}] NO_MATCH\t{}\t{}\t", position, label, existing)),
    }
}
