//! Watched Enricher CLI
//!
//! Adds TMDB IDs, English titles and posters to a watched-list YAML file.

use clap::Parser;
use watched_enricher::cli::{
    args::{Cli, Commands},
    commands::{self, check, missing, update},
};
use watched_enricher::models::config::load_config;
use watched_enricher::preflight;
use watched_enricher::services::CatalogClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = load_config();

    match cli.command {
        Commands::Update {
            run,
            save_every,
            no_resume,
            error_log,
        } => {
            let catalog = commands::build_catalog(&config, run.token.as_deref())?;
            if !cli.skip_preflight {
                run_preflight_checks(&catalog).await?;
            }
            update::update(&config, &catalog, &run, save_every, no_resume, &error_log).await?;
        }

        Commands::Check {
            run,
            check_output,
            check_append,
        } => {
            let catalog = commands::build_catalog(&config, run.token.as_deref())?;
            if !cli.skip_preflight {
                run_preflight_checks(&catalog).await?;
            }
            check::check(&config, &catalog, &run, &check_output, check_append).await?;
        }

        Commands::Missing { file, output } => {
            missing::missing(&file, &output)?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("watched_enricher=debug")
    } else {
        EnvFilter::new("watched_enricher=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(catalog: &CatalogClient) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(catalog.tmdb()).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
