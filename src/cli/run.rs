//! Handler for the `run` command.

use tracing::info;

use crate::application::{CycleReport, CycleStats};
use crate::cli::RunArgs;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::{build_cycle, build_destination, build_notifier};

/// Execute one cycle.
///
/// Configuration problems, including a missing bot token, are returned
/// before anything is fetched. Everything after that is recovered inside
/// the cycle.
pub async fn execute(args: &RunArgs) -> Result<CycleReport> {
    let mut config = Config::load_or_default(&args.config)?;

    if args.dry_run {
        config.dry_run = true;
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }

    config.init_logging();

    let notifier = build_notifier(&config)?;
    let destination = build_destination(&config)?;
    let cycle = build_cycle(&config, notifier, destination)?;

    info!(
        search_url = %config.source.search_url,
        dry_run = config.dry_run,
        "lotwatch starting"
    );

    let mut pacer = config.delivery.pacer();
    let report = cycle.run(&mut pacer).await;

    match &report {
        CycleReport::Completed {
            stats: CycleStats { sent, failed, .. },
            ..
        } => info!(sent, failed, "lotwatch finished"),
        CycleReport::SourceFailed { error, .. } => {
            info!(error = %error, "lotwatch finished without listings");
        }
        CycleReport::Skipped { reason } => info!(reason = %reason, "lotwatch skipped this run"),
    }

    Ok(report)
}
