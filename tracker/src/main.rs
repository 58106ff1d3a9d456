//! Location tracker service

use anyhow::Context;
use log::info;
use svc_tracker::tasks::{self, WatchOptions};
use svc_tracker::*;
use tokio::sync::mpsc;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> anyhow::Result<()> {
    // Will use default config settings if no environment vars are found.
    let config =
        Config::try_from_env().context("Failed to load configuration from environment")?;

    info!("(main) Loading config.");

    // Try to load log configuration from the provided log file.
    // Will default to stdout debug logging if the file can not be loaded.
    if let Err(e) = load_logger_config_from_file(config.log_config.as_str()).await {
        log::error!("(main) {}", e);
    }

    info!("(main) Tracker startup.");

    let tracker = Tracker::from_config(&config).context("Failed to create tracker")?;
    let (tx, rx) = mpsc::channel(tasks::FIX_CHANNEL_CAPACITY);

    // Spawn the location watch, don't `await` it
    let options = WatchOptions::from(&config);
    let source = config.fix_source.clone();
    tokio::spawn(async move {
        if let Err(e) = tasks::watch_source(&source, options, tx).await {
            log::error!("(main) location watch stopped: {}", e);
        }
    });

    let tracker = tokio::spawn(tasks::task_loop(tracker, rx, None)).await?;

    info!(
        "(main) tracker shutdown with {} route points.",
        tracker.route().len()
    );

    // Make sure all log message are written/ displayed before shutdown
    log::logger().flush();

    Ok(())
}
