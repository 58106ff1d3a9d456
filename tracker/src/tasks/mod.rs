//! Tasks
//! provides the fix source and the loop feeding fixes to the tracker

#[macro_use]
pub mod macros;
pub mod source;
pub mod tracker;

pub use source::{watch_position, watch_source, SourceError, WatchOptions};
pub use tracker::{FixOutcome, Tracker};

use crate::types::PositionFix;
use tokio::sync::{mpsc, oneshot};

/// Capacity of the channel between the fix source and the tracker.
pub const FIX_CHANNEL_CAPACITY: usize = 64;

/// Feeds every fix received on `rx` to `tracker`, one at a time.
///
/// Stops when the fix stream ends or when the shutdown signal fires,
/// and hands the tracker back so the caller can inspect the route.
pub async fn task_loop(
    mut tracker: Tracker,
    mut rx: mpsc::Receiver<PositionFix>,
    shutdown_rx: Option<oneshot::Receiver<()>>,
) -> Tracker {
    tasks_info!("(task_loop) start.");

    let shutdown = crate::shutdown_signal("tracker", shutdown_rx);
    tokio::pin!(shutdown);

    let mut rejected: u64 = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tasks_info!("(task_loop) shutdown requested.");
                break;
            }
            fix = rx.recv() => {
                let Some(fix) = fix else {
                    tasks_info!("(task_loop) fix stream ended.");
                    break;
                };

                if let FixOutcome::Rejected(_) = tracker.handle_fix(fix).await {
                    rejected += 1;
                }
            }
        }
    }

    tasks_info!(
        "(task_loop) done: {} fixes observed, {} rejected, {} route points.",
        tracker.sampler().observed(),
        rejected,
        tracker.route().len()
    );

    tracker
}
