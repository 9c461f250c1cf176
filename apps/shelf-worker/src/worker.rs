use std::{future::Future, time::Duration};

use tokio::time::{self as tokio_time, MissedTickBehavior};

use shelf_service::{ShelfService, SyncOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
	pub interval: Duration,
	pub run_on_start: bool,
}
impl Schedule {
	pub fn from_config(cfg: &shelf_config::Sync) -> Self {
		Self { interval: Duration::from_secs(cfg.interval_secs), run_on_start: cfg.run_on_start }
	}
}

/// Runs the sync job on a fixed interval until `shutdown` resolves.
///
/// A run that outlasts the interval swallows the ticks it missed instead of queueing them. A
/// failed run is logged and retried on the next tick. Shutdown is only observed between runs.
/// Returns the number of runs started.
pub async fn run_worker<F>(service: &ShelfService, schedule: Schedule, shutdown: F) -> usize
where
	F: Future<Output = ()>,
{
	let mut ticker = tokio_time::interval(schedule.interval);
	let mut runs = 0;

	ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

	if !schedule.run_on_start {
		ticker.tick().await;
	}

	tokio::pin!(shutdown);

	tracing::info!(interval_secs = schedule.interval.as_secs(), "Sync worker started.");

	loop {
		tokio::select! {
			_ = &mut shutdown => break,
			_ = ticker.tick() => {},
		}

		runs += 1;

		match service.sync().await {
			Ok(SyncOutcome::Completed(report)) => {
				tracing::debug!(run_id = %report.run_id, "Scheduled sync completed.");
			},
			Ok(SyncOutcome::Skipped) => {},
			Err(err) => {
				tracing::error!(error = %err, "Scheduled sync failed.");
			},
		}
	}

	tracing::info!(runs, "Sync worker stopped.");

	runs
}
