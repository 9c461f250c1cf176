//! Full-snapshot reconciliation of the source catalog into the search index.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use shelf_domain::{CanonicalRecord, document};
use shelf_storage::index::BulkDoc;

use crate::{Error, Result, ShelfService};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
	pub run_id: Uuid,
	#[serde(with = "crate::time_serde")]
	pub started_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub finished_at: OffsetDateTime,
	/// Records read from the source.
	pub fetched: usize,
	/// Documents the index accepted.
	pub upserted: usize,
	/// Records that could not be turned into documents.
	pub skipped: usize,
	/// Documents the index refused inside an otherwise accepted bulk request.
	pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
	Completed(SyncReport),
	/// Another run was still in progress.
	Skipped,
}

struct SyncGuard<'a> {
	running: &'a AtomicBool,
}
impl<'a> SyncGuard<'a> {
	fn acquire(running: &'a AtomicBool) -> Option<Self> {
		running
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.ok()
			.map(|_| Self { running })
	}
}
impl Drop for SyncGuard<'_> {
	fn drop(&mut self) {
		self.running.store(false, Ordering::Release);
	}
}

struct PreparedBatch {
	docs: Vec<BulkDoc>,
	skipped: usize,
}

impl ShelfService {
	/// Upserts a document for every current source record in one bulk request.
	///
	/// Records that fail to transform are logged and skipped. A failed bulk submission fails the
	/// whole run and is not retried here. Documents of records deleted from the source are left
	/// in the index.
	pub async fn sync(&self) -> Result<SyncOutcome> {
		let Some(_guard) = SyncGuard::acquire(&self.sync_running) else {
			tracing::warn!("Sync already running. Skipping this run.");

			return Ok(SyncOutcome::Skipped);
		};
		let run_id = Uuid::new_v4();
		let started_at = OffsetDateTime::now_utc();

		tracing::info!(%run_id, "Sync started.");

		let records = self.backends.source.list_records().await.map_err(|err| {
			tracing::error!(%run_id, error = %err, "Failed to read source records.");

			Error::Storage { message: err.to_string() }
		})?;
		let fetched = records.len();
		let batch = prepare_batch(run_id, &records);
		let summary = self.backends.index.bulk_upsert(&batch.docs).await.map_err(|err| {
			tracing::error!(%run_id, error = %err, "Bulk submission failed.");

			Error::BulkSubmission { message: err.to_string() }
		})?;

		for rejection in &summary.rejected {
			tracing::warn!(
				%run_id,
				doc_id = %rejection.id,
				reason = %rejection.reason,
				"Index rejected document."
			);
		}

		let rejected = summary.rejected.len();
		let report = SyncReport {
			run_id,
			started_at,
			finished_at: OffsetDateTime::now_utc(),
			fetched,
			upserted: summary.submitted.saturating_sub(rejected),
			skipped: batch.skipped,
			rejected,
		};

		tracing::info!(
			%run_id,
			fetched = report.fetched,
			upserted = report.upserted,
			skipped = report.skipped,
			rejected = report.rejected,
			"Sync finished."
		);

		Ok(SyncOutcome::Completed(report))
	}

	pub fn sync_in_progress(&self) -> bool {
		self.sync_running.load(Ordering::Acquire)
	}
}

fn prepare_batch(run_id: Uuid, records: &[CanonicalRecord]) -> PreparedBatch {
	let mut docs = Vec::with_capacity(records.len());
	let mut skipped = 0;

	for record in records {
		let doc = match document::transform(record) {
			Ok(doc) => doc,
			Err(err) => {
				tracing::error!(%run_id, item_id = record.id, error = %err, "Skipping item.");

				skipped += 1;

				continue;
			},
		};
		let body = match serde_json::to_value(&doc) {
			Ok(body) => body,
			Err(err) => {
				tracing::error!(%run_id, item_id = record.id, error = %err, "Failed to encode item.");

				skipped += 1;

				continue;
			},
		};

		docs.push(BulkDoc { id: doc.doc_id(), body });
	}

	PreparedBatch { docs, skipped }
}
