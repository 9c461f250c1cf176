pub mod cache;
pub mod search;
pub mod suggest;
pub mod sync;

mod error;
mod time_serde;

pub use cache::{ResultCache, search_key, suggest_key};
pub use error::{Error, Result};
pub use shelf_domain::{SearchQuerySpec, SearchResultItem};
pub use sync::{SyncOutcome, SyncReport};

use std::{
	future::Future,
	pin::Pin,
	sync::{Arc, atomic::AtomicBool},
	time::Duration,
};

use serde_json::Value;

use shelf_config::Config;
use shelf_domain::CanonicalRecord;
use shelf_storage::{
	db::Db,
	index::{BulkDoc, BulkSummary, IndexStore},
	models::ItemRow,
	queries,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read access to the catalog's source of truth.
pub trait RecordSource
where
	Self: Send + Sync,
{
	fn list_records<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Vec<CanonicalRecord>>>;
}

/// Wire operations against the search index.
pub trait SearchIndex
where
	Self: Send + Sync,
{
	fn bulk_upsert<'a>(
		&'a self,
		docs: &'a [BulkDoc],
	) -> BoxFuture<'a, color_eyre::Result<BulkSummary>>;

	fn search<'a>(&'a self, body: &'a Value) -> BoxFuture<'a, color_eyre::Result<Value>>;
}

#[derive(Clone)]
pub struct Backends {
	pub source: Arc<dyn RecordSource>,
	pub index: Arc<dyn SearchIndex>,
}
impl Backends {
	pub fn new(source: Arc<dyn RecordSource>, index: Arc<dyn SearchIndex>) -> Self {
		Self { source, index }
	}
}

pub struct ShelfService {
	pub cfg: Config,
	pub backends: Backends,
	pub suggestions: ResultCache<Vec<String>>,
	pub results: ResultCache<Vec<SearchResultItem>>,
	sync_running: AtomicBool,
}
impl ShelfService {
	pub fn new(cfg: Config, db: Db, index: IndexStore) -> Self {
		Self::with_backends(cfg, Backends::new(Arc::new(db), Arc::new(index)))
	}

	pub fn with_backends(cfg: Config, backends: Backends) -> Self {
		let suggestions = ResultCache::new(&cfg.cache);
		let results = ResultCache::new(&cfg.cache);

		Self { cfg, backends, suggestions, results, sync_running: AtomicBool::new(false) }
	}

	/// Drops every cached suggestion and search result.
	pub fn invalidate_cache(&self) {
		self.suggestions.invalidate_all();
		self.results.invalidate_all();

		tracing::info!("Result caches invalidated.");
	}

	pub(crate) fn read_timeout(&self) -> Duration {
		Duration::from_millis(self.cfg.search.timeout_ms)
	}

	/// Runs one upstream read under the configured caller timeout.
	pub(crate) async fn with_read_timeout<T, F>(
		&self,
		operation: &'static str,
		fut: F,
	) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		let timeout = self.read_timeout();

		match tokio::time::timeout(timeout, fut).await {
			Ok(result) => result,
			Err(_) => {
				tracing::warn!(operation, timeout_ms = self.cfg.search.timeout_ms, "Read timed out.");

				Err(Error::Timeout { operation, timeout_ms: self.cfg.search.timeout_ms })
			},
		}
	}
}

impl RecordSource for Db {
	fn list_records<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Vec<CanonicalRecord>>> {
		Box::pin(async move {
			let rows = queries::list_items(self).await?;

			Ok(rows.into_iter().map(record_from_row).collect())
		})
	}
}

impl SearchIndex for IndexStore {
	fn bulk_upsert<'a>(
		&'a self,
		docs: &'a [BulkDoc],
	) -> BoxFuture<'a, color_eyre::Result<BulkSummary>> {
		Box::pin(async move { Ok(IndexStore::bulk_upsert(self, docs).await?) })
	}

	fn search<'a>(&'a self, body: &'a Value) -> BoxFuture<'a, color_eyre::Result<Value>> {
		Box::pin(async move { Ok(IndexStore::search(self, body).await?) })
	}
}

fn record_from_row(row: ItemRow) -> CanonicalRecord {
	CanonicalRecord {
		id: row.id,
		name: row.name,
		price: row.price,
		image: row.image,
		brand: row.brand,
		category: row.category,
	}
}
