//! Memoization of read results keyed by normalized request parameters.

use std::{future::Future, time::Duration};

use moka::future::Cache;

use crate::Result;

const KEY_DELIMITER: char = '|';
const KEY_ESCAPE: char = '\\';

/// Compute-on-miss cache in front of one read path.
///
/// Only successful results are stored. Concurrent misses on one key share a single upstream
/// computation, and entries leave the cache through TTL expiry, capacity eviction, or an
/// explicit invalidation. A cache built from a disabled config passes every call through.
pub struct ResultCache<V>
where
	V: Clone + Send + Sync + 'static,
{
	inner: Option<Cache<String, V>>,
}
impl<V> ResultCache<V>
where
	V: Clone + Send + Sync + 'static,
{
	pub fn new(cfg: &shelf_config::Cache) -> Self {
		if !cfg.enabled {
			return Self::disabled();
		}

		let cache = Cache::builder()
			.max_capacity(cfg.max_capacity)
			.time_to_live(Duration::from_secs(cfg.ttl_secs))
			.build();

		Self { inner: Some(cache) }
	}

	pub fn disabled() -> Self {
		Self { inner: None }
	}

	pub fn is_enabled(&self) -> bool {
		self.inner.is_some()
	}

	pub async fn get_or_compute<F, Fut>(&self, key: String, compute: F) -> Result<V>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<V>>,
	{
		let Some(cache) = self.inner.as_ref() else {
			return compute().await;
		};

		cache.try_get_with(key, compute()).await.map_err(|err| (*err).clone())
	}

	/// Looks up a stored result without computing on a miss.
	pub async fn get(&self, key: &str) -> Option<V> {
		match self.inner.as_ref() {
			Some(cache) => cache.get(key).await,
			None => None,
		}
	}

	pub fn invalidate_all(&self) {
		if let Some(cache) = self.inner.as_ref() {
			cache.invalidate_all();
		}
	}
}

/// Suggestion results are keyed by the keyword exactly as typed.
pub fn suggest_key(keyword: &str) -> String {
	keyword.to_string()
}

/// Search results are keyed by all three parameters. Absent and blank parameters build the same
/// query, so both map to the empty part; separators inside values are escaped.
pub fn search_key(keyword: Option<&str>, brand: Option<&str>, category: Option<&str>) -> String {
	let mut out = String::new();

	for (idx, part) in [keyword, brand, category].into_iter().enumerate() {
		if idx > 0 {
			out.push(KEY_DELIMITER);
		}

		let part = part.filter(|value| !value.trim().is_empty()).unwrap_or_default();

		for ch in part.chars() {
			if ch == KEY_DELIMITER || ch == KEY_ESCAPE {
				out.push(KEY_ESCAPE);
			}

			out.push(ch);
		}
	}

	out
}
