use serde::Deserialize;
use serde_json::Value;

use shelf_domain::{SearchQuerySpec, SearchResultItem, query};

use crate::{Error, Result, ShelfService, cache};

/// Fields read back from a hit's stored document.
#[derive(Debug, Deserialize)]
struct StoredItem {
	id: i64,
	name: String,
	#[serde(default)]
	price: Option<i32>,
	#[serde(default)]
	image: Option<String>,
	#[serde(default)]
	brand: Option<String>,
	#[serde(default)]
	category: Option<String>,
}

impl ShelfService {
	/// Filtered full-text search capped at one page, in the index's ranking order.
	pub async fn search(&self, spec: &SearchQuerySpec) -> Result<Vec<SearchResultItem>> {
		let key = cache::search_key(spec.keyword(), spec.brand(), spec.category());

		self.results
			.get_or_compute(key, || self.with_read_timeout("search", self.fetch_results(spec)))
			.await
	}

	async fn fetch_results(&self, spec: &SearchQuerySpec) -> Result<Vec<SearchResultItem>> {
		let built = query::build(spec);
		let body = built.to_body();

		tracing::debug!(
			keyword = spec.keyword(),
			brand = spec.brand(),
			category = spec.category(),
			"Querying index."
		);

		let response = self.backends.index.search(&body).await.map_err(|err| {
			tracing::error!(error = %err, "Search request failed.");

			Error::QueryExecution { message: format!("Search request failed: {err}") }
		})?;

		parse_search_response(&response, &built.highlight_field)
	}
}

pub fn parse_search_response(
	response: &Value,
	highlight_field: &str,
) -> Result<Vec<SearchResultItem>> {
	let hits = response
		.get("hits")
		.and_then(|hits| hits.get("hits"))
		.and_then(Value::as_array)
		.ok_or_else(|| Error::QueryExecution {
			message: "Search response is missing hits.".to_string(),
		})?;
	let mut items = Vec::with_capacity(hits.len());

	for hit in hits {
		let source = hit.get("_source").cloned().ok_or_else(|| Error::QueryExecution {
			message: "Search hit is missing _source.".to_string(),
		})?;
		let stored: StoredItem = serde_json::from_value(source).map_err(|err| {
			Error::QueryExecution { message: format!("Search hit has an invalid _source: {err}") }
		})?;
		let fragment = hit
			.get("highlight")
			.and_then(|highlight| highlight.get(highlight_field))
			.and_then(Value::as_array)
			.and_then(|fragments| fragments.first())
			.and_then(Value::as_str)
			.map(str::to_string);
		let highlight = fragment.unwrap_or_else(|| stored.name.clone());

		items.push(SearchResultItem {
			id: stored.id,
			name: stored.name,
			price: stored.price,
			image: stored.image,
			brand: stored.brand,
			category: stored.category,
			highlight,
		});
	}

	Ok(items)
}
