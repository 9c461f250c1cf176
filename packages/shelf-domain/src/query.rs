//! Translation of loosely specified search parameters into an index query.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Fixed number of hits returned by a search.
pub const PAGE_SIZE: u32 = 10;
pub const HIGHLIGHT_FIELD: &str = "name";
pub const FULL_TEXT_FIELDS: [&str; 3] = ["name", "brand", "category"];

/// Search parameters as received from callers. Absent and blank values are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuerySpec {
	pub keyword: Option<String>,
	pub brand: Option<String>,
	pub category: Option<String>,
}
impl SearchQuerySpec {
	pub fn keyword(&self) -> Option<&str> {
		crate::non_blank(self.keyword.as_deref())
	}

	pub fn brand(&self) -> Option<&str> {
		crate::non_blank(self.brand.as_deref())
	}

	pub fn category(&self) -> Option<&str> {
		crate::non_blank(self.category.as_deref())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullText {
	MatchAll,
	MultiMatch { query: String, fields: Vec<String> },
}

/// Exact, unscored equality on a keyword field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFilter {
	pub field: String,
	pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredQuery {
	pub must: FullText,
	pub filters: Vec<TermFilter>,
	pub highlight_field: String,
	pub size: u32,
}
impl StructuredQuery {
	/// Renders the `_search` request body.
	pub fn to_body(&self) -> Value {
		let must = match &self.must {
			FullText::MatchAll => json!({ "match_all": {} }),
			FullText::MultiMatch { query, fields } => json!({
				"multi_match": { "query": query, "fields": fields },
			}),
		};
		let filters: Vec<Value> = self
			.filters
			.iter()
			.map(|filter| json!({ "term": { filter.field.as_str(): filter.value } }))
			.collect();
		let mut bool_query = serde_json::Map::new();

		bool_query.insert("must".to_string(), json!([must]));

		if !filters.is_empty() {
			bool_query.insert("filter".to_string(), Value::Array(filters));
		}

		json!({
			"query": { "bool": bool_query },
			"highlight": { "fields": { self.highlight_field.as_str(): {} } },
			"size": self.size,
		})
	}
}

pub fn build(spec: &SearchQuerySpec) -> StructuredQuery {
	let must = match spec.keyword() {
		Some(keyword) => FullText::MultiMatch {
			query: keyword.to_string(),
			fields: FULL_TEXT_FIELDS.iter().map(|field| field.to_string()).collect(),
		},
		None => FullText::MatchAll,
	};
	let mut filters = Vec::new();

	if let Some(brand) = spec.brand() {
		filters.push(TermFilter { field: "brand".to_string(), value: brand.to_string() });
	}
	if let Some(category) = spec.category() {
		filters.push(TermFilter { field: "category".to_string(), value: category.to_string() });
	}

	StructuredQuery { must, filters, highlight_field: HIGHLIGHT_FIELD.to_string(), size: PAGE_SIZE }
}
