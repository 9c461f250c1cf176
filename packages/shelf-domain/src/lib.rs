pub mod document;
pub mod highlight;
pub mod query;
pub mod suggestion;

pub use document::{IndexDocument, SUGGEST_FIELD, SUGGEST_WEIGHT, SuggestInput, TransformError};
pub use query::{FullText, PAGE_SIZE, SearchQuerySpec, StructuredQuery, TermFilter};

use serde::{Deserialize, Serialize};

/// One row of the source catalog, as observed at sync time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
	pub id: i64,
	pub name: Option<String>,
	/// Minor currency units.
	pub price: Option<i32>,
	pub image: Option<String>,
	pub brand: Option<String>,
	pub category: Option<String>,
}

/// Search hit as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
	pub id: i64,
	pub name: String,
	pub price: Option<i32>,
	pub image: Option<String>,
	pub brand: Option<String>,
	pub category: Option<String>,
	pub highlight: String,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
	value.filter(|value| !value.trim().is_empty())
}
