use serde::{Deserialize, Serialize};

use crate::{CanonicalRecord, suggestion};

/// Name of the completion field in the index mapping.
pub const SUGGEST_FIELD: &str = "suggest_keywords";
/// Completion weight attached to every document.
pub const SUGGEST_WEIGHT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
	#[error("Item {id} has no name.")]
	MissingName { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestInput {
	pub input: Vec<String>,
	pub weight: u32,
}

/// Document body stored in the index under the id returned by [`IndexDocument::doc_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
	pub id: i64,
	pub name: String,
	pub price: Option<i32>,
	pub image: Option<String>,
	pub brand: Option<String>,
	pub category: Option<String>,
	pub suggest_keywords: SuggestInput,
}
impl IndexDocument {
	/// Stable index id. Re-upserting the same item replaces the previous document.
	pub fn doc_id(&self) -> String {
		self.id.to_string()
	}
}

pub fn transform(record: &CanonicalRecord) -> Result<IndexDocument, TransformError> {
	let Some(name) = record.name.as_deref() else {
		return Err(TransformError::MissingName { id: record.id });
	};
	let input = suggestion::extract(name, record.brand.as_deref(), record.category.as_deref());

	Ok(IndexDocument {
		id: record.id,
		name: name.to_string(),
		price: record.price,
		image: record.image.clone(),
		brand: record.brand.clone(),
		category: record.category.clone(),
		suggest_keywords: SuggestInput { input, weight: SUGGEST_WEIGHT },
	})
}
