use serde_json::{Value, json};

use shelf_domain::{SUGGEST_FIELD, highlight};

use crate::{Error, Result, ShelfService, cache};

pub const SUGGESTION_NAME: &str = "sug";
pub const MAX_SUGGESTIONS: u32 = 10;

impl ShelfService {
	/// Prefix completions for `keyword`, each with the typed prefix wrapped in highlight markers.
	///
	/// A blank keyword has nothing to complete and yields an empty list without a round trip.
	pub async fn suggest(&self, keyword: &str) -> Result<Vec<String>> {
		if keyword.trim().is_empty() {
			return Ok(Vec::new());
		}

		let key = cache::suggest_key(keyword);

		self.suggestions
			.get_or_compute(key, || self.with_read_timeout("suggest", self.fetch_suggestions(keyword)))
			.await
	}

	async fn fetch_suggestions(&self, keyword: &str) -> Result<Vec<String>> {
		let body = build_suggest_body(keyword);
		let response = self.backends.index.search(&body).await.map_err(|err| {
			tracing::error!(error = %err, keyword, "Suggestion request failed.");

			Error::QueryExecution { message: format!("Suggestion request failed: {err}") }
		})?;
		let options = parse_suggest_response(&response)?;

		Ok(options.iter().map(|option| highlight::mark_prefix(option, keyword)).collect())
	}
}

pub fn build_suggest_body(keyword: &str) -> Value {
	json!({
		"size": 0,
		"suggest": {
			SUGGESTION_NAME: {
				"prefix": keyword,
				"completion": {
					"field": SUGGEST_FIELD,
					"size": MAX_SUGGESTIONS,
					"skip_duplicates": true,
				},
			},
		},
	})
}

/// Raw option texts in ranking order. A response without the suggestion section yields none.
pub fn parse_suggest_response(response: &Value) -> Result<Vec<String>> {
	let Some(entries) = response
		.get("suggest")
		.and_then(|suggest| suggest.get(SUGGESTION_NAME))
		.and_then(Value::as_array)
	else {
		tracing::warn!("Suggestion response has no suggestion section.");

		return Ok(Vec::new());
	};
	let mut out = Vec::new();

	for entry in entries {
		let Some(options) = entry.get("options").and_then(Value::as_array) else {
			continue;
		};

		for option in options {
			let text = option.get("text").and_then(Value::as_str).ok_or_else(|| {
				Error::QueryExecution { message: "Suggestion option is missing text.".to_string() }
			})?;

			out.push(text.to_string());
		}
	}

	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn suggest_body_requests_deduplicated_completions_only() {
		let body = build_suggest_body("ri");

		assert_eq!(body["size"], json!(0));
		assert_eq!(body["suggest"]["sug"]["prefix"], json!("ri"));
		assert_eq!(
			body["suggest"]["sug"]["completion"],
			json!({ "field": "suggest_keywords", "size": 10, "skip_duplicates": true })
		);
	}

	#[test]
	fn option_without_text_is_a_parse_failure() {
		let response = json!({ "suggest": { "sug": [{ "options": [{ "_id": "1" }] }] } });

		assert!(matches!(
			parse_suggest_response(&response),
			Err(Error::QueryExecution { .. })
		));
	}
}
