//! HTTP client for an Elasticsearch-compatible index.

use std::time::Duration;

use reqwest::{
	Client, Response,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

const MAX_ERROR_BODY_CHARS: usize = 512;

/// One document of a bulk upsert.
#[derive(Debug, Clone)]
pub struct BulkDoc {
	pub id: String,
	pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRejection {
	pub id: String,
	pub reason: String,
}

/// Outcome of a bulk request that the index accepted at the transport level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSummary {
	pub submitted: usize,
	pub rejected: Vec<BulkRejection>,
}

#[derive(Debug, Serialize)]
struct BulkAction<'a> {
	index: BulkTarget<'a>,
}

#[derive(Debug, Serialize)]
struct BulkTarget<'a> {
	#[serde(rename = "_index")]
	index: &'a str,
	#[serde(rename = "_id")]
	id: &'a str,
}

pub struct IndexStore {
	pub client: Client,
	pub url: String,
	pub index: String,
}
impl IndexStore {
	pub fn new(cfg: &shelf_config::Index) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(index_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
			.build()?;

		Ok(Self { client, url: cfg.url.trim_end_matches('/').to_string(), index: cfg.index.clone() })
	}

	/// Inserts or replaces every document by id in one `_bulk` request.
	pub async fn bulk_upsert(&self, docs: &[BulkDoc]) -> Result<BulkSummary> {
		if docs.is_empty() {
			return Ok(BulkSummary::default());
		}

		let payload = render_bulk_body(&self.index, docs)?;
		let res = self
			.client
			.post(format!("{}/_bulk", self.url))
			.header(CONTENT_TYPE, "application/x-ndjson")
			.body(payload)
			.send()
			.await?;
		let json = read_json(res).await?;

		parse_bulk_response(&json, docs.len())
	}

	/// Runs a `_search` request and returns the raw response body.
	pub async fn search(&self, body: &Value) -> Result<Value> {
		let res =
			self.client.post(format!("{}/{}/_search", self.url, self.index)).json(body).send().await?;

		read_json(res).await
	}

	/// Makes freshly upserted documents visible to searches.
	pub async fn refresh(&self) -> Result<()> {
		let res = self.client.post(format!("{}/{}/_refresh", self.url, self.index)).send().await?;

		read_json(res).await?;

		Ok(())
	}
}

pub fn index_headers(
	api_key: Option<&str>,
	default_headers: &Map<String, Value>,
) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if let Some(key) = api_key {
		headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("ApiKey {key}"))?);
	}

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: format!("Default header {key} must be a string."),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, HeaderValue::from_str(raw)?);
	}

	Ok(headers)
}

pub fn render_bulk_body(index: &str, docs: &[BulkDoc]) -> Result<String> {
	let mut out = String::new();

	for doc in docs {
		let action = BulkAction { index: BulkTarget { index, id: doc.id.as_str() } };

		out.push_str(&serde_json::to_string(&action)?);
		out.push('\n');
		out.push_str(&serde_json::to_string(&doc.body)?);
		out.push('\n');
	}

	Ok(out)
}

fn parse_bulk_response(json: &Value, submitted: usize) -> Result<BulkSummary> {
	let items = json.get("items").and_then(Value::as_array).ok_or_else(|| {
		Error::InvalidResponse { message: "Bulk response is missing items array.".to_string() }
	})?;
	let mut rejected = Vec::new();

	if json.get("errors").and_then(Value::as_bool).unwrap_or(false) {
		for item in items {
			let Some(result) = item.get("index") else {
				continue;
			};
			let Some(error) = result.get("error") else {
				continue;
			};
			let id = result.get("_id").and_then(Value::as_str).unwrap_or_default().to_string();
			let reason = error
				.get("reason")
				.and_then(Value::as_str)
				.map(str::to_string)
				.unwrap_or_else(|| error.to_string());

			rejected.push(BulkRejection { id, reason });
		}
	}

	Ok(BulkSummary { submitted, rejected })
}

async fn read_json(res: Response) -> Result<Value> {
	let status = res.status();

	if !status.is_success() {
		let text = res.text().await.unwrap_or_default();
		let mut body: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();

		if text.chars().count() > MAX_ERROR_BODY_CHARS {
			body.push_str("...");
		}

		tracing::debug!(status = status.as_u16(), "Index request rejected.");

		return Err(Error::IndexStatus { status: status.as_u16(), body });
	}

	Ok(res.json().await?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bulk_body_pairs_action_and_source_lines() {
		let docs = vec![
			BulkDoc { id: "1".to_string(), body: serde_json::json!({ "name": "a" }) },
			BulkDoc { id: "2".to_string(), body: serde_json::json!({ "name": "b" }) },
		];
		let body = render_bulk_body("item", &docs).expect("render failed");
		let lines: Vec<&str> = body.lines().collect();

		assert_eq!(lines.len(), 4);
		assert_eq!(lines[0], r#"{"index":{"_index":"item","_id":"1"}}"#);
		assert_eq!(lines[1], r#"{"name":"a"}"#);
		assert_eq!(lines[2], r#"{"index":{"_index":"item","_id":"2"}}"#);
		assert!(body.ends_with('\n'));
	}

	#[test]
	fn collects_item_level_rejections() {
		let json = serde_json::json!({
			"errors": true,
			"items": [
				{ "index": { "_id": "1", "status": 200 } },
				{ "index": { "_id": "2", "status": 400, "error": { "type": "mapper_parsing_exception", "reason": "bad price" } } }
			]
		});
		let summary = parse_bulk_response(&json, 2).expect("parse failed");

		assert_eq!(summary.submitted, 2);
		assert_eq!(
			summary.rejected,
			vec![BulkRejection { id: "2".to_string(), reason: "bad price".to_string() }]
		);
	}

	#[test]
	fn api_key_becomes_authorization_header() {
		let headers = index_headers(Some("abc"), &Map::new()).expect("headers failed");

		assert_eq!(headers.get(AUTHORIZATION).expect("missing header"), "ApiKey abc");
	}
}
