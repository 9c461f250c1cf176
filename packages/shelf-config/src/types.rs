use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub sync: Sync,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub cache: Cache,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
	#[serde(default = "default_bind_localhost_only")]
	pub bind_localhost_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub index: Index,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	/// Create the `item` table and its indexes at startup. Off by default: the source database
	/// usually belongs to another system and the sync role may only read it.
	#[serde(default)]
	pub ensure_schema: bool,
}

#[derive(Debug, Deserialize)]
pub struct Index {
	/// Base URL of the search cluster, e.g. "http://127.0.0.1:9200".
	pub url: String,
	/// Name of the index holding item documents.
	pub index: String,
	pub timeout_ms: u64,
	/// Optional. Sent as `Authorization: ApiKey <key>`.
	#[serde(default)]
	pub api_key: Option<String>,
	/// Optional. Extra headers attached to every index request; values must be strings.
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Sync {
	pub interval_secs: u64,
	/// Run one sync immediately at worker startup instead of waiting a full interval.
	pub run_on_start: bool,
}
impl Default for Sync {
	fn default() -> Self {
		Self { interval_secs: 300, run_on_start: true }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Upper bound for a single suggest or search call, including the index round trip.
	pub timeout_ms: u64,
}
impl Default for Search {
	fn default() -> Self {
		Self { timeout_ms: 3_000 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Cache {
	pub enabled: bool,
	pub ttl_secs: u64,
	pub max_capacity: u64,
	/// Drop every cached result after a sync triggered through the admin API.
	pub invalidate_on_sync: bool,
}
impl Default for Cache {
	fn default() -> Self {
		Self { enabled: true, ttl_secs: 600, max_capacity: 10_000, invalidate_on_sync: true }
	}
}

fn default_bind_localhost_only() -> bool {
	true
}
