mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Cache, Config, Index, Postgres, Search, Service, Storage, Sync};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.admin_bind", &cfg.service.admin_bind),
		("storage.postgres.dsn", &cfg.storage.postgres.dsn),
		("storage.index.url", &cfg.storage.index.url),
		("storage.index.index", &cfg.storage.index.index),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !cfg.storage.index.url.starts_with("http://") && !cfg.storage.index.url.starts_with("https://")
	{
		return Err(Error::Validation {
			message: "storage.index.url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.storage.index.index.chars().any(|ch| ch.is_whitespace() || ch == '/') {
		return Err(Error::Validation {
			message: "storage.index.index must not contain whitespace or '/'.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.index.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "storage.index.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for value in cfg.storage.index.default_headers.values() {
		if !value.is_string() {
			return Err(Error::Validation {
				message: "storage.index.default_headers values must be strings.".to_string(),
			});
		}
	}

	if cfg.sync.interval_secs == 0 {
		return Err(Error::Validation {
			message: "sync.interval_secs must be greater than zero.".to_string(),
		});
	}
	if cfg.search.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.cache.enabled {
		if cfg.cache.ttl_secs == 0 {
			return Err(Error::Validation {
				message: "cache.ttl_secs must be greater than zero when the cache is enabled."
					.to_string(),
			});
		}
		if cfg.cache.max_capacity == 0 {
			return Err(Error::Validation {
				message: "cache.max_capacity must be greater than zero when the cache is enabled."
					.to_string(),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.storage.index.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.storage.index.api_key = None;
	}

	let trimmed = cfg.storage.index.url.trim_end_matches('/').len();

	cfg.storage.index.url.truncate(trimmed);
}
