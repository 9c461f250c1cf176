use serde_json::{Map, json};

use shelf_config::{Cache, Config, Index, Postgres, Search, Service, Storage, Sync};
use shelf_domain::SearchQuerySpec;
use shelf_service::{ShelfService, SyncOutcome};
use shelf_storage::{db::Db, index::IndexStore, models::NewItem, queries};
use shelf_testkit::TestDatabase;

fn test_config(dsn: String, index_url: String, index: String) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			bind_localhost_only: true,
		},
		storage: Storage {
			postgres: Postgres { dsn, pool_max_conns: 2, ensure_schema: false },
			index: Index {
				url: index_url,
				index,
				timeout_ms: 10_000,
				api_key: None,
				default_headers: Map::new(),
			},
		},
		sync: Sync::default(),
		search: Search { timeout_ms: 10_000 },
		cache: Cache::default(),
	}
}

async fn create_index(index_url: &str, index: &str) {
	let mapping = json!({
		"mappings": { "properties": {
			"id": { "type": "long" },
			"name": { "type": "text" },
			"price": { "type": "integer" },
			"image": { "type": "keyword", "index": false },
			"brand": { "type": "keyword" },
			"category": { "type": "keyword" },
			"suggest_keywords": { "type": "completion" }
		} }
	});
	let res = reqwest::Client::new()
		.put(format!("{}/{index}", index_url.trim_end_matches('/')))
		.json(&mapping)
		.send()
		.await
		.expect("Failed to create test index.");

	assert!(res.status().is_success(), "Index creation returned {}.", res.status());
}

#[tokio::test]
#[ignore = "Requires external Postgres and an index. Set SHELF_PG_DSN and SHELF_INDEX_URL to run."]
async fn synced_catalog_is_searchable_and_suggestible() {
	let Some(base_dsn) = shelf_testkit::env_dsn() else {
		eprintln!("Skipping synced_catalog_is_searchable_and_suggestible; set SHELF_PG_DSN.");

		return;
	};
	let Some(index_url) = shelf_testkit::env_index_url() else {
		eprintln!("Skipping synced_catalog_is_searchable_and_suggestible; set SHELF_INDEX_URL.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let index = test_db.index_name("shelf_acceptance");
	let config = test_config(test_db.dsn().to_string(), index_url.clone(), index.clone());

	create_index(&index_url, &index).await;

	let db = Db::connect(&config.storage.postgres).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	for (name, brand, category) in [
		(Some("RIMOWA SALSA AIR"), "RIMOWA", "Luggage"),
		(Some("Acme phone"), "Acme", "Phones"),
		(Some("Acme phone case"), "Acme", "Accessories"),
		(None, "Acme", "Phones"),
	] {
		queries::insert_item(
			&db,
			&NewItem {
				name: name.map(str::to_string),
				price: Some(1_000),
				brand: Some(brand.to_string()),
				category: Some(category.to_string()),
				..Default::default()
			},
		)
		.await
		.expect("Failed to insert item.");
	}

	let admin = IndexStore::new(&config.storage.index).expect("Failed to build index client.");
	let store = IndexStore::new(&config.storage.index).expect("Failed to build index client.");
	let pool = db.pool.clone();
	let service = ShelfService::new(config, db, store);
	let outcome = service.sync().await.expect("Sync failed.");
	let SyncOutcome::Completed(report) = outcome else {
		panic!("Expected a completed sync run.");
	};

	assert_eq!((report.fetched, report.upserted, report.skipped), (4, 3, 1));

	admin.refresh().await.expect("Failed to refresh index.");

	let items = service
		.search(&SearchQuerySpec {
			keyword: Some("phone".to_string()),
			brand: Some("Acme".to_string()),
			category: Some("Phones".to_string()),
		})
		.await
		.expect("Search failed.");

	assert_eq!(items.len(), 1);
	assert_eq!(items[0].name, "Acme phone");
	assert!(items[0].highlight.contains("<em>phone</em>"));

	let suggestions = service.suggest("RI").await.expect("Suggest failed.");

	assert!(suggestions.contains(&"<em>RI</em>MOWA".to_string()));

	pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
