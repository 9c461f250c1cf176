use shelf_config::Postgres;
use shelf_storage::{db::Db, models::NewItem, queries};
use shelf_testkit::TestDatabase;

#[tokio::test]
#[ignore = "Requires external Postgres. Set SHELF_PG_DSN to run."]
async fn lists_items_in_id_order_including_null_names() {
	let Some(base_dsn) = shelf_testkit::env_dsn() else {
		eprintln!("Skipping lists_items_in_id_order_including_null_names; set SHELF_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg =
		Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1, ensure_schema: false };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");
	db.ensure_schema().await.expect("Schema bootstrap must be repeatable.");

	let first = queries::insert_item(
		&db,
		&NewItem {
			name: Some("RIMOWA SALSA AIR".to_string()),
			price: Some(529_900),
			brand: Some("RIMOWA".to_string()),
			category: Some("Luggage".to_string()),
			..Default::default()
		},
	)
	.await
	.expect("Failed to insert item.");
	let second = queries::insert_item(&db, &NewItem { price: Some(100), ..Default::default() })
		.await
		.expect("Failed to insert item.");
	let rows = queries::list_items(&db).await.expect("Failed to list items.");

	assert_eq!(rows.iter().map(|row| row.id).collect::<Vec<_>>(), vec![first, second]);
	assert_eq!(rows[0].brand.as_deref(), Some("RIMOWA"));
	assert!(rows[1].name.is_none());
	assert!(queries::delete_item(&db, second).await.expect("Failed to delete item."));
	assert_eq!(queries::list_items(&db).await.expect("Failed to list items.").len(), 1);

	db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SHELF_PG_DSN to run."]
async fn open_leaves_the_source_schema_alone_unless_asked() {
	let Some(base_dsn) = shelf_testkit::env_dsn() else {
		eprintln!("Skipping open_leaves_the_source_schema_alone_unless_asked; set SHELF_PG_DSN.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let mut cfg =
		Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1, ensure_schema: false };
	let db = Db::open(&cfg).await.expect("Failed to open database.");
	let table: Option<String> = sqlx::query_scalar("SELECT to_regclass('item')::text")
		.fetch_one(&db.pool)
		.await
		.expect("Failed to look up item table.");

	assert!(table.is_none());

	db.pool.close().await;
	cfg.ensure_schema = true;

	let db = Db::open(&cfg).await.expect("Failed to open database.");

	assert!(queries::list_items(&db).await.expect("Failed to list items.").is_empty());

	db.pool.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
