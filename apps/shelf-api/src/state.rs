use std::sync::Arc;

use shelf_service::ShelfService;
use shelf_storage::{db::Db, index::IndexStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ShelfService>,
}
impl AppState {
	/// Connects the source database and the index client once for the whole process.
	pub async fn new(config: shelf_config::Config) -> color_eyre::Result<Self> {
		let db = Db::open(&config.storage.postgres).await?;

		let index = IndexStore::new(&config.storage.index)?;
		let service = ShelfService::new(config, db, index);

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: ShelfService) -> Self {
		Self { service: Arc::new(service) }
	}
}
