pub mod worker;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shelf_service::ShelfService;
use shelf_storage::{db::Db, index::IndexStore};

#[derive(Debug, Parser)]
#[command(
	version = shelf_cli::VERSION,
	rename_all = "kebab",
	styles = shelf_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = shelf_config::load(&args.config)?;

	init_tracing(&config);

	let db = Db::open(&config.storage.postgres).await?;
	let index = IndexStore::new(&config.storage.index)?;
	let schedule = worker::Schedule::from_config(&config.sync);
	let service = ShelfService::new(config, db, index);

	worker::run_worker(&service, schedule, shutdown_signal()).await;

	Ok(())
}

fn init_tracing(config: &shelf_config::Config) {
	tracing_subscriber::fmt().with_env_filter(log_filter(&config.service.log_level)).init();
}

/// Parses `service.log_level`, falling back to `info` when it is not a valid filter.
fn log_filter(log_level: &str) -> EnvFilter {
	EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %err, "Failed to listen for shutdown signal.");

		std::future::pending::<()>().await;
	}

	tracing::info!("Shutdown signal received.");
}
