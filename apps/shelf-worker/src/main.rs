use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = shelf_worker::Args::parse();

	shelf_worker::run(args).await
}
