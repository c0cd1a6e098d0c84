use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = fieldgate_api::Args::parse();

	fieldgate_api::run(args).await
}
