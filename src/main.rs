// verb-forge: a French verb conjugation and sentence database builder
//
// This is the main entry point for the verb-forge application.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use verb_forge::cli::{self, CliArgs};
use verb_forge::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = CliArgs::parse(std::env::args().skip(1))?;
    init_tracing(args.debug);

    let settings = Settings::load()?;
    cli::run(args, settings).await?;

    Ok(())
}

fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
