//! Command line interface for the floodgate harness.

use anyhow::Result;
use clap::Parser;

mod config;
mod native;

#[derive(Debug, Parser)]
#[command(name = "floodgate", version, about)]
struct CliArgs {
    #[command(flatten)]
    params: native::Params,
}

/// Run the floodgate harness.
pub async fn run() -> Result<()> {
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();

    let _guard = init_tracing();

    native::run(args.params).await
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());

    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .init();

    guard
}
