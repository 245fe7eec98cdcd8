use clap::Parser;
use rig_server::cli::Cli;
use rig_server::{bootstrap, commands};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bootstrap::init_tracing(cli.quiet, cli.verbose)?;
    let config = bootstrap::load_config(cli.config.as_deref())?;
    commands::dispatch(cli, config).await
}
