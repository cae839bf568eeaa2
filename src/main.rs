use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use six_cities::cli::Cli;
use six_cities::gateway::HttpGateway;
use six_cities::{logging, ui};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = cli.load_config().context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let log_path = logging::init_tracing(cli.log_file.as_deref());
    info!(
        base_url = %config.api.base_url,
        log_file = ?log_path,
        "Starting six-cities"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let _runtime_guard = runtime.enter();

    let gateway = Arc::new(HttpGateway::new(&config.api).context("Failed to create HTTP client")?);
    ui::run(&config, gateway, cli.route.clone()).context("Terminal UI failed")?;
    Ok(())
}
