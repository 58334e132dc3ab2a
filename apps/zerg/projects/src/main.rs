use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use zerg_projects::AppConfig;

/// Projects gRPC service
#[derive(Debug, Parser)]
#[command(name = "zerg-projects", version, about)]
struct Args {
    /// Path to a YAML config file. Without it, defaults plus GRPC_HOST/GRPC_PORT apply.
    #[arg(short, long, env = "CONFIG_PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref()).wrap_err("Failed to load configuration")?;

    init_tracing(&config.logging).wrap_err("Failed to initialize logging")?;

    zerg_projects::run(config).await
}
