use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};

use wxpaper::{Station, StationConfig, VERSION, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = StationConfig::load_from_path(config_path).context("Failed to load configuration")?;
    logging::init_tracing(&config.logging)?;

    info!(
        version = VERSION,
        location = %config.location.name,
        coordinates = %config.location.format_coordinates(),
        "wxpaper starting"
    );

    let mut station = Station::from_config(&config).context("Failed to set up station")?;
    station
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Cannot listen for Ctrl-C, running until killed");
                std::future::pending::<()>().await;
            }
        })
        .await
        .map_err(|e| anyhow::anyhow!("{}: {e}", e.user_message()))
}
