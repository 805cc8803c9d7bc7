//! Probe runner for the live-detail pipeline
//!
//! Runs one end-to-end resolution against the real source and prints the
//! envelope as pretty JSON. Useful for checking that the catalog URLs and the
//! extraction selectors still match the live pages.
//!
//! Usage: live_details_probe <disease_label> [plant_name]
//! Example: live_details_probe Tomato___Late_blight Tomato

use plantix_live::application::live_details::{LiveDetailRequest, LiveDetailService};
use plantix_live::infrastructure::config::AppConfig;
use plantix_live::infrastructure::logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load("plantix-live.json").await?;
    logging::init_logging_with_config(&config.logging)?;

    let mut args = std::env::args().skip(1);
    let disease_label = args
        .next()
        .unwrap_or_else(|| "Tomato___Late_blight".to_string());
    let plant_name = args.next();

    info!("Probing live details for '{}'", disease_label);

    let service = LiveDetailService::from_config(&config)?;

    let request = LiveDetailRequest {
        disease_name: disease_label.clone(),
        disease_label: Some(disease_label),
        plant_name,
    };

    let response = service.fetch_live_details(&request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.ok {
        info!("Pipeline degraded: {}", response.message);
    }
    Ok(())
}
