//! Vehicle Decoder
//!
//! A thin web front-end over two external decoding services.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │               VEHICLE DECODER                 │
//!                        │                                               │
//!   POST /decode         │  ┌─────────┐    ┌──────────┐    ┌──────────┐ │      VIN service
//!   ─────────────────────┼─▶│  http   │───▶│  decode  │───▶│transport │─┼────▶ (vPIC)
//!                        │  │ server  │    │  router  │    │ (reqwest)│ │
//!                        │  └─────────┘    └──────────┘    └──────────┘ │      Plate service
//!   DecodeResult (JSON)  │       ▲              │                       ─┼────▶ (API key)
//!   ◀────────────────────┼───────┴──────────────┘                        │
//!                        │                                               │
//!                        │  config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use vehicle_decoder::config::load_startup_config;
use vehicle_decoder::lifecycle::{startup, Shutdown};
use vehicle_decoder::observability::logging;

#[derive(Parser)]
#[command(name = "vehicle-decoder")]
#[command(about = "Decode vehicles by VIN or license plate", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "DECODER_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configured bind address port.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_startup_config(cli.config.as_deref(), |name| std::env::var(name).ok())?;
    if let Some(port) = cli.port {
        config.listener.set_port(port);
    }

    logging::init_tracing(&config.observability.log_level);
    tracing::info!("vehicle-decoder v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

