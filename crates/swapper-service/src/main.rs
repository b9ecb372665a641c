//! Main entry point for the swapper service.
//!
//! This binary performs one swap through the universal router: it loads and
//! validates configuration, builds the pipeline engine, runs it once, and
//! reports the mined receipt. A transaction that was mined but reverted is
//! reported with status 0 and exits zero; only fatal errors exit non-zero.

use clap::Parser;
use std::path::PathBuf;
use swapper_config::Config;
use swapper_core::SwapEngine;
use swapper_types::with_0x_prefix;

/// Command-line arguments for the swapper service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the swapper service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the swap engine and runs the pipeline once
/// 5. Reports the mined receipt
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	let config_path = args
		.config
		.to_str()
		.ok_or("Config path is not valid UTF-8")?;
	let config = Config::from_file(config_path).await?;
	tracing::info!("Loaded configuration [{}]", config.swapper.id);

	let engine = SwapEngine::from_config(config)?;
	let receipt = engine.run().await?;

	tracing::info!(
		tx_hash = %with_0x_prefix(&hex::encode(&receipt.hash.0)),
		block = receipt.block_number,
		status = u8::from(receipt.success),
		"Swap run finished"
	);

	Ok(())
}
