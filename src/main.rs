//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ip_tracker` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing summary output
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ip_tracker::app::summary_line;
use ip_tracker::initialization::init_logger_with;
use ip_tracker::{run_tracker, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // IPIFY_API_URL / IPIFY_API_KEY may live in a .env file, either in the
    // current directory or next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = config.validate() {
        eprintln!("ip_tracker error: {e}");
        process::exit(1);
    }

    match run_tracker(config).await {
        Ok(report) => {
            println!(
                "{}",
                summary_line(
                    report.submitted,
                    report.succeeded,
                    report.failed,
                    report.elapsed_seconds
                )
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("ip_tracker error: {:#}", e);
            process::exit(1);
        }
    }
}
