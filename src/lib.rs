//! ip_tracker library: IP address and domain geolocation lookup
//!
//! This library looks up geolocation metadata (IP, ISP, city, region, postal
//! code, timezone, coordinates) for an IP address or a domain through an
//! ipify-compatible HTTP API, and shows the result on a map view.
//!
//! # Example
//!
//! ```no_run
//! use ip_tracker::map::RecordingSurface;
//! use ip_tracker::{Config, Tracker};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     api_base_url: "https://geo.ipify.org/api/v2/country,city?apiKey=".into(),
//!     api_key: std::env::var("IPIFY_API_KEY")?,
//!     ..Default::default()
//! };
//!
//! let tracker = Tracker::from_config(&config)?;
//! tracker.mount_map(RecordingSurface::new());
//! let result = tracker.submit("8.8.8.8").await?;
//! println!("{} is in {}", result.ip, result.location.city);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
mod error_handling;
pub mod initialization;
pub mod lookup;
pub mod map;
pub mod query;
mod tracker;

// Re-export public API
pub use config::{Config, ConfigValidationError, LogFormat, LogLevel, MarkerPolicy};
pub use error_handling::{
    FailureKind, InitializationError, LookupError, LookupStats, TrackerError,
};
pub use lookup::{GeoClient, Location, LookupResult};
pub use run::{run_tracker, run_tracker_to, TrackerReport};
pub use tracker::{Tracker, TrackerState};

// Internal run module (contains the CLI run loop)
mod run {
    use std::io::{IsTerminal, Write};
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::{info, warn};

    use crate::app::{print_lookup_statistics, read_queries, render_panel, render_panel_plain};
    use crate::config::{Config, LogFormat};
    use crate::lookup::LookupResult;
    use crate::map::TerminalSurface;
    use crate::tracker::Tracker;

    /// Results of a tracker run.
    #[derive(Debug, Clone)]
    pub struct TrackerReport {
        /// Number of queries submitted (excluding the initial own-IP lookup)
        pub submitted: usize,
        /// Number of submitted queries that produced a result
        pub succeeded: usize,
        /// Number of submitted queries that raised the error flag
        pub failed: usize,
        /// Public IP found by the initial lookup, if it ran and succeeded
        pub own_ip: Option<String>,
        /// Result displayed when the run ended
        pub last_result: Option<LookupResult>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the tracker and prints to stdout.
    ///
    /// Colors are used when stdout is a terminal and the log format is plain.
    ///
    /// # Errors
    ///
    /// Fails before any lookup when the configuration is invalid or the query
    /// file cannot be read. Lookup failures never abort the run.
    pub async fn run_tracker(config: Config) -> Result<TrackerReport> {
        let styled =
            std::io::stdout().is_terminal() && matches!(config.log_format, LogFormat::Plain);
        run_tracker_to(config, &mut std::io::stdout(), styled).await
    }

    /// Runs the tracker, writing panels and map summaries to `out`.
    ///
    /// Mounts a [`TerminalSurface`], performs the own-IP lookup unless
    /// disabled, then submits every query in order: positional queries first,
    /// then those read from `config.file`.
    pub async fn run_tracker_to<W: Write>(
        config: Config,
        out: &mut W,
        styled: bool,
    ) -> Result<TrackerReport> {
        let tracker: Tracker<TerminalSurface> =
            Tracker::from_config(&config).context("Failed to initialize tracker")?;

        let mut queries = config.queries.clone();
        if let Some(path) = &config.file {
            queries.extend(read_queries(path).await?);
        }
        info!("{} quer{} to look up", queries.len(), if queries.len() == 1 { "y" } else { "ies" });

        let start_time = Instant::now();
        tracker.mount_map(TerminalSurface::new());

        let mut own_ip = None;
        if config.no_self_lookup {
            info!("Skipping own IP lookup");
        } else {
            match tracker.load_initial().await {
                Ok(result) => {
                    own_ip = Some(result.ip);
                    print_view(&tracker, out, styled)?;
                }
                Err(e) => warn!("Initial lookup failed: {}", e),
            }
        }

        let mut succeeded = 0usize;
        let mut failed = 0usize;
        for query in &queries {
            writeln!(out, "> {}", query.trim())?;
            match tracker.submit(query).await {
                Ok(_) => succeeded += 1,
                Err(e) if e.sets_error_flag() => failed += 1,
                Err(e) => warn!("Query '{}' produced no result: {}", query, e),
            }
            print_view(&tracker, out, styled)?;
        }

        print_lookup_statistics(&tracker.stats());

        Ok(TrackerReport {
            submitted: queries.len(),
            succeeded,
            failed,
            own_ip,
            last_result: tracker.result(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    fn print_view<W: Write>(
        tracker: &Tracker<TerminalSurface>,
        out: &mut W,
        styled: bool,
    ) -> Result<()> {
        let state = tracker.state();
        let panel = if styled {
            render_panel(&state)
        } else {
            render_panel_plain(&state)
        };
        writeln!(out, "{panel}")?;

        if let Some(summary) = tracker.with_map(|view| view.surface().summary()) {
            if !summary.is_empty() {
                writeln!(out, "{summary}")?;
            }
        }
        writeln!(out)?;
        Ok(())
    }
}
