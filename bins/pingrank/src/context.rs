//! Per-invocation settings: configuration file merged with CLI overrides.

use crate::{AnchorArg, InputArgs};
use anyhow::{Context as _, Result};
use pingrank_core::config::{AnchorMode, Config};
use pingrank_core::{AnchorStrategy, ProcessedBatch, Table};
use pingrank_geo::Coordinate;
use pingrank_telemetry::{metrics, timed_span, TelemetryConfig, Timer};

/// Settings shared by every command
pub struct Context {
    pub config: Config,
}

impl Context {
    /// Load configuration and start logging
    pub fn load(config_path: Option<&str>, verbose: bool) -> Result<Self> {
        let config = Config::load(config_path)?;

        let level = if verbose {
            "pingrank=debug,pingrank_core=debug".to_string()
        } else {
            config.schema.logging.level.clone()
        };
        pingrank_telemetry::init_with_config(TelemetryConfig::with_level(level))?;

        Ok(Self { config })
    }

    /// Reference point: CLI flags win over the configuration file
    pub fn reference(&self, input: &InputArgs) -> Coordinate {
        let configured = self.config.schema.reference;
        Coordinate::new(
            input.lat.unwrap_or(configured.latitude),
            input.lon.unwrap_or(configured.longitude),
        )
    }

    /// Nearby radius in kilometers
    pub fn radius_km(&self, radius: Option<f64>) -> f64 {
        radius.unwrap_or(self.config.schema.nearby.radius_km)
    }

    /// Anchor strategy: CLI flags win over the configuration file
    pub fn anchor_strategy(&self, anchor: Option<AnchorArg>, timestamp_column: Option<String>) -> AnchorStrategy {
        let mut nearby = self.config.schema.nearby.clone();
        if let Some(anchor) = anchor {
            nearby.anchor = match anchor {
                AnchorArg::LastRow => AnchorMode::LastRow,
                AnchorArg::LatestTimestamp => AnchorMode::LatestTimestamp,
            };
        }
        if let Some(column) = timestamp_column {
            nearby.timestamp_column = column;
        }
        nearby.anchor_strategy()
    }

    /// App URL for share links
    pub fn app_url<'a>(&'a self, url: Option<&'a str>) -> &'a str {
        url.unwrap_or(&self.config.schema.share.app_url)
    }

    /// Read the input file and rank it
    pub fn load_batch(&self, input: &InputArgs) -> Result<ProcessedBatch> {
        let spinner = pingrank_cli::progress::spinner("Ranking records...");

        let table = {
            timed_span!("read_csv");
            Table::from_path(&input.file)
                .with_context(|| format!("reading {}", input.file.display()))
        };
        let table = match table {
            Ok(table) => table,
            Err(e) => {
                pingrank_cli::progress::finish_clear(&spinner);
                return Err(e);
            }
        };
        metrics().increment_by("rows_read", table.len() as u64);

        let timer = Timer::start("process");
        let batch = pingrank_core::process(&table, self.reference(input));
        timer.stop();
        pingrank_cli::progress::finish_clear(&spinner);

        let batch = batch?;
        metrics().increment_by("rows_ranked", batch.ranked().len() as u64);
        metrics().increment_by("rows_skipped", batch.skipped() as u64);

        Ok(batch)
    }
}
