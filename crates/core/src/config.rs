//! Configuration structures for the hoops-analytics workspace.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for an analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input data locations.
    pub data: DataConfig,
    /// Aggregation behaviour.
    pub aggregation: AggregationConfig,
    /// Shot chart binning.
    pub shot_chart: ShotChartConfig,
    /// Distribution (histogram) tables.
    pub distribution: DistributionConfig,
    /// Output tables.
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a JSON file. Missing sections fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        check_bin_width("shot_chart.bin_size", self.shot_chart.bin_size)?;
        check_bin_width(
            "distribution.pts_per_poss_bin_width",
            self.distribution.pts_per_poss_bin_width,
        )?;
        Ok(())
    }
}

/// Smallest accepted bin width or cell size.
pub const MIN_BIN_WIDTH: f64 = 1e-6;

/// Reject non-finite widths and widths below [`MIN_BIN_WIDTH`].
pub fn check_bin_width(name: &str, width: f64) -> Result<()> {
    if !width.is_finite() || width < MIN_BIN_WIDTH {
        return Err(Error::config(format!(
            "{} must be a finite value of at least {}, got {}",
            name, MIN_BIN_WIDTH, width
        )));
    }
    Ok(())
}

/// Input data locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Play-by-play events (`.json`, `.ndjson`/`.jsonl` or `.csv`).
    pub events_path: Option<PathBuf>,
    /// Game result dictionary (JSON object keyed by game id).
    pub games_path: Option<PathBuf>,
}

/// What to do with a team-game row that has no game-context match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinPolicy {
    /// Fail the run with a join mismatch error.
    #[default]
    Fail,
    /// Log a warning and drop the unmatched row.
    WarnAndDrop,
}

/// Aggregation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Unmatched-row handling for the game-context join.
    pub join_policy: JoinPolicy,
}

/// Shot chart configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotChartConfig {
    /// Cell edge length, in the same units as `loc_x`/`loc_y`.
    pub bin_size: f64,
    /// Restrict the chart to one team (all teams when unset).
    pub team: Option<String>,
}

impl Default for ShotChartConfig {
    fn default() -> Self {
        Self {
            bin_size: 2.0,
            team: None,
        }
    }
}

/// Distribution table configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Histogram bin width for points per possession.
    pub pts_per_poss_bin_width: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            pts_per_poss_bin_width: 0.1,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the JSON tables are written to.
    pub dir: PathBuf,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("out"),
            pretty: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.aggregation.join_policy, JoinPolicy::Fail);
        assert_eq!(config.shot_chart.bin_size, 2.0);
        assert_eq!(config.distribution.pts_per_poss_bin_width, 0.1);
        assert!(config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"aggregation": {{"join_policy": "warn_and_drop"}}, "shot_chart": {{"team": "Duke"}}}}"#
        )
        .unwrap();

        let config = Config::from_json_file(file.path()).unwrap();
        assert_eq!(config.aggregation.join_policy, JoinPolicy::WarnAndDrop);
        assert_eq!(config.shot_chart.team.as_deref(), Some("Duke"));
        assert_eq!(config.shot_chart.bin_size, 2.0);
        assert_eq!(config.output.dir, PathBuf::from("out"));
    }

    #[test]
    fn test_rejects_invalid_bin_width() {
        let mut config = Config::default();
        config.shot_chart.bin_size = 0.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = Config::default();
        config.distribution.pts_per_poss_bin_width = 1e-12;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = Config::default();
        config.shot_chart.bin_size = f64::INFINITY;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
