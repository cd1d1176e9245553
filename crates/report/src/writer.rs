//! JSON table output.
//!
//! Each table is written as a JSON array of row objects whose keys are the
//! column names charting code reads.

use crate::report::SeasonReport;
use hoops_core::config::OutputConfig;
use hoops_core::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes derived tables to an output directory.
#[derive(Debug, Clone)]
pub struct TableWriter {
    dir: PathBuf,
    pretty: bool,
}

impl TableWriter {
    /// Create a writer for `dir`.
    pub fn new(dir: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            dir: dir.into(),
            pretty,
        }
    }

    /// Create a writer from output configuration.
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.dir.clone(), config.pretty)
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one serializable value to `<dir>/<name>.json`.
    pub fn write_table<T: Serialize + ?Sized>(&self, name: &str, table: &T) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.json", name));

        let mut out = BufWriter::new(File::create(&path)?);
        if self.pretty {
            serde_json::to_writer_pretty(&mut out, table)?;
        } else {
            serde_json::to_writer(&mut out, table)?;
        }
        out.write_all(b"\n")?;
        out.flush()?;

        debug!(path = %path.display(), "wrote table");
        Ok(path)
    }

    /// Write every table of a season report. Returns the written paths.
    pub fn write_report(&self, report: &SeasonReport) -> Result<Vec<PathBuf>> {
        let t = &report.tables;
        Ok(vec![
            self.write_table("possessions", &t.possessions)?,
            self.write_table("team_games", &t.team_games)?,
            self.write_table("team_games_context", &t.team_games_context)?,
            self.write_table("offense", &t.offense)?,
            self.write_table("defense", &t.defense)?,
            self.write_table("efficiency", &t.efficiency)?,
            self.write_table("free_throw_rates", &t.free_throw_rates)?,
            self.write_table("shot_chart", &t.shot_chart)?,
            self.write_table("pts_per_poss_distribution", &t.pts_per_poss_distribution)?,
            self.write_table("score_discrepancies", &report.discrepancies)?,
            self.write_table("summary", &report.summary)?,
        ])
    }
}
