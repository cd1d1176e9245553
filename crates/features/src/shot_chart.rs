//! Shot chart binning.
//!
//! Bins field-goal attempts into square court cells keyed by integer cell
//! index. Free throws and events without a location are ignored.

use hoops_core::{EventRecord, ShotChart, ShotChartCell, ShotResult, Team};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default)]
struct CellCounts {
    fga: u32,
    fgm: u32,
}

/// Builder for a binned shot chart.
#[derive(Debug, Clone)]
pub struct ShotChartBuilder {
    /// Cell edge length.
    bin_size: f64,
    /// Only count shots by this team (team in possession).
    team: Option<Team>,
    cells: BTreeMap<(i32, i32), CellCounts>,
}

impl ShotChartBuilder {
    /// Create a new builder. `bin_size` must be positive.
    pub fn new(bin_size: f64, team: Option<Team>) -> Self {
        Self {
            bin_size,
            team,
            cells: BTreeMap::new(),
        }
    }

    /// Cell index for a coordinate.
    fn bin_index(&self, coord: f64) -> i32 {
        (coord / self.bin_size).floor() as i32
    }

    /// Add a classified event. Returns whether it was counted.
    pub fn add(&mut self, event: &EventRecord, result: ShotResult) -> bool {
        let Some(value) = result.value() else {
            return false;
        };
        if value.is_free_throw() {
            return false;
        }
        let Some(shooting_team) = event.poss_before.as_ref() else {
            return false;
        };
        if self.team.as_ref().is_some_and(|t| t != shooting_team) {
            return false;
        }
        let Some((x, y)) = event.location() else {
            return false;
        };

        let key = (self.bin_index(x), self.bin_index(y));
        let cell = self.cells.entry(key).or_default();
        cell.fga += 1;
        if result.shot_made() == Some(true) {
            cell.fgm += 1;
        }
        true
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Build the chart, cells ordered by (x_bin, y_bin).
    pub fn build(&self) -> ShotChart {
        let cells = self
            .cells
            .iter()
            .map(|(&(x_bin, y_bin), counts)| ShotChartCell {
                x_bin,
                y_bin,
                x: (x_bin as f64 + 0.5) * self.bin_size,
                y: (y_bin as f64 + 0.5) * self.bin_size,
                fga: counts.fga,
                fgm: counts.fgm,
                fg_pct: counts.fgm as f64 / counts.fga as f64,
            })
            .collect();

        ShotChart {
            team: self.team.clone(),
            bin_size: self.bin_size,
            cells,
        }
    }

    /// Clear all counts.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
