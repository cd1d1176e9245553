//! PyO3 bindings for hoops-analytics.
//!
//! Exposes the Rust aggregation pipeline to Python:
//! - Event classification
//! - Possession and team-game summaries
//! - Offensive/defensive efficiency
//!
//! Dates cross the boundary as `YYYY-MM-DD` strings.

use std::collections::HashMap;

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use hoops_core::{
    Config as RustConfig,
    DefensiveEfficiency as RustDefensiveEfficiency,
    EventRecord as RustEventRecord,
    GameDictionary,
    GameResult as RustGameResult,
    OffensiveEfficiency as RustOffensiveEfficiency,
    PossessionSummary as RustPossessionSummary,
    TeamGameSummary as RustTeamGameSummary,
};
use hoops_core::config::JoinPolicy;
use hoops_features::{AggregatedTables as RustAggregatedTables, Aggregator};

fn to_py_err(e: hoops_core::Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_date(s: &str) -> PyResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| PyValueError::new_err(format!("invalid date {:?}: {}", s, e)))
}

fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

// ============================================================================
// Python-exposed Types
// ============================================================================

/// One play-by-play event.
#[pyclass]
#[derive(Clone)]
pub struct EventRecord {
    #[pyo3(get, set)]
    pub game_id: String,
    #[pyo3(get, set)]
    pub date: String,
    #[pyo3(get, set)]
    pub poss_before: Option<String>,
    #[pyo3(get, set)]
    pub poss_number: Option<u32>,
    #[pyo3(get, set)]
    pub shot_outcome: Option<String>,
    #[pyo3(get, set)]
    pub free_throw: bool,
    #[pyo3(get, set)]
    pub three_pt: bool,
    #[pyo3(get, set)]
    pub loc_x: Option<f64>,
    #[pyo3(get, set)]
    pub loc_y: Option<f64>,
    #[pyo3(get, set)]
    pub shooter: Option<String>,
    #[pyo3(get, set)]
    pub team: Option<String>,
}

#[pymethods]
impl EventRecord {
    #[new]
    #[pyo3(signature = (game_id, date, poss_before=None, poss_number=None, shot_outcome=None, free_throw=false, three_pt=false, loc_x=None, loc_y=None, shooter=None, team=None))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        game_id: String,
        date: String,
        poss_before: Option<String>,
        poss_number: Option<u32>,
        shot_outcome: Option<String>,
        free_throw: bool,
        three_pt: bool,
        loc_x: Option<f64>,
        loc_y: Option<f64>,
        shooter: Option<String>,
        team: Option<String>,
    ) -> Self {
        EventRecord {
            game_id,
            date,
            poss_before,
            poss_number,
            shot_outcome,
            free_throw,
            three_pt,
            loc_x,
            loc_y,
            shooter,
            team,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "EventRecord(game_id={}, poss_before={:?}, poss_number={:?}, shot_outcome={:?})",
            self.game_id, self.poss_before, self.poss_number, self.shot_outcome
        )
    }
}

impl EventRecord {
    fn to_rust(&self) -> PyResult<RustEventRecord> {
        Ok(RustEventRecord {
            game_id: self.game_id.clone(),
            date: parse_date(&self.date)?,
            poss_before: self.poss_before.clone(),
            poss_number: self.poss_number,
            shot_outcome: self.shot_outcome.clone(),
            free_throw: self.free_throw,
            three_pt: self.three_pt,
            loc_x: self.loc_x,
            loc_y: self.loc_y,
            shooter: self.shooter.clone(),
            team: self.team.clone(),
        })
    }
}

/// Final result of one game.
#[pyclass]
#[derive(Clone)]
pub struct GameResult {
    #[pyo3(get, set)]
    pub date: String,
    #[pyo3(get, set)]
    pub home: String,
    #[pyo3(get, set)]
    pub away: String,
    #[pyo3(get, set)]
    pub home_score: u32,
    #[pyo3(get, set)]
    pub away_score: u32,
}

#[pymethods]
impl GameResult {
    #[new]
    fn new(date: String, home: String, away: String, home_score: u32, away_score: u32) -> Self {
        GameResult { date, home, away, home_score, away_score }
    }

    fn __repr__(&self) -> String {
        format!(
            "GameResult({} {} - {} {}, {})",
            self.home, self.home_score, self.away_score, self.away, self.date
        )
    }
}

impl GameResult {
    fn to_rust(&self) -> PyResult<RustGameResult> {
        Ok(RustGameResult {
            date: parse_date(&self.date)?,
            home: self.home.clone(),
            away: self.away.clone(),
            home_score: self.home_score,
            away_score: self.away_score,
        })
    }
}

/// Shot totals for one possession.
#[pyclass]
#[derive(Clone)]
pub struct PossessionSummary {
    #[pyo3(get)]
    pub date: String,
    #[pyo3(get)]
    pub game_id: String,
    #[pyo3(get)]
    pub team: String,
    #[pyo3(get)]
    pub poss_number: Option<u32>,
    #[pyo3(get)]
    pub fgm: u32,
    #[pyo3(get)]
    pub fga: u32,
    #[pyo3(get)]
    pub ftm: u32,
    #[pyo3(get)]
    pub fta: u32,
    #[pyo3(get)]
    pub points: u32,
}

#[pymethods]
impl PossessionSummary {
    fn __repr__(&self) -> String {
        format!(
            "PossessionSummary(game_id={}, team={}, poss_number={:?}, points={})",
            self.game_id, self.team, self.poss_number, self.points
        )
    }
}

impl From<RustPossessionSummary> for PossessionSummary {
    fn from(p: RustPossessionSummary) -> Self {
        PossessionSummary {
            date: format_date(p.date),
            game_id: p.game_id,
            team: p.team,
            poss_number: p.poss_number,
            fgm: p.fgm,
            fga: p.fga,
            ftm: p.ftm,
            fta: p.fta,
            points: p.points,
        }
    }
}

/// Possession totals for one team in one game.
#[pyclass]
#[derive(Clone)]
pub struct TeamGameSummary {
    #[pyo3(get)]
    pub date: String,
    #[pyo3(get)]
    pub game_id: String,
    #[pyo3(get)]
    pub team: String,
    #[pyo3(get)]
    pub poss: u32,
    #[pyo3(get)]
    pub fgm: u32,
    #[pyo3(get)]
    pub fga: u32,
    #[pyo3(get)]
    pub ftm: u32,
    #[pyo3(get)]
    pub fta: u32,
    #[pyo3(get)]
    pub points: u32,
    #[pyo3(get)]
    pub pts_per_poss: f64,
}

#[pymethods]
impl TeamGameSummary {
    fn __repr__(&self) -> String {
        format!(
            "TeamGameSummary(game_id={}, team={}, poss={}, pts_per_poss={:.3})",
            self.game_id, self.team, self.poss, self.pts_per_poss
        )
    }
}

impl From<RustTeamGameSummary> for TeamGameSummary {
    fn from(s: RustTeamGameSummary) -> Self {
        TeamGameSummary {
            date: format_date(s.date),
            game_id: s.game_id,
            team: s.team,
            poss: s.poss,
            fgm: s.fgm,
            fga: s.fga,
            ftm: s.ftm,
            fta: s.fta,
            points: s.points,
            pts_per_poss: s.pts_per_poss,
        }
    }
}

/// Season points per possession scored.
#[pyclass]
#[derive(Clone)]
pub struct OffensiveEfficiency {
    #[pyo3(get)]
    pub team: String,
    #[pyo3(get)]
    pub games: u32,
    #[pyo3(get)]
    pub poss: u32,
    #[pyo3(get)]
    pub off_pts_per_poss: f64,
}

#[pymethods]
impl OffensiveEfficiency {
    fn __repr__(&self) -> String {
        format!("OffensiveEfficiency(team={}, off_pts_per_poss={:.3})", self.team, self.off_pts_per_poss)
    }
}

impl From<RustOffensiveEfficiency> for OffensiveEfficiency {
    fn from(o: RustOffensiveEfficiency) -> Self {
        OffensiveEfficiency {
            team: o.team,
            games: o.games,
            poss: o.poss,
            off_pts_per_poss: o.off_pts_per_poss,
        }
    }
}

/// Season points per possession allowed.
#[pyclass]
#[derive(Clone)]
pub struct DefensiveEfficiency {
    #[pyo3(get)]
    pub team: String,
    #[pyo3(get)]
    pub games: u32,
    #[pyo3(get)]
    pub poss: u32,
    #[pyo3(get)]
    pub def_pts_per_poss: f64,
}

#[pymethods]
impl DefensiveEfficiency {
    fn __repr__(&self) -> String {
        format!("DefensiveEfficiency(team={}, def_pts_per_poss={:.3})", self.team, self.def_pts_per_poss)
    }
}

impl From<RustDefensiveEfficiency> for DefensiveEfficiency {
    fn from(d: RustDefensiveEfficiency) -> Self {
        DefensiveEfficiency {
            team: d.team,
            games: d.games,
            poss: d.poss,
            def_pts_per_poss: d.def_pts_per_poss,
        }
    }
}

/// Tables produced by `Aggregator.run`.
#[pyclass]
#[derive(Clone)]
pub struct AggregatedTables {
    #[pyo3(get)]
    pub possessions: Vec<PossessionSummary>,
    #[pyo3(get)]
    pub team_games: Vec<TeamGameSummary>,
    #[pyo3(get)]
    pub offense: Vec<OffensiveEfficiency>,
    #[pyo3(get)]
    pub defense: Vec<DefensiveEfficiency>,
}

#[pymethods]
impl AggregatedTables {
    fn __repr__(&self) -> String {
        format!(
            "AggregatedTables(possessions={}, team_games={}, teams={})",
            self.possessions.len(),
            self.team_games.len(),
            self.offense.len()
        )
    }
}

impl From<RustAggregatedTables> for AggregatedTables {
    fn from(t: RustAggregatedTables) -> Self {
        AggregatedTables {
            possessions: t.possessions.into_iter().map(|p| p.into()).collect(),
            team_games: t.team_games.into_iter().map(|s| s.into()).collect(),
            offense: t.offense.into_iter().map(|o| o.into()).collect(),
            defense: t.defense.into_iter().map(|d| d.into()).collect(),
        }
    }
}

// ============================================================================
// Python-exposed Engine Classes
// ============================================================================

/// Season aggregation pipeline.
#[pyclass(name = "Aggregator")]
pub struct PyAggregator {
    inner: Aggregator,
}

#[pymethods]
impl PyAggregator {
    #[new]
    #[pyo3(signature = (lenient_join=false, shot_chart_bin_size=2.0))]
    fn new(lenient_join: bool, shot_chart_bin_size: f64) -> PyResult<Self> {
        let mut config = RustConfig::default();
        if lenient_join {
            config.aggregation.join_policy = JoinPolicy::WarnAndDrop;
        }
        config.shot_chart.bin_size = shot_chart_bin_size;
        config.validate().map_err(to_py_err)?;
        Ok(PyAggregator {
            inner: Aggregator::new(&config),
        })
    }

    /// Aggregate events against a `{game_id: GameResult}` dictionary.
    fn run(&self, events: Vec<EventRecord>, games: HashMap<String, GameResult>) -> PyResult<AggregatedTables> {
        let events = events
            .iter()
            .map(EventRecord::to_rust)
            .collect::<PyResult<Vec<_>>>()?;

        let mut dictionary = GameDictionary::new();
        for (game_id, game) in games {
            dictionary.insert(game_id, game.to_rust()?);
        }

        self.inner
            .run(&events, &dictionary)
            .map(|t| t.into())
            .map_err(to_py_err)
    }
}

/// Classify one event as `(shot_made, shot_value, points)`; all `None` for no shot.
#[pyfunction]
fn classify_event(event: &EventRecord) -> PyResult<(Option<bool>, Option<u8>, Option<u8>)> {
    let result = hoops_ingestion::classify(&event.to_rust()?).map_err(to_py_err)?;
    Ok(result.as_tuple())
}

// ============================================================================
// Module Definition
// ============================================================================

/// Hoops Analytics - possession and efficiency tables from play-by-play data.
#[pymodule]
fn hoops_analytics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Types
    m.add_class::<EventRecord>()?;
    m.add_class::<GameResult>()?;
    m.add_class::<PossessionSummary>()?;
    m.add_class::<TeamGameSummary>()?;
    m.add_class::<OffensiveEfficiency>()?;
    m.add_class::<DefensiveEfficiency>()?;
    m.add_class::<AggregatedTables>()?;

    // Engine classes
    m.add_class::<PyAggregator>()?;
    m.add_function(wrap_pyfunction!(classify_event, m)?)?;

    Ok(())
}
