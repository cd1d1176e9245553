//! Aggregation and summary tables for the hoops-analytics workspace.
//!
//! This crate handles:
//! - Possession summaries (shots, free throws, points per possession group)
//! - Team-game rollups and points per possession
//! - Game-context join (opponent, location, final scores)
//! - Offensive/defensive efficiency and free-throw rates
//! - Shot chart binning and distribution summaries

pub mod possession;
pub mod team_game;
pub mod context;
pub mod efficiency;
pub mod free_throw;
pub mod shot_chart;
pub mod distribution;
pub mod engine;

pub use possession::{possession_summaries, PossessionBuilder};
pub use team_game::team_game_summaries;
pub use context::attach_context;
pub use efficiency::{defensive_efficiency, offensive_efficiency, team_efficiency};
pub use free_throw::free_throw_rates;
pub use shot_chart::ShotChartBuilder;
pub use distribution::summarize;
pub use engine::{AggregatedTables, Aggregator};
