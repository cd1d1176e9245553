//! Aggregation engine.
//!
//! Runs every aggregation stage over one event set and one game dictionary
//! and returns all derived tables together.

use crate::{
    context::attach_context,
    distribution::summarize,
    efficiency::{defensive_efficiency, offensive_efficiency, team_efficiency},
    free_throw::free_throw_rates,
    possession::PossessionBuilder,
    shot_chart::ShotChartBuilder,
    team_game::team_game_summaries,
};
use hoops_core::config::{check_bin_width, JoinPolicy};
use hoops_core::{
    Config, DefensiveEfficiency, DistributionSummary, EventRecord, FreeThrowRate, GameDictionary,
    OffensiveEfficiency, PossessionSummary, Result, ShotChart, Team, TeamEfficiency,
    TeamGamePerspective, TeamGameSummary, TeamGameWithContext,
};
use hoops_ingestion::{game_perspectives, ClassificationStats};
use serde::Serialize;
use tracing::{debug, info};

/// Every table produced by one aggregation run.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedTables {
    pub possessions: Vec<PossessionSummary>,
    pub team_games: Vec<TeamGameSummary>,
    pub perspectives: Vec<TeamGamePerspective>,
    pub team_games_context: Vec<TeamGameWithContext>,
    pub offense: Vec<OffensiveEfficiency>,
    pub defense: Vec<DefensiveEfficiency>,
    pub efficiency: Vec<TeamEfficiency>,
    pub free_throw_rates: Vec<FreeThrowRate>,
    pub shot_chart: ShotChart,
    pub pts_per_poss_distribution: DistributionSummary,
    #[serde(skip)]
    pub classification: ClassificationStats,
}

/// Aggregation engine.
#[derive(Debug, Clone)]
pub struct Aggregator {
    join_policy: JoinPolicy,
    shot_chart_bin_size: f64,
    shot_chart_team: Option<Team>,
    pts_per_poss_bin_width: f64,
}

impl Aggregator {
    /// Create a new aggregator from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            join_policy: config.aggregation.join_policy,
            shot_chart_bin_size: config.shot_chart.bin_size,
            shot_chart_team: config.shot_chart.team.clone(),
            pts_per_poss_bin_width: config.distribution.pts_per_poss_bin_width,
        }
    }

    /// Current join policy.
    pub fn join_policy(&self) -> JoinPolicy {
        self.join_policy
    }

    /// Run every stage.
    ///
    /// Fails on the first malformed event or, under `JoinPolicy::Fail`, on the
    /// first team-game row without game context. Bin widths are checked before
    /// any event is read. Empty input yields empty tables.
    pub fn run(&self, events: &[EventRecord], games: &GameDictionary) -> Result<AggregatedTables> {
        check_bin_width("shot_chart.bin_size", self.shot_chart_bin_size)?;
        check_bin_width("distribution.pts_per_poss_bin_width", self.pts_per_poss_bin_width)?;

        let mut possessions = PossessionBuilder::new();
        let mut shots = ShotChartBuilder::new(self.shot_chart_bin_size, self.shot_chart_team.clone());

        for event in events {
            let result = possessions.add_event(event)?;
            shots.add(event, result);
        }

        let classification = possessions.stats().clone();
        debug!(
            events = classification.total_events,
            non_possession = classification.non_possession_events,
            attempts = classification.shot_attempts,
            "classified events"
        );

        let possession_rows = possessions.summaries();
        let team_games = team_game_summaries(&possession_rows);
        let perspectives = game_perspectives(games)?;
        let team_games_context = attach_context(&team_games, &perspectives, self.join_policy)?;

        let offense = offensive_efficiency(&team_games);
        let defense = defensive_efficiency(&team_games_context);
        let efficiency = team_efficiency(&team_games_context);
        let free_throw_rates = free_throw_rates(&team_games_context);

        let pts_per_poss: Vec<f64> = team_games.iter().map(|r| r.pts_per_poss).collect();
        let pts_per_poss_distribution = summarize(&pts_per_poss, self.pts_per_poss_bin_width);

        info!(
            possessions = possession_rows.len(),
            team_games = team_games.len(),
            joined = team_games_context.len(),
            teams = efficiency.len(),
            "aggregation complete"
        );

        Ok(AggregatedTables {
            possessions: possession_rows,
            team_games,
            perspectives,
            team_games_context,
            offense,
            defense,
            efficiency,
            free_throw_rates,
            shot_chart: shots.build(),
            pts_per_poss_distribution,
            classification,
        })
    }
}
