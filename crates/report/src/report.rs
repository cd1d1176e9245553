//! Season report.
//!
//! Runs the aggregator over a season of events and reconciles the result
//! against final scores.

use crate::reconcile::{reconcile_scores, ScoreDiscrepancy};
use hoops_core::{Config, Error, EventRecord, GameDictionary, Result};
use hoops_features::{AggregatedTables, Aggregator};
use hoops_ingestion::{load_events, load_games};
use serde::Serialize;
use tracing::info;

/// Headline counts for a season run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Events loaded.
    pub events: u64,
    /// Events without a team in possession.
    pub non_possession_events: u64,
    /// Possession rows.
    pub possessions: usize,
    /// Team-game rows.
    pub team_games: usize,
    /// Games in the dictionary.
    pub games: usize,
    /// Teams with an efficiency row.
    pub teams: usize,
    /// Points summed over every possession.
    pub total_points: u64,
    /// Team-games whose charted points differ from the final score.
    pub discrepancies: usize,
}

/// Full result of a season run.
#[derive(Debug, Clone)]
pub struct SeasonReport {
    pub tables: AggregatedTables,
    pub discrepancies: Vec<ScoreDiscrepancy>,
    pub summary: ReportSummary,
}

impl SeasonReport {
    /// Build a report from in-memory inputs.
    pub fn build(config: &Config, events: &[EventRecord], games: &GameDictionary) -> Result<Self> {
        let tables = Aggregator::new(config).run(events, games)?;
        let discrepancies = reconcile_scores(&tables.team_games_context);

        let summary = ReportSummary {
            events: tables.classification.total_events,
            non_possession_events: tables.classification.non_possession_events,
            possessions: tables.possessions.len(),
            team_games: tables.team_games.len(),
            games: games.len(),
            teams: tables.efficiency.len(),
            total_points: tables.possessions.iter().map(|p| u64::from(p.points)).sum(),
            discrepancies: discrepancies.len(),
        };

        info!(
            possessions = summary.possessions,
            team_games = summary.team_games,
            discrepancies = summary.discrepancies,
            "season report built"
        );

        Ok(Self {
            tables,
            discrepancies,
            summary,
        })
    }

    /// Load inputs from the paths in `config.data` and build a report.
    pub fn from_config(config: &Config) -> Result<Self> {
        let events_path = config
            .data
            .events_path
            .as_ref()
            .ok_or_else(|| Error::config("data.events_path is not set"))?;
        let games_path = config
            .data
            .games_path
            .as_ref()
            .ok_or_else(|| Error::config("data.games_path is not set"))?;

        let events = load_events(events_path)?;
        let games = load_games(games_path)?;
        Self::build(config, &events, &games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hoops_core::GameResult;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, 7).unwrap()
    }

    fn shot(team: &str, poss_number: u32, outcome: &str, three_pt: bool) -> EventRecord {
        EventRecord {
            game_id: "g1".to_string(),
            date: date(),
            poss_before: Some(team.to_string()),
            poss_number: Some(poss_number),
            shot_outcome: Some(outcome.to_string()),
            free_throw: false,
            three_pt,
            loc_x: None,
            loc_y: None,
            shooter: None,
            team: Some(team.to_string()),
        }
    }

    fn games(home_score: u32, away_score: u32) -> GameDictionary {
        let mut games = GameDictionary::new();
        games.insert(
            "g1".to_string(),
            GameResult {
                date: date(),
                home: "Duke".to_string(),
                away: "UNC".to_string(),
                home_score,
                away_score,
            },
        );
        games
    }

    #[test]
    fn test_build_summary() {
        let events = vec![
            shot("Duke", 1, "made", true),
            shot("UNC", 2, "made", false),
            shot("Duke", 3, "missed", false),
        ];

        let report = SeasonReport::build(&Config::default(), &events, &games(3, 2)).unwrap();
        assert_eq!(report.summary.events, 3);
        assert_eq!(report.summary.possessions, 3);
        assert_eq!(report.summary.team_games, 2);
        assert_eq!(report.summary.games, 1);
        assert_eq!(report.summary.teams, 2);
        assert_eq!(report.summary.total_points, 5);
        assert!(report.discrepancies.is_empty());
    }

    #[test]
    fn test_discrepancy_counted() {
        let events = vec![shot("Duke", 1, "made", true), shot("UNC", 2, "made", false)];
        let report = SeasonReport::build(&Config::default(), &events, &games(5, 2)).unwrap();
        assert_eq!(report.summary.discrepancies, 1);
        assert_eq!(report.discrepancies[0].team, "Duke");
    }

    #[test]
    fn test_from_config_requires_paths() {
        let err = SeasonReport::from_config(&Config::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
