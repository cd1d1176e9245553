//! Score reconciliation.
//!
//! Compares points summed over charted possessions with the final score from
//! the game dictionary. Charted play-by-play can miss events, so mismatches
//! are reported rather than treated as errors.

use chrono::NaiveDate;
use hoops_core::{GameId, Team, TeamGameWithContext};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A team-game whose charted points differ from its final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDiscrepancy {
    pub date: NaiveDate,
    pub game_id: GameId,
    pub team: Team,
    /// Points summed over charted possessions.
    pub charted_points: u32,
    /// Final score from the game dictionary.
    pub final_score: u32,
}

impl ScoreDiscrepancy {
    /// `charted_points - final_score`.
    pub fn difference(&self) -> i64 {
        i64::from(self.charted_points) - i64::from(self.final_score)
    }
}

/// List every joined team-game row whose points differ from the final score.
pub fn reconcile_scores(rows: &[TeamGameWithContext]) -> Vec<ScoreDiscrepancy> {
    let discrepancies: Vec<ScoreDiscrepancy> = rows
        .iter()
        .filter(|r| r.summary.points != r.score)
        .map(|r| ScoreDiscrepancy {
            date: r.summary.date,
            game_id: r.summary.game_id.clone(),
            team: r.summary.team.clone(),
            charted_points: r.summary.points,
            final_score: r.score,
        })
        .collect();

    for d in &discrepancies {
        warn!(
            game_id = %d.game_id,
            team = %d.team,
            charted = d.charted_points,
            final_score = d.final_score,
            "charted points do not match final score"
        );
    }

    discrepancies
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoops_core::{Location, TeamGameSummary};

    fn make_row(team: &str, points: u32, score: u32) -> TeamGameWithContext {
        TeamGameWithContext {
            summary: TeamGameSummary {
                date: NaiveDate::from_ymd_opt(2020, 3, 7).unwrap(),
                game_id: "401182651".to_string(),
                team: team.to_string(),
                poss: 68,
                fgm: 0,
                fga: 0,
                ftm: 0,
                fta: 0,
                fg3m: 0,
                fg3a: 0,
                points,
                pts_per_poss: points as f64 / 68.0,
            },
            opponent: "X".to_string(),
            location: Location::Away,
            score,
            opp_score: 0,
        }
    }

    #[test]
    fn test_matching_scores() {
        let rows = vec![make_row("A", 78, 78), make_row("B", 70, 70)];
        assert!(reconcile_scores(&rows).is_empty());
    }

    #[test]
    fn test_mismatch_reported() {
        let rows = vec![make_row("A", 78, 78), make_row("B", 66, 70)];
        let discrepancies = reconcile_scores(&rows);

        assert_eq!(discrepancies.len(), 1);
        assert_eq!(discrepancies[0].team, "B");
        assert_eq!(discrepancies[0].difference(), -4);
    }
}
