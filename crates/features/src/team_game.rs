//! Team-game rollup.
//!
//! Re-keys possession summaries by (date, game_id, team) and computes points
//! per possession.

use hoops_core::{PossessionSummary, TeamGameKey, TeamGameSummary};
use std::collections::BTreeMap;

/// Accumulator for one team's game.
#[derive(Debug, Clone, Default)]
struct TeamGameAccumulator {
    poss: u32,
    fgm: u32,
    fga: u32,
    ftm: u32,
    fta: u32,
    fg3m: u32,
    fg3a: u32,
    points: u32,
}

impl TeamGameAccumulator {
    fn add(&mut self, row: &PossessionSummary) {
        self.poss += 1;
        self.fgm += row.fgm;
        self.fga += row.fga;
        self.ftm += row.ftm;
        self.fta += row.fta;
        self.fg3m += row.fg3m;
        self.fg3a += row.fg3a;
        self.points += row.points;
    }

    fn to_summary(&self, key: TeamGameKey) -> TeamGameSummary {
        // poss >= 1: an accumulator only exists once a possession was added.
        TeamGameSummary {
            date: key.date,
            game_id: key.game_id,
            team: key.team,
            poss: self.poss,
            fgm: self.fgm,
            fga: self.fga,
            ftm: self.ftm,
            fta: self.fta,
            fg3m: self.fg3m,
            fg3a: self.fg3a,
            points: self.points,
            pts_per_poss: self.points as f64 / self.poss as f64,
        }
    }
}

/// Roll possession summaries up to one row per (date, game_id, team).
pub fn team_game_summaries(possessions: &[PossessionSummary]) -> Vec<TeamGameSummary> {
    let mut games: BTreeMap<TeamGameKey, TeamGameAccumulator> = BTreeMap::new();

    for row in possessions {
        games.entry(row.team_game_key()).or_default().add(row);
    }

    games
        .into_iter()
        .map(|(key, acc)| acc.to_summary(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_possession(game_id: &str, team: &str, poss_number: u32, fgm: u32, fga: u32, points: u32) -> PossessionSummary {
        PossessionSummary {
            date: NaiveDate::from_ymd_opt(2019, 11, 5).unwrap(),
            game_id: game_id.to_string(),
            team: team.to_string(),
            poss_number: Some(poss_number),
            fgm,
            fga,
            ftm: 0,
            fta: 0,
            fg3m: 0,
            fg3a: 0,
            points,
        }
    }

    #[test]
    fn test_rollup() {
        let possessions = vec![
            make_possession("1", "A", 1, 1, 1, 2),
            make_possession("1", "B", 2, 0, 2, 0),
            make_possession("1", "A", 3, 0, 1, 0),
            make_possession("1", "A", 5, 1, 1, 2),
            make_possession("2", "A", 1, 1, 1, 2),
        ];

        let rows = team_game_summaries(&possessions);
        assert_eq!(rows.len(), 3);

        let a1 = rows.iter().find(|r| r.game_id == "1" && r.team == "A").unwrap();
        assert_eq!(a1.poss, 3);
        assert_eq!((a1.fgm, a1.fga, a1.points), (2, 3, 4));
        assert_relative_eq!(a1.pts_per_poss, 4.0 / 3.0);

        let b1 = rows.iter().find(|r| r.team == "B").unwrap();
        assert_eq!(b1.poss, 1);
        assert_relative_eq!(b1.pts_per_poss, 0.0);
    }

    #[test]
    fn test_poss_invariant() {
        let possessions = vec![
            make_possession("1", "A", 1, 1, 1, 2),
            make_possession("1", "B", 2, 0, 2, 0),
        ];
        for row in team_game_summaries(&possessions) {
            assert!(row.poss >= 1);
            assert_relative_eq!(row.pts_per_poss, row.points as f64 / row.poss as f64);
        }
    }

    #[test]
    fn test_empty() {
        assert!(team_game_summaries(&[]).is_empty());
    }
}
