//! Free-throw rates by team and location.
//!
//! For each (team, home/away) pair: free-throw attempts per game for the team
//! and for its opponents in the same games.

use hoops_core::{FreeThrowRate, Location, Team, TeamGameKey, TeamGameWithContext};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
struct RateAccumulator {
    games: u32,
    fta: u32,
    opp_fta: u32,
}

impl RateAccumulator {
    fn to_rate(self, team: Team, location: Location) -> FreeThrowRate {
        let games = self.games as f64;
        FreeThrowRate {
            team,
            location,
            games: self.games,
            fta_per_game: self.fta as f64 / games,
            opp_fta_per_game: self.opp_fta as f64 / games,
        }
    }
}

/// Compute free-throw rates.
///
/// The opponent's attempts come from the opponent's own team-game row. Every
/// input row already carries game context, so an opponent without a row had
/// no charted possessions and counts as zero attempts.
pub fn free_throw_rates(rows: &[TeamGameWithContext]) -> Vec<FreeThrowRate> {
    let fta_by_key: HashMap<TeamGameKey, u32> = rows
        .iter()
        .map(|r| (r.summary.key(), r.summary.fta))
        .collect();

    let mut groups: BTreeMap<(Team, Location), RateAccumulator> = BTreeMap::new();

    for row in rows {
        let opp_key = TeamGameKey {
            date: row.summary.date,
            game_id: row.summary.game_id.clone(),
            team: row.opponent.clone(),
        };
        let opp_fta = match fta_by_key.get(&opp_key) {
            Some(&fta) => fta,
            None => {
                debug!(
                    team = %row.summary.team,
                    opponent = %row.opponent,
                    game_id = %row.summary.game_id,
                    "opponent has no charted possessions"
                );
                0
            }
        };

        let acc = groups
            .entry((row.summary.team.clone(), row.location))
            .or_default();
        acc.games += 1;
        acc.fta += row.summary.fta;
        acc.opp_fta += opp_fta;
    }

    groups
        .into_iter()
        .map(|((team, location), acc)| acc.to_rate(team, location))
        .collect()
}
