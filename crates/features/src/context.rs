//! Game-context join.
//!
//! Hash-joins team-game summaries to the game-perspective table on
//! (date, game_id, team) to attach opponent, location and final scores.

use hoops_core::config::JoinPolicy;
use hoops_core::{
    Error, Result, TeamGameKey, TeamGamePerspective, TeamGameSummary, TeamGameWithContext,
};
use std::collections::HashMap;
use tracing::warn;

/// Attach game context to every team-game summary.
///
/// Each summary must match exactly one perspective row. Duplicate perspective
/// keys are always an error; unmatched summaries are handled per `policy`.
pub fn attach_context(
    summaries: &[TeamGameSummary],
    perspectives: &[TeamGamePerspective],
    policy: JoinPolicy,
) -> Result<Vec<TeamGameWithContext>> {
    let mut index: HashMap<TeamGameKey, &TeamGamePerspective> =
        HashMap::with_capacity(perspectives.len());
    for row in perspectives {
        if index.insert(row.key(), row).is_some() {
            return Err(Error::data(format!(
                "duplicate game context for {} in game {} on {}",
                row.team, row.game_id, row.date
            )));
        }
    }

    let mut joined = Vec::with_capacity(summaries.len());
    let mut dropped = 0usize;

    for summary in summaries {
        let Some(ctx) = index.get(&summary.key()) else {
            match policy {
                JoinPolicy::Fail => {
                    return Err(Error::join_mismatch(format!(
                        "no game context for {} in game {} on {}",
                        summary.team, summary.game_id, summary.date
                    )));
                }
                JoinPolicy::WarnAndDrop => {
                    warn!(
                        team = %summary.team,
                        game_id = %summary.game_id,
                        date = %summary.date,
                        "dropping team-game row without game context"
                    );
                    dropped += 1;
                    continue;
                }
            }
        };

        joined.push(TeamGameWithContext {
            summary: summary.clone(),
            opponent: ctx.opponent.clone(),
            location: ctx.location,
            score: ctx.score,
            opp_score: ctx.opp_score,
        });
    }

    if dropped > 0 {
        warn!(dropped, kept = joined.len(), "game-context join was incomplete");
    }

    Ok(joined)
}
