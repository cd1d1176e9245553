//! Game-perspective table built from the game result dictionary.
//!
//! Every game yields two rows, one from each team's side.

use hoops_core::{Error, GameDictionary, Location, Result, TeamGamePerspective};

/// Build the per-(game, team) perspective table.
pub fn game_perspectives(games: &GameDictionary) -> Result<Vec<TeamGamePerspective>> {
    let mut rows = Vec::with_capacity(games.len() * 2);

    for (game_id, game) in games {
        if game.home == game.away {
            return Err(Error::data(format!(
                "game {} lists {} as both home and away",
                game_id, game.home
            )));
        }

        rows.push(TeamGamePerspective {
            date: game.date,
            game_id: game_id.clone(),
            team: game.home.clone(),
            opponent: game.away.clone(),
            location: Location::Home,
            score: game.home_score,
            opp_score: game.away_score,
        });
        rows.push(TeamGamePerspective {
            date: game.date,
            game_id: game_id.clone(),
            team: game.away.clone(),
            opponent: game.home.clone(),
            location: Location::Away,
            score: game.away_score,
            opp_score: game.home_score,
        });
    }

    Ok(rows)
}
