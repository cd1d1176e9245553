//! Team efficiency rollups.
//!
//! Offensive efficiency groups team-game rows by `team`; defensive efficiency
//! runs the same possession-weighted mean grouped by `opponent`, i.e. over the
//! performances a team allowed.

use hoops_core::{
    DefensiveEfficiency, OffensiveEfficiency, Team, TeamEfficiency, TeamGameSummary,
    TeamGameWithContext,
};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Possession-weighted mean of points per possession.
#[derive(Debug, Clone, Copy, Default)]
struct WeightedMean {
    weighted_sum: f64,
    poss: u32,
    games: u32,
}

impl WeightedMean {
    fn add(&mut self, summary: &TeamGameSummary) {
        self.weighted_sum += summary.pts_per_poss * summary.poss as f64;
        self.poss += summary.poss;
        self.games += 1;
    }

    fn value(&self) -> f64 {
        // Every added row carries poss >= 1.
        self.weighted_sum / self.poss as f64
    }
}

fn weighted_by<'a, I, F>(rows: I, key: F) -> BTreeMap<Team, WeightedMean>
where
    I: IntoIterator<Item = &'a TeamGameWithContext>,
    F: Fn(&'a TeamGameWithContext) -> &'a Team,
{
    let mut groups: BTreeMap<Team, WeightedMean> = BTreeMap::new();
    for row in rows {
        groups.entry(key(row).clone()).or_default().add(&row.summary);
    }
    groups
}

/// Offensive points per possession per team.
pub fn offensive_efficiency<'a>(
    rows: impl IntoIterator<Item = &'a TeamGameSummary>,
) -> Vec<OffensiveEfficiency> {
    let mut groups: BTreeMap<Team, WeightedMean> = BTreeMap::new();
    for row in rows {
        groups.entry(row.team.clone()).or_default().add(row);
    }

    groups
        .into_iter()
        .map(|(team, mean)| OffensiveEfficiency {
            team,
            games: mean.games,
            poss: mean.poss,
            off_pts_per_poss: mean.value(),
        })
        .collect()
}

/// Points per possession allowed per team.
pub fn defensive_efficiency(rows: &[TeamGameWithContext]) -> Vec<DefensiveEfficiency> {
    weighted_by(rows, |r| &r.opponent)
        .into_iter()
        .map(|(team, mean)| DefensiveEfficiency {
            team,
            games: mean.games,
            poss: mean.poss,
            def_pts_per_poss: mean.value(),
        })
        .collect()
}

/// Offense and defense side by side, best net rating first.
///
/// Teams that only appear as opponents (their own events were not charted)
/// keep a defensive rating and no offensive one.
pub fn team_efficiency(rows: &[TeamGameWithContext]) -> Vec<TeamEfficiency> {
    let offense = weighted_by(rows, |r| &r.summary.team);
    let defense = weighted_by(rows, |r| &r.opponent);

    let mut teams: Vec<&Team> = offense.keys().chain(defense.keys()).collect();
    teams.sort();
    teams.dedup();

    let mut table: Vec<TeamEfficiency> = teams
        .into_iter()
        .map(|team| {
            let off = offense.get(team);
            let def = defense.get(team);
            let off_pts_per_poss = off.map(WeightedMean::value);
            let def_pts_per_poss = def.map(WeightedMean::value);
            TeamEfficiency {
                team: team.clone(),
                games: off.or(def).map_or(0, |m| m.games),
                off_pts_per_poss,
                def_pts_per_poss,
                net_pts_per_poss: off_pts_per_poss.zip(def_pts_per_poss).map(|(o, d)| o - d),
            }
        })
        .collect();

    table.sort_by(|a, b| match (a.net_pts_per_poss, b.net_pts_per_poss) {
        (Some(x), Some(y)) => OrderedFloat(y).cmp(&OrderedFloat(x)).then_with(|| a.team.cmp(&b.team)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.team.cmp(&b.team),
    });

    table
}
