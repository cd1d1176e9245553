//! Core data types for the hoops-analytics workspace.
//!
//! Every derived table row serializes with the column names charting code
//! reads (`fgm`, `pts_per_poss`, `off_pts_per_poss`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Opaque game identifier.
pub type GameId = String;

/// Team name as it appears in the play-by-play feed.
pub type Team = String;

/// Game result dictionary keyed by game id.
pub type GameDictionary = BTreeMap<GameId, GameResult>;

/// Accept a game id written either as a string or as an integer.
fn game_id_from_str_or_int<'de, D>(deserializer: D) -> std::result::Result<GameId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawGameId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match RawGameId::deserialize(deserializer)? {
        RawGameId::Text(s) => s,
        RawGameId::Unsigned(n) => n.to_string(),
        RawGameId::Signed(n) => n.to_string(),
    })
}

/// A single charted play-by-play event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Game the event belongs to.
    #[serde(deserialize_with = "game_id_from_str_or_int")]
    pub game_id: GameId,
    /// Game date.
    pub date: NaiveDate,
    /// Team in possession before the event. `None` for non-possession events.
    #[serde(default)]
    pub poss_before: Option<Team>,
    /// Possession sequence number within the game.
    #[serde(default)]
    pub poss_number: Option<u32>,
    /// Raw shot outcome text (`made`, `missed` or absent).
    #[serde(default)]
    pub shot_outcome: Option<String>,
    /// Whether the shot was a free throw.
    #[serde(default)]
    pub free_throw: bool,
    /// Whether the shot was a three-point attempt.
    #[serde(default)]
    pub three_pt: bool,
    /// Shot location, horizontal axis.
    #[serde(default)]
    pub loc_x: Option<f64>,
    /// Shot location, vertical axis.
    #[serde(default)]
    pub loc_y: Option<f64>,
    /// Shooter name.
    #[serde(default)]
    pub shooter: Option<String>,
    /// Team of the player involved in the event.
    #[serde(default)]
    pub team: Option<Team>,
}

impl EventRecord {
    /// Whether the event belongs to a possession.
    #[inline]
    pub fn is_possession_event(&self) -> bool {
        self.poss_before.is_some()
    }

    /// Grouping key for the possession this event belongs to.
    pub fn possession_key(&self) -> Option<PossessionKey> {
        let team = self.poss_before.as_ref()?;
        Some(PossessionKey {
            date: self.date,
            game_id: self.game_id.clone(),
            team: team.clone(),
            poss_number: self.poss_number,
        })
    }

    /// Shot location if both coordinates are present.
    pub fn location(&self) -> Option<(f64, f64)> {
        Some((self.loc_x?, self.loc_y?))
    }
}

/// Parsed shot outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotOutcome {
    Made,
    Missed,
}

impl ShotOutcome {
    /// Parse the feed's outcome text. Only the exact values `made` and
    /// `missed` are recognized.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "made" => Some(ShotOutcome::Made),
            "missed" => Some(ShotOutcome::Missed),
            _ => None,
        }
    }
}

/// Point value of a shot attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ShotValue {
    FreeThrow = 1,
    Two = 2,
    Three = 3,
}

impl ShotValue {
    /// Points awarded when the shot is made.
    #[inline]
    pub fn points(self) -> u8 {
        self as u8
    }

    /// Whether this is a free throw (as opposed to a field goal).
    #[inline]
    pub fn is_free_throw(self) -> bool {
        self == ShotValue::FreeThrow
    }
}

/// Classification of a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotResult {
    /// Not a scored shot attempt.
    NoShot,
    /// Missed attempt of the given value.
    Missed(ShotValue),
    /// Made attempt of the given value.
    Made(ShotValue),
}

impl ShotResult {
    /// `Some(true)` if made, `Some(false)` if missed, `None` for no shot.
    pub fn shot_made(self) -> Option<bool> {
        match self {
            ShotResult::NoShot => None,
            ShotResult::Missed(_) => Some(false),
            ShotResult::Made(_) => Some(true),
        }
    }

    /// Shot value (1, 2 or 3) of an attempt.
    pub fn shot_value(self) -> Option<u8> {
        self.value().map(ShotValue::points)
    }

    /// Points scored: 0 for a miss, the shot value for a make.
    pub fn points(self) -> Option<u8> {
        match self {
            ShotResult::NoShot => None,
            ShotResult::Missed(_) => Some(0),
            ShotResult::Made(v) => Some(v.points()),
        }
    }

    /// The `(shot_made, shot_value, points)` tuple.
    pub fn as_tuple(self) -> (Option<bool>, Option<u8>, Option<u8>) {
        (self.shot_made(), self.shot_value(), self.points())
    }

    /// Typed shot value of an attempt.
    pub fn value(self) -> Option<ShotValue> {
        match self {
            ShotResult::NoShot => None,
            ShotResult::Missed(v) | ShotResult::Made(v) => Some(v),
        }
    }
}

/// Composite key of a possession.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PossessionKey {
    pub date: NaiveDate,
    pub game_id: GameId,
    pub team: Team,
    pub poss_number: Option<u32>,
}

/// Composite key of a team's game.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamGameKey {
    pub date: NaiveDate,
    pub game_id: GameId,
    pub team: Team,
}

/// Shot and scoring summary of one possession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossessionSummary {
    pub date: NaiveDate,
    pub game_id: GameId,
    /// Team in possession (`poss_before`).
    pub team: Team,
    pub poss_number: Option<u32>,
    /// Field goals made (free throws excluded).
    pub fgm: u32,
    /// Field goals attempted (free throws excluded).
    pub fga: u32,
    /// Free throws made.
    pub ftm: u32,
    /// Free throws attempted.
    pub fta: u32,
    /// Three-pointers made.
    pub fg3m: u32,
    /// Three-pointers attempted.
    pub fg3a: u32,
    /// Points scored in the possession.
    pub points: u32,
}

impl PossessionSummary {
    /// Team-game key this possession rolls up into.
    pub fn team_game_key(&self) -> TeamGameKey {
        TeamGameKey {
            date: self.date,
            game_id: self.game_id.clone(),
            team: self.team.clone(),
        }
    }

    /// Points implied by the made-shot counts.
    pub fn expected_points(&self) -> u32 {
        self.ftm + 2 * (self.fgm - self.fg3m) + 3 * self.fg3m
    }
}

/// Per-game, per-team rate statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamGameSummary {
    pub date: NaiveDate,
    pub game_id: GameId,
    pub team: Team,
    /// Number of possessions.
    pub poss: u32,
    pub fgm: u32,
    pub fga: u32,
    pub ftm: u32,
    pub fta: u32,
    pub fg3m: u32,
    pub fg3a: u32,
    pub points: u32,
    /// `points / poss`.
    pub pts_per_poss: f64,
}

impl TeamGameSummary {
    /// Join key.
    pub fn key(&self) -> TeamGameKey {
        TeamGameKey {
            date: self.date,
            game_id: self.game_id.clone(),
            team: self.team.clone(),
        }
    }
}

/// One entry of the external game result dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub date: NaiveDate,
    pub home: Team,
    pub away: Team,
    pub home_score: u32,
    pub away_score: u32,
}

/// Home/away flag from a team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Home,
    Away,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Home => "home",
            Location::Away => "away",
        }
    }
}

/// A game seen from one team's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGamePerspective {
    pub date: NaiveDate,
    pub game_id: GameId,
    pub team: Team,
    pub opponent: Team,
    pub location: Location,
    /// The team's final score.
    pub score: u32,
    /// The opponent's final score.
    pub opp_score: u32,
}

impl TeamGamePerspective {
    /// Join key.
    pub fn key(&self) -> TeamGameKey {
        TeamGameKey {
            date: self.date,
            game_id: self.game_id.clone(),
            team: self.team.clone(),
        }
    }
}

/// Team-game summary with opponent and location attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamGameWithContext {
    #[serde(flatten)]
    pub summary: TeamGameSummary,
    pub opponent: Team,
    pub location: Location,
    pub score: u32,
    pub opp_score: u32,
}

/// Offensive efficiency of a team across its games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffensiveEfficiency {
    pub team: Team,
    /// Number of team-game rows.
    pub games: u32,
    /// Total possessions.
    pub poss: u32,
    /// Possession-weighted points per possession.
    pub off_pts_per_poss: f64,
}

/// Defensive efficiency: points per possession allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefensiveEfficiency {
    pub team: Team,
    pub games: u32,
    pub poss: u32,
    pub def_pts_per_poss: f64,
}

/// Offense and defense side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEfficiency {
    pub team: Team,
    /// Offensive games, or defensive games for teams only seen as opponents.
    pub games: u32,
    pub off_pts_per_poss: Option<f64>,
    pub def_pts_per_poss: Option<f64>,
    /// `off_pts_per_poss - def_pts_per_poss`.
    pub net_pts_per_poss: Option<f64>,
}

/// Free-throw attempts per game for a team and its opponents at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeThrowRate {
    pub team: Team,
    pub location: Location,
    pub games: u32,
    pub fta_per_game: f64,
    pub opp_fta_per_game: f64,
}

/// One cell of a binned shot chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotChartCell {
    /// Cell index along x.
    pub x_bin: i32,
    /// Cell index along y.
    pub y_bin: i32,
    /// Cell center, x.
    pub x: f64,
    /// Cell center, y.
    pub y: f64,
    pub fga: u32,
    pub fgm: u32,
    pub fg_pct: f64,
}

/// Field-goal attempts binned by court location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotChart {
    pub team: Option<Team>,
    pub bin_size: f64,
    pub cells: Vec<ShotChartCell>,
}

impl ShotChart {
    /// Total attempts across all cells.
    pub fn total_fga(&self) -> u32 {
        self.cells.iter().map(|c| c.fga).sum()
    }
}

/// Fixed-width histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
}

/// Descriptive statistics and histogram of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub median: Option<f64>,
    pub max: Option<f64>,
    pub bins: Vec<HistogramBin>,
}

impl DistributionSummary {
    /// Summary of an empty column.
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: None,
            std_dev: None,
            min: None,
            median: None,
            max: None,
            bins: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 11, 5).unwrap()
    }

    #[test]
    fn test_shot_outcome_parse() {
        assert_eq!(ShotOutcome::parse("made"), Some(ShotOutcome::Made));
        assert_eq!(ShotOutcome::parse("missed"), Some(ShotOutcome::Missed));
        assert_eq!(ShotOutcome::parse(" MADE "), None);
        assert_eq!(ShotOutcome::parse("Missed"), None);
        assert_eq!(ShotOutcome::parse("blocked"), None);
        assert_eq!(ShotOutcome::parse(""), None);
    }

    #[test]
    fn test_event_game_id_string_or_number() {
        let text = r#"{"game_id": 401169778, "date": "2019-11-05"}"#;
        let event: EventRecord = serde_json::from_str(text).unwrap();
        assert_eq!(event.game_id, "401169778");

        let text = r#"{"game_id": "g-12", "date": "2019-11-05"}"#;
        let event: EventRecord = serde_json::from_str(text).unwrap();
        assert_eq!(event.game_id, "g-12");

        let text = r#"{"game_id": 1.5, "date": "2019-11-05"}"#;
        assert!(serde_json::from_str::<EventRecord>(text).is_err());
    }

    #[test]
    fn test_shot_result_tuple() {
        assert_eq!(ShotResult::NoShot.as_tuple(), (None, None, None));
        assert_eq!(
            ShotResult::Missed(ShotValue::Three).as_tuple(),
            (Some(false), Some(3), Some(0))
        );
        assert_eq!(
            ShotResult::Made(ShotValue::FreeThrow).as_tuple(),
            (Some(true), Some(1), Some(1))
        );
        assert_eq!(ShotResult::Made(ShotValue::Two).points(), Some(2));
    }

    #[test]
    fn test_possession_key_requires_team() {
        let mut event = EventRecord {
            game_id: "401169778".to_string(),
            date: date(),
            poss_before: None,
            poss_number: Some(3),
            shot_outcome: None,
            free_throw: false,
            three_pt: false,
            loc_x: None,
            loc_y: None,
            shooter: None,
            team: None,
        };
        assert!(event.possession_key().is_none());

        event.poss_before = Some("Duke".to_string());
        let key = event.possession_key().unwrap();
        assert_eq!(key.team, "Duke");
        assert_eq!(key.poss_number, Some(3));
    }

    #[test]
    fn test_expected_points() {
        let row = PossessionSummary {
            date: date(),
            game_id: "1".to_string(),
            team: "A".to_string(),
            poss_number: Some(1),
            fgm: 2,
            fga: 3,
            ftm: 1,
            fta: 2,
            fg3m: 1,
            fg3a: 1,
            points: 6,
        };
        assert_eq!(row.expected_points(), 6);
    }

    #[test]
    fn test_context_serializes_flat() {
        let row = TeamGameWithContext {
            summary: TeamGameSummary {
                date: date(),
                game_id: "1".to_string(),
                team: "A".to_string(),
                poss: 2,
                fgm: 1,
                fga: 2,
                ftm: 0,
                fta: 0,
                fg3m: 0,
                fg3a: 0,
                points: 2,
                pts_per_poss: 1.0,
            },
            opponent: "B".to_string(),
            location: Location::Home,
            score: 70,
            opp_score: 65,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["pts_per_poss"], 1.0);
        assert_eq!(value["opponent"], "B");
        assert_eq!(value["location"], "home");
        assert_eq!(value["date"], "2019-11-05");
    }
}
