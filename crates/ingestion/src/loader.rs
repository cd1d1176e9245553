//! Loading of play-by-play events and game result dictionaries.
//!
//! Events may come as a JSON array (`.json`), JSON lines (`.ndjson`/`.jsonl`)
//! or a CSV export (`.csv`). CSV exports from the upstream provider use `NA`
//! for missing values and `TRUE`/`FALSE` for flags; both are accepted here.

use chrono::NaiveDate;
use hoops_core::{Error, EventRecord, GameDictionary, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Input format for event files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFormat {
    JsonArray,
    JsonLines,
    Csv,
}

impl EventFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(EventFormat::JsonArray),
            Some("ndjson") | Some("jsonl") => Ok(EventFormat::JsonLines),
            Some("csv") => Ok(EventFormat::Csv),
            _ => Err(Error::data(format!(
                "cannot infer event format from {}",
                path.display()
            ))),
        }
    }
}

/// Load events from a file, inferring the format from its extension.
pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<EventRecord>> {
    let path = path.as_ref();
    let format = EventFormat::from_path(path)?;
    let events = match format {
        EventFormat::JsonArray => parse_events_json(&std::fs::read_to_string(path)?)?,
        EventFormat::JsonLines => parse_events_ndjson(&std::fs::read_to_string(path)?)?,
        EventFormat::Csv => read_events_csv(std::fs::File::open(path)?)?,
    };
    info!(path = %path.display(), ?format, events = events.len(), "loaded events");
    Ok(events)
}

/// Parse a JSON array of events.
pub fn parse_events_json(text: &str) -> Result<Vec<EventRecord>> {
    Ok(serde_json::from_str(text)?)
}

/// Parse JSON lines, one event per non-blank line.
pub fn parse_events_ndjson(text: &str) -> Result<Vec<EventRecord>> {
    let mut events = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let event = serde_json::from_str(line)
            .map_err(|e| Error::data(format!("line {}: {}", i + 1, e)))?;
        events.push(event);
    }
    Ok(events)
}

/// A CSV row before NA handling and type conversion.
#[derive(Debug, Deserialize)]
struct CsvEventRow {
    game_id: String,
    date: String,
    #[serde(default)]
    poss_before: Option<String>,
    #[serde(default)]
    poss_number: Option<String>,
    #[serde(default)]
    shot_outcome: Option<String>,
    #[serde(default)]
    free_throw: Option<String>,
    #[serde(default)]
    three_pt: Option<String>,
    #[serde(default)]
    loc_x: Option<String>,
    #[serde(default)]
    loc_y: Option<String>,
    #[serde(default)]
    shooter: Option<String>,
    #[serde(default)]
    team: Option<String>,
}

/// Treat empty fields and `NA` as missing.
fn present(field: Option<String>) -> Option<String> {
    field.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != "NA"
    })
}

fn parse_flag(field: Option<String>, name: &str, row: usize) -> Result<bool> {
    match present(field).as_deref().map(str::trim) {
        None => Ok(false),
        Some("TRUE") | Some("true") | Some("True") | Some("T") | Some("1") => Ok(true),
        Some("FALSE") | Some("false") | Some("False") | Some("F") | Some("0") => Ok(false),
        Some(other) => Err(Error::data(format!(
            "row {}: invalid {} value {:?}",
            row, name, other
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(field: Option<String>, name: &str, row: usize) -> Result<Option<T>> {
    match present(field) {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::data(format!("row {}: invalid {} value {:?}", row, name, v))),
    }
}

fn parse_date(field: &str, row: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(field.trim(), "%Y-%m-%d")
        .map_err(|e| Error::data(format!("row {}: invalid date {:?}: {}", row, field, e)))
}

impl CsvEventRow {
    fn into_event(self, row: usize) -> Result<EventRecord> {
        Ok(EventRecord {
            date: parse_date(&self.date, row)?,
            game_id: self.game_id,
            poss_before: present(self.poss_before),
            poss_number: parse_number(self.poss_number, "poss_number", row)?,
            shot_outcome: present(self.shot_outcome),
            free_throw: parse_flag(self.free_throw, "free_throw", row)?,
            three_pt: parse_flag(self.three_pt, "three_pt", row)?,
            loc_x: parse_number(self.loc_x, "loc_x", row)?,
            loc_y: parse_number(self.loc_y, "loc_y", row)?,
            shooter: present(self.shooter),
            team: present(self.team),
        })
    }
}

/// Read events from CSV with a header row.
pub fn read_events_csv<R: Read>(reader: R) -> Result<Vec<EventRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let mut events = Vec::new();
    for (i, record) in reader.deserialize::<CsvEventRow>().enumerate() {
        // Data rows start at line 2.
        let row = i + 2;
        events.push(record?.into_event(row)?);
    }
    debug!(rows = events.len(), "parsed csv events");
    Ok(events)
}

/// Load the game result dictionary (JSON object keyed by game id).
pub fn load_games(path: impl AsRef<Path>) -> Result<GameDictionary> {
    let path = path.as_ref();
    let games = parse_games_json(&std::fs::read_to_string(path)?)?;
    info!(path = %path.display(), games = games.len(), "loaded game dictionary");
    Ok(games)
}

/// Parse the game result dictionary.
pub fn parse_games_json(text: &str) -> Result<GameDictionary> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_path() {
        assert_eq!(EventFormat::from_path(Path::new("pbp.json")).unwrap(), EventFormat::JsonArray);
        assert_eq!(EventFormat::from_path(Path::new("pbp.JSONL")).unwrap(), EventFormat::JsonLines);
        assert_eq!(EventFormat::from_path(Path::new("pbp.csv")).unwrap(), EventFormat::Csv);
        assert!(EventFormat::from_path(Path::new("pbp.parquet")).is_err());
    }

    #[test]
    fn test_parse_json_array_defaults() {
        let text = r#"[
            {"game_id": "1", "date": "2019-11-05", "poss_before": "Duke", "poss_number": 1,
             "shot_outcome": "made", "three_pt": true, "loc_x": 10.5, "loc_y": 22.0},
            {"game_id": "1", "date": "2019-11-05"}
        ]"#;
        let events = parse_events_json(text).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].three_pt);
        assert!(!events[0].free_throw);
        assert_eq!(events[0].location(), Some((10.5, 22.0)));
        assert!(events[1].poss_before.is_none());
        assert!(events[1].shot_outcome.is_none());
    }

    #[test]
    fn test_parse_ndjson_reports_line() {
        let text = "{\"game_id\": \"1\", \"date\": \"2019-11-05\"}\n\nnot json\n";
        let err = parse_events_ndjson(text).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_read_csv_with_na() {
        let csv = "\
game_id,date,poss_before,poss_number,shot_outcome,free_throw,three_pt,loc_x,loc_y,shooter,team
1,2019-11-05,Duke,1,made,FALSE,TRUE,10.5,22,Tre Jones,Duke
1,2019-11-05,NA,NA,NA,FALSE,FALSE,NA,NA,NA,NA
1,2019-11-05,Kansas,2,missed,TRUE,FALSE,,,Devon Dotson,Kansas
";
        let events = read_events_csv(csv.as_bytes()).unwrap();
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].poss_before.as_deref(), Some("Duke"));
        assert!(events[0].three_pt);
        assert_eq!(events[0].loc_y, Some(22.0));

        assert!(events[1].poss_before.is_none());
        assert!(events[1].poss_number.is_none());
        assert!(events[1].shot_outcome.is_none());

        assert!(events[2].free_throw);
        assert!(events[2].location().is_none());
        assert_eq!(events[2].poss_number, Some(2));
    }

    #[test]
    fn test_read_csv_bad_flag() {
        let csv = "game_id,date,free_throw\n1,2019-11-05,maybe\n";
        let err = read_events_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_load_games() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"401169778": {{"date": "2019-11-05", "home": "Duke", "away": "Kansas",
                 "home_score": 68, "away_score": 66}}}}"#
        )
        .unwrap();

        let games = load_games(file.path()).unwrap();
        assert_eq!(games.len(), 1);
        let game = &games["401169778"];
        assert_eq!(game.home, "Duke");
        assert_eq!(game.away_score, 66);
    }

    #[test]
    fn test_load_events_from_file() {
        let mut file = tempfile::Builder::new().suffix(".ndjson").tempfile().unwrap();
        writeln!(file, r#"{{"game_id": "1", "date": "2019-11-05", "poss_before": "A"}}"#).unwrap();
        writeln!(file, r#"{{"game_id": "1", "date": "2019-11-05", "poss_before": "B"}}"#).unwrap();

        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].poss_before.as_deref(), Some("B"));
    }
}
