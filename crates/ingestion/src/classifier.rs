//! Shot classification for play-by-play events.
//!
//! Maps each event to a [`ShotResult`]: no shot, or a made/missed attempt of a
//! given value. Rules are evaluated in order and the first match wins:
//! 1. a null shot outcome is not a shot attempt,
//! 2. the value is 1 for free throws, 3 for three-pointers, 2 otherwise,
//! 3. `made`/`missed` decide the result; any other outcome is malformed.

use hoops_core::{Error, EventRecord, Result, ShotOutcome, ShotResult, ShotValue};

/// Classify a single event.
pub fn classify(event: &EventRecord) -> Result<ShotResult> {
    let Some(raw) = event.shot_outcome.as_deref() else {
        return Ok(ShotResult::NoShot);
    };

    let value = if event.free_throw {
        ShotValue::FreeThrow
    } else if event.three_pt {
        ShotValue::Three
    } else {
        ShotValue::Two
    };

    match ShotOutcome::parse(raw) {
        Some(ShotOutcome::Made) => Ok(ShotResult::Made(value)),
        Some(ShotOutcome::Missed) => Ok(ShotResult::Missed(value)),
        None => Err(Error::malformed_event(&event.game_id, raw)),
    }
}

/// Statistics about the classified event stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationStats {
    /// Total events classified.
    pub total_events: u64,
    /// Events without a team in possession.
    pub non_possession_events: u64,
    /// Events that are not shot attempts.
    pub no_shot_events: u64,
    /// Shot attempts (field goals and free throws).
    pub shot_attempts: u64,
    /// Made shots (field goals and free throws).
    pub made_shots: u64,
    /// Free-throw attempts.
    pub free_throws: u64,
    /// Three-point attempts.
    pub three_pointers: u64,
    /// Points scored across all made shots.
    pub points: u64,
}

impl ClassificationStats {
    /// Fraction of attempts that were made.
    pub fn make_rate(&self) -> f64 {
        if self.shot_attempts > 0 {
            self.made_shots as f64 / self.shot_attempts as f64
        } else {
            0.0
        }
    }

    /// Fraction of events that carry no possession.
    pub fn non_possession_frac(&self) -> f64 {
        if self.total_events > 0 {
            self.non_possession_events as f64 / self.total_events as f64
        } else {
            0.0
        }
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn record(&mut self, event: &EventRecord, result: ShotResult) {
        self.total_events += 1;
        if !event.is_possession_event() {
            self.non_possession_events += 1;
        }
        match result.value() {
            None => self.no_shot_events += 1,
            Some(value) => {
                self.shot_attempts += 1;
                match value {
                    ShotValue::FreeThrow => self.free_throws += 1,
                    ShotValue::Three => self.three_pointers += 1,
                    ShotValue::Two => {}
                }
            }
        }
        if let ShotResult::Made(value) = result {
            self.made_shots += 1;
            self.points += u64::from(value.points());
        }
    }
}

/// Classifier that keeps running statistics over everything it has seen.
#[derive(Debug, Default)]
pub struct ShotClassifier {
    stats: ClassificationStats,
}

impl ShotClassifier {
    /// Create a new shot classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a single event.
    pub fn classify(&mut self, event: &EventRecord) -> Result<ShotResult> {
        let result = classify(event)?;
        self.stats.record(event, result);
        Ok(result)
    }

    /// Classify a batch of events, stopping at the first malformed one.
    pub fn classify_batch(&mut self, events: &[EventRecord]) -> Result<Vec<ShotResult>> {
        events.iter().map(|e| self.classify(e)).collect()
    }

    /// Get the current statistics.
    pub fn stats(&self) -> &ClassificationStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_event(outcome: Option<&str>, free_throw: bool, three_pt: bool) -> EventRecord {
        EventRecord {
            game_id: "401169778".to_string(),
            date: NaiveDate::from_ymd_opt(2019, 11, 5).unwrap(),
            poss_before: Some("Duke".to_string()),
            poss_number: Some(1),
            shot_outcome: outcome.map(str::to_string),
            free_throw,
            three_pt,
            loc_x: None,
            loc_y: None,
            shooter: None,
            team: None,
        }
    }

    #[test]
    fn test_no_outcome_is_no_shot() {
        let event = make_event(None, true, true);
        assert_eq!(classify(&event).unwrap(), ShotResult::NoShot);
    }

    #[test]
    fn test_shot_values() {
        assert_eq!(
            classify(&make_event(Some("made"), false, false)).unwrap(),
            ShotResult::Made(ShotValue::Two)
        );
        assert_eq!(
            classify(&make_event(Some("made"), false, true)).unwrap(),
            ShotResult::Made(ShotValue::Three)
        );
        assert_eq!(
            classify(&make_event(Some("missed"), true, false)).unwrap(),
            ShotResult::Missed(ShotValue::FreeThrow)
        );
    }

    #[test]
    fn test_free_throw_wins_over_three() {
        // Free-throw rule is evaluated first.
        let event = make_event(Some("made"), true, true);
        assert_eq!(classify(&event).unwrap(), ShotResult::Made(ShotValue::FreeThrow));
    }

    #[test]
    fn test_malformed_outcome() {
        let event = make_event(Some("blocked"), false, false);
        match classify(&event) {
            Err(Error::MalformedEvent { game_id, value }) => {
                assert_eq!(game_id, "401169778");
                assert_eq!(value, "blocked");
            }
            other => panic!("expected malformed event, got {:?}", other),
        }
    }

    #[test]
    fn test_stats() {
        let mut classifier = ShotClassifier::new();
        let mut admin = make_event(None, false, false);
        admin.poss_before = None;

        let events = vec![
            make_event(Some("made"), false, true),
            make_event(Some("missed"), false, false),
            make_event(Some("made"), true, false),
            admin,
        ];
        classifier.classify_batch(&events).unwrap();

        let stats = classifier.stats();
        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.non_possession_events, 1);
        assert_eq!(stats.no_shot_events, 1);
        assert_eq!(stats.shot_attempts, 3);
        assert_eq!(stats.made_shots, 2);
        assert_eq!(stats.free_throws, 1);
        assert_eq!(stats.three_pointers, 1);
        assert_eq!(stats.points, 4);
        assert!((stats.make_rate() - 2.0 / 3.0).abs() < 1e-10);

        classifier.reset_stats();
        assert_eq!(classifier.stats().total_events, 0);
    }

    #[test]
    fn test_batch_stops_on_malformed() {
        let mut classifier = ShotClassifier::new();
        let events = vec![
            make_event(Some("made"), false, false),
            make_event(Some("???"), false, false),
        ];
        assert!(classifier.classify_batch(&events).is_err());
    }
}
