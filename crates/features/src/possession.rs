//! Possession aggregation.
//!
//! Groups classified events by (date, game_id, poss_before, poss_number) and
//! summarizes each group's shots and points.

use hoops_core::{EventRecord, PossessionKey, PossessionSummary, Result, ShotResult, ShotValue};
use hoops_ingestion::{ClassificationStats, ShotClassifier};
use std::collections::BTreeMap;
use tracing::debug;

/// Shot counters for a possession being built.
#[derive(Debug, Clone, Default)]
struct PossessionAccumulator {
    fgm: u32,
    fga: u32,
    ftm: u32,
    fta: u32,
    fg3m: u32,
    fg3a: u32,
    points: u32,
}

impl PossessionAccumulator {
    fn add(&mut self, result: ShotResult) {
        match result {
            ShotResult::NoShot => {}
            ShotResult::Missed(value) => self.attempt(value),
            ShotResult::Made(value) => {
                self.attempt(value);
                match value {
                    ShotValue::FreeThrow => self.ftm += 1,
                    ShotValue::Two => self.fgm += 1,
                    ShotValue::Three => {
                        self.fgm += 1;
                        self.fg3m += 1;
                    }
                }
                self.points += u32::from(value.points());
            }
        }
    }

    fn attempt(&mut self, value: ShotValue) {
        match value {
            ShotValue::FreeThrow => self.fta += 1,
            ShotValue::Two => self.fga += 1,
            ShotValue::Three => {
                self.fga += 1;
                self.fg3a += 1;
            }
        }
    }

    fn to_summary(&self, key: &PossessionKey) -> PossessionSummary {
        PossessionSummary {
            date: key.date,
            game_id: key.game_id.clone(),
            team: key.team.clone(),
            poss_number: key.poss_number,
            fgm: self.fgm,
            fga: self.fga,
            ftm: self.ftm,
            fta: self.fta,
            fg3m: self.fg3m,
            fg3a: self.fg3a,
            points: self.points,
        }
    }
}

/// Builder for possession summaries from play-by-play events.
///
/// Every event is classified, so a malformed shot outcome fails the run even
/// when it sits on a non-possession event. Only events with a team in
/// possession open or extend a possession row.
#[derive(Debug, Default)]
pub struct PossessionBuilder {
    possessions: BTreeMap<PossessionKey, PossessionAccumulator>,
    classifier: ShotClassifier,
    skipped_events: u64,
}

impl PossessionBuilder {
    /// Create a new possession builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event. Returns its classification.
    pub fn add_event(&mut self, event: &EventRecord) -> Result<ShotResult> {
        let result = self.classifier.classify(event)?;

        match event.possession_key() {
            Some(key) => self.possessions.entry(key).or_default().add(result),
            None => self.skipped_events += 1,
        }

        Ok(result)
    }

    /// Add multiple events.
    pub fn add_events(&mut self, events: &[EventRecord]) -> Result<()> {
        for event in events {
            self.add_event(event)?;
        }
        Ok(())
    }

    /// Number of distinct possessions seen so far.
    pub fn possession_count(&self) -> usize {
        self.possessions.len()
    }

    /// Events dropped for having no team in possession.
    pub fn skipped_events(&self) -> u64 {
        self.skipped_events
    }

    /// Classification statistics over every event added.
    pub fn stats(&self) -> &ClassificationStats {
        self.classifier.stats()
    }

    /// Summaries for every possession, in key order.
    pub fn summaries(&self) -> Vec<PossessionSummary> {
        debug!(
            possessions = self.possessions.len(),
            skipped = self.skipped_events,
            "finalizing possessions"
        );
        self.possessions
            .iter()
            .map(|(key, acc)| acc.to_summary(key))
            .collect()
    }

    /// Clear all state.
    pub fn clear(&mut self) {
        self.possessions.clear();
        self.classifier.reset_stats();
        self.skipped_events = 0;
    }
}

/// Group events into possession summaries.
pub fn possession_summaries(events: &[EventRecord]) -> Result<Vec<PossessionSummary>> {
    let mut builder = PossessionBuilder::new();
    builder.add_events(events)?;
    Ok(builder.summaries())
}
