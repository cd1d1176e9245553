//! Season reports for the hoops-analytics workspace.
//!
//! This crate provides:
//! - A full season run over loaded events and game results
//! - Reconciliation of charted points against final scores
//! - JSON table output for charting code

pub mod reconcile;
pub mod report;
pub mod writer;

pub use reconcile::{reconcile_scores, ScoreDiscrepancy};
pub use report::{ReportSummary, SeasonReport};
pub use writer::TableWriter;
