//! Data ingestion and normalization for the hoops-analytics workspace.
//!
//! This crate handles:
//! - Loading play-by-play events (JSON, JSON lines, CSV)
//! - Loading the game result dictionary
//! - Shot classification (no shot / made / missed, with shot value)
//! - The game-perspective table (one row per game and team)

pub mod classifier;
pub mod games;
pub mod loader;

pub use classifier::{classify, ClassificationStats, ShotClassifier};
pub use games::game_perspectives;
pub use loader::{load_events, load_games, EventFormat};
