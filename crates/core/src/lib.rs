//! Core types and configuration for the hoops-analytics workspace.
//!
//! This crate provides shared types used across all other crates:
//! - Play-by-play event records and shot classification types
//! - Derived table rows (possessions, team-games, efficiency rollups)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
