//! Self-play arena for terra engines
//!
//! This crate provides infrastructure for:
//! - Playing whole matches between engines, deployment included
//! - Tracking Elo ratings across engine versions
//! - Generating match reports
//!
//! # Usage
//!
//! ```bash
//! # Run a match between the classical and the random engine
//! cargo run -p arena -- match classical random --games 20 --depth 2
//!
//! # Run every pairing an arena file lists
//! cargo run -p arena -- --config arena.toml
//! ```

mod config;
mod elo;
mod error;
mod match_runner;
mod results;

pub use config::*;
pub use elo::*;
pub use error::*;
pub use match_runner::*;
pub use results::*;

use classical_engine::ClassicalEngine;
use random_engine::RandomEngine;
use terra_core::Engine;

/// Builds an engine from a spec such as `classical`, `classical:7` or
/// `random:42`. The optional suffix seeds the engine's tie-breaking.
pub fn create_engine(spec: &str) -> Result<Box<dyn Engine>, ArenaError> {
    let unknown = || ArenaError::UnknownEngine(spec.to_string());
    let (kind, seed) = match spec.split_once(':') {
        Some((kind, seed)) => (kind, Some(seed.parse::<u64>().map_err(|_| unknown())?)),
        None => (spec, None),
    };
    let engine: Box<dyn Engine> = match (kind.to_lowercase().as_str(), seed) {
        ("classical" | "classic", Some(seed)) => Box::new(ClassicalEngine::with_seed(seed)),
        ("classical" | "classic", None) => Box::new(ClassicalEngine::new()),
        ("random", Some(seed)) => Box::new(RandomEngine::with_seed(seed)),
        ("random", None) => Box::new(RandomEngine::new()),
        _ => return Err(unknown()),
    };
    Ok(engine)
}
