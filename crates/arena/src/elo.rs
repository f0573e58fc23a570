//! Elo ratings across arena runs

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// Starting rating for an engine the tracker has not seen
pub const DEFAULT_ELO: f64 = 1500.0;

/// K-factor for Elo updates (higher = more volatile)
pub const K_FACTOR: f64 = 32.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EloTracker {
    /// Ratings keyed by engine spec
    pub ratings: HashMap<String, f64>,
    pub games_played: HashMap<String, u32>,
    pub history: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub engine_a: String,
    pub engine_b: String,
    pub result: MatchResult,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
    pub elo_change: f64,
}

/// One game from the first engine's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// The same game seen from the other side
    pub fn flipped(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, game: GameResult) {
        match game {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// 1 per win and 0.5 per draw, averaged over the games played
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

impl EloTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArenaError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ArenaError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// A missing file starts a fresh tracker; a corrupt one is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ArenaError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArenaError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| ArenaError::io(path, e))
    }

    pub fn rating(&self, engine: &str) -> f64 {
        self.ratings.get(engine).copied().unwrap_or(DEFAULT_ELO)
    }

    /// Expected score of `engine_a` against `engine_b`
    pub fn expected_score(&self, engine_a: &str, engine_b: &str) -> f64 {
        let ra = self.rating(engine_a);
        let rb = self.rating(engine_b);
        1.0 / (1.0 + 10.0_f64.powf((rb - ra) / 400.0))
    }

    pub fn update_ratings(&mut self, engine_a: &str, engine_b: &str, result: &MatchResult) {
        let expected = self.expected_score(engine_a, engine_b);
        let games = result.total_games() as f64;
        let elo_change = K_FACTOR * games * (result.score() - expected);

        let ra = self.rating(engine_a);
        let rb = self.rating(engine_b);
        self.ratings.insert(engine_a.to_string(), ra + elo_change);
        self.ratings.insert(engine_b.to_string(), rb - elo_change);

        *self.games_played.entry(engine_a.to_string()).or_insert(0) += result.total_games();
        *self.games_played.entry(engine_b.to_string()).or_insert(0) += result.total_games();

        self.history.push(MatchRecord {
            engine_a: engine_a.to_string(),
            engine_b: engine_b.to_string(),
            result: result.clone(),
            timestamp: unix_now(),
            elo_change,
        });
    }

    /// (engine, rating, games) sorted by rating, best first
    pub fn leaderboard(&self) -> Vec<(String, f64, u32)> {
        let mut entries: Vec<_> = self
            .ratings
            .iter()
            .map(|(name, &rating)| {
                let games = self.games_played.get(name).copied().unwrap_or(0);
                (name.clone(), rating, games)
            })
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    pub fn format_leaderboard(&self) -> String {
        let mut out = String::from("=== Engine Leaderboard ===\n");
        out.push_str(&format!("{:<30} {:>8} {:>8}\n", "Engine", "Elo", "Games"));
        out.push_str(&"-".repeat(48));
        out.push('\n');
        for (name, rating, games) in self.leaderboard() {
            out.push_str(&format!("{name:<30} {rating:>8.1} {games:>8}\n"));
        }
        out
    }
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
