//! Arena results storage and reporting

use std::path::Path;

use serde::{Deserialize, Serialize};
use terra_core::GameMode;

use crate::config::ArenaConfig;
use crate::elo::MatchResult;
use crate::error::ArenaError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResults {
    pub name: String,
    pub participants: Vec<String>,
    pub matches: Vec<MatchEntry>,
    pub config: TournamentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub engine_a: String,
    pub engine_b: String,
    pub result: MatchResult,
}

/// The settings a report was produced under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub games_per_match: u32,
    pub search_depth: u8,
    pub max_plies: u32,
    pub mode: GameMode,
    pub seed: u64,
}

impl From<&ArenaConfig> for TournamentConfig {
    fn from(config: &ArenaConfig) -> Self {
        Self {
            games_per_match: config.games,
            search_depth: config.depth,
            max_plies: config.max_plies,
            mode: config.mode,
            seed: config.seed,
        }
    }
}

impl TournamentResults {
    pub fn new(name: &str, participants: Vec<String>, config: TournamentConfig) -> Self {
        Self {
            name: name.to_string(),
            participants,
            matches: Vec::new(),
            config,
        }
    }

    pub fn add_match(&mut self, engine_a: &str, engine_b: &str, result: MatchResult) {
        self.matches.push(MatchEntry {
            engine_a: engine_a.to_string(),
            engine_b: engine_b.to_string(),
            result,
        });
    }

    /// Total score per participant over every match, best first
    pub fn standings(&self) -> Vec<(String, f64)> {
        let mut standings: Vec<(String, f64)> =
            self.participants.iter().map(|p| (p.clone(), 0.0)).collect();
        for entry in &self.matches {
            let draws = 0.5 * entry.result.draws as f64;
            for (name, points) in [
                (&entry.engine_a, entry.result.wins as f64 + draws),
                (&entry.engine_b, entry.result.losses as f64 + draws),
            ] {
                if let Some(slot) = standings.iter_mut().find(|(p, _)| p == name) {
                    slot.1 += points;
                }
            }
        }
        standings.sort_by(|a, b| b.1.total_cmp(&a.1));
        standings
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArenaError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| ArenaError::io(path, e))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArenaError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ArenaError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Arena: {} ===\n\n", self.name));
        report.push_str(&format!("Participants: {}\n", self.participants.join(", ")));
        report.push_str(&format!(
            "Config: {} games/match, depth {}, mode {}, seed {}\n\n",
            self.config.games_per_match,
            self.config.search_depth,
            self.config.mode.tag(),
            self.config.seed
        ));

        report.push_str("Results:\n");
        report.push_str(&format!(
            "{:<20} vs {:<20} {:>5}-{:<5}-{:<5}\n",
            "Engine A", "Engine B", "W", "L", "D"
        ));
        report.push_str(&"-".repeat(60));
        report.push('\n');
        for entry in &self.matches {
            report.push_str(&format!(
                "{:<20} vs {:<20} {:>5}-{:<5}-{:<5}\n",
                entry.engine_a,
                entry.engine_b,
                entry.result.wins,
                entry.result.losses,
                entry.result.draws
            ));
        }

        report.push_str("\nStandings:\n");
        for (name, points) in self.standings() {
            report.push_str(&format!("{name:<20} {points:>6.1}\n"));
        }
        report
    }
}
