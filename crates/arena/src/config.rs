//! Arena configuration file
//!
//! ```toml
//! games = 20
//! depth = 2
//! mode = "2v2"
//! engines = ["classical", "random:7"]
//!
//! [rules.four_player]
//! terrain_quota = 4
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use terra_core::{GameMode, RulesConfig};

use crate::error::ArenaError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Games per pairing
    pub games: u32,
    /// Search depth handed to every engine
    pub depth: u8,
    /// Plies before a game is scored as a draw
    pub max_plies: u32,
    #[serde(with = "mode_tag")]
    pub mode: GameMode,
    /// Base seed for the deployment presets; game `n` uses `seed + n / 2`
    pub seed: u64,
    /// Engine specs (`classical`, `random:SEED`, ...). Every pair plays.
    pub engines: Vec<String>,
    pub elo_file: String,
    /// Where to write the JSON report, if anywhere
    pub results_file: Option<String>,
    pub verbose: bool,
    pub rules: RulesConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: 10,
            depth: 2,
            max_plies: 300,
            mode: GameMode::TwoNorthSouth,
            seed: 0,
            engines: vec!["classical".to_string(), "random".to_string()],
            elo_file: "arena_elo.json".to_string(),
            results_file: None,
            verbose: true,
            rules: RulesConfig::default(),
        }
    }
}

impl ArenaConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ArenaError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArenaError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ArenaError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Every unordered pair of configured engines, in file order.
    pub fn pairings(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (i, a) in self.engines.iter().enumerate() {
            for b in &self.engines[i + 1..] {
                pairs.push((a.as_str(), b.as_str()));
            }
        }
        pairs
    }
}

/// Modes are written by their short tag (`ns`, `ew`, `ffa`, `2v2`).
mod mode_tag {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use terra_core::GameMode;

    pub fn serialize<S: Serializer>(mode: &GameMode, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(mode.tag())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<GameMode, D::Error> {
        let tag = String::deserialize(d)?;
        GameMode::from_tag(&tag).ok_or_else(|| D::Error::custom(format!("unknown mode `{tag}`")))
    }
}
