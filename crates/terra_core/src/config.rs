//! Ruleset constants loaded from TOML.
//!
//! Terrain quotas, army sizes, tile allotments and per-type unit limits are
//! data rather than code. `RulesConfig::default()` carries the built-in
//! ruleset; a rules file only needs the keys it overrides:
//!
//! ```toml
//! mercenary = true
//!
//! [two_player]
//! terrain_quota = 8
//!
//! [two_player.tiles]
//! desert = 0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{GameMode, PieceType, TerrainType};

/// A count for every piece type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceCounts {
    pub king: u8,
    pub queen: u8,
    pub rook: u8,
    pub bishop: u8,
    pub knight: u8,
    pub pawn: u8,
}

impl PieceCounts {
    pub const fn standard(pawns: u8) -> Self {
        Self {
            king: 1,
            queen: 1,
            rook: 2,
            bishop: 2,
            knight: 2,
            pawn: pawns,
        }
    }

    pub fn get(&self, kind: PieceType) -> u8 {
        match kind {
            PieceType::King => self.king,
            PieceType::Queen => self.queen,
            PieceType::Rook => self.rook,
            PieceType::Bishop => self.bishop,
            PieceType::Knight => self.knight,
            PieceType::Pawn => self.pawn,
        }
    }

    pub fn total(&self) -> u32 {
        PieceType::ALL.iter().map(|&k| self.get(k) as u32).sum()
    }
}

impl Default for PieceCounts {
    fn default() -> Self {
        Self::standard(8)
    }
}

/// A count for every placeable (non-flat) terrain type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileCounts {
    pub forest: u8,
    pub swamp: u8,
    pub mountain: u8,
    pub desert: u8,
}

impl TileCounts {
    pub fn get(&self, terrain: TerrainType) -> u8 {
        match terrain {
            TerrainType::Flat => 0,
            TerrainType::Forest => self.forest,
            TerrainType::Swamp => self.swamp,
            TerrainType::Mountain => self.mountain,
            TerrainType::Desert => self.desert,
        }
    }

    pub fn total(&self) -> u32 {
        TerrainType::ALL.iter().map(|&t| self.get(t) as u32).sum()
    }
}

/// Everything that differs between two-seat and four-seat play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatingRules {
    /// Pieces issued to each seat.
    pub army: PieceCounts,
    /// Terrain tiles issued to each seat.
    pub tiles: TileCounts,
    /// Non-flat tiles a seat may hold inside its own territory.
    pub terrain_quota: u8,
    /// Per-type cap on a seat's pieces on the board.
    pub unit_limits: PieceCounts,
}

impl SeatingRules {
    pub fn two_player() -> Self {
        Self {
            army: PieceCounts::standard(8),
            tiles: TileCounts {
                forest: 4,
                swamp: 3,
                mountain: 3,
                desert: 2,
            },
            terrain_quota: 10,
            unit_limits: PieceCounts::standard(8),
        }
    }

    pub fn four_player() -> Self {
        Self {
            army: PieceCounts::standard(7),
            tiles: TileCounts {
                forest: 2,
                swamp: 2,
                mountain: 2,
                desert: 1,
            },
            terrain_quota: 6,
            unit_limits: PieceCounts::standard(7),
        }
    }
}

impl Default for SeatingRules {
    fn default() -> Self {
        Self::two_player()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Lifts per-type unit limits for everything but the king.
    pub mercenary: bool,
    pub two_player: SeatingRules,
    pub four_player: SeatingRules,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            mercenary: false,
            two_player: SeatingRules::two_player(),
            four_player: SeatingRules::four_player(),
        }
    }
}

impl RulesConfig {
    pub fn seating(&self, mode: GameMode) -> &SeatingRules {
        if mode.is_four_seat() {
            &self.four_player
        } else {
            &self.two_player
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let rules: RulesConfig = toml::from_str(s)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Rejects rulesets no match could be played under.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, seating) in [("two_player", &self.two_player), ("four_player", &self.four_player)] {
            if seating.army.king != 1 {
                return Err(ConfigError::Invalid(format!(
                    "{name}: army must contain exactly one king"
                )));
            }
            // a 6x6 quadrant holds 36 pieces; both half-boards hold more
            if seating.army.total() > 36 {
                return Err(ConfigError::Invalid(format!(
                    "{name}: army of {} does not fit a territory",
                    seating.army.total()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
