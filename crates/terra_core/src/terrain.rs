//! Terrain affinity table.
//!
//! Every piece type carries a record of which terrains it cannot enter and
//! which terrains shelter it. A sheltered piece (a piece standing on its
//! sanctuary) cannot be captured by the attacker types listed for that
//! terrain. The table is static and independent of board state.
//!
//! | terrain  | sanctuary                                   | impassable for |
//! |----------|---------------------------------------------|----------------|
//! | Forest   | Knight, Pawn vs Rook, Bishop, Queen         | Rook           |
//! | Swamp    | Bishop vs Knight, Pawn, King                | Knight         |
//! | Mountain | Rook vs Knight, Pawn, Bishop; Queen vs Knight, Pawn | Bishop |
//! | Desert   | none                                        | none           |

use crate::types::{PieceType, TerrainType};

/// Shelter granted to one piece type on one terrain.
#[derive(Clone, Copy, Debug)]
pub struct Sanctuary {
    pub terrain: TerrainType,
    pub against: &'static [PieceType],
}

/// Terrain record for a piece type.
#[derive(Clone, Copy, Debug)]
pub struct Affinity {
    pub blocked: &'static [TerrainType],
    pub sanctuaries: &'static [Sanctuary],
}

const SLIDERS: &[PieceType] = &[PieceType::Rook, PieceType::Bishop, PieceType::Queen];

/// Indexed by `PieceType::idx()`.
pub static AFFINITIES: [Affinity; 6] = [
    // King
    Affinity {
        blocked: &[],
        sanctuaries: &[],
    },
    // Queen
    Affinity {
        blocked: &[],
        sanctuaries: &[Sanctuary {
            terrain: TerrainType::Mountain,
            against: &[PieceType::Knight, PieceType::Pawn],
        }],
    },
    // Rook
    Affinity {
        blocked: &[TerrainType::Forest],
        sanctuaries: &[Sanctuary {
            terrain: TerrainType::Mountain,
            against: &[PieceType::Knight, PieceType::Pawn, PieceType::Bishop],
        }],
    },
    // Bishop
    Affinity {
        blocked: &[TerrainType::Mountain],
        sanctuaries: &[Sanctuary {
            terrain: TerrainType::Swamp,
            against: &[PieceType::Knight, PieceType::Pawn, PieceType::King],
        }],
    },
    // Knight
    Affinity {
        blocked: &[TerrainType::Swamp],
        sanctuaries: &[Sanctuary {
            terrain: TerrainType::Forest,
            against: SLIDERS,
        }],
    },
    // Pawn
    Affinity {
        blocked: &[],
        sanctuaries: &[Sanctuary {
            terrain: TerrainType::Forest,
            against: SLIDERS,
        }],
    },
];

#[inline]
pub fn affinity(kind: PieceType) -> &'static Affinity {
    &AFFINITIES[kind.idx()]
}

/// Whether a piece of `kind` may stand on `terrain` at all.
#[inline]
pub fn terrain_allows(kind: PieceType, terrain: TerrainType) -> bool {
    !affinity(kind).blocked.contains(&terrain)
}

/// Whether `terrain` shelters `kind` against at least one attacker type.
pub fn is_sanctuary(kind: PieceType, terrain: TerrainType) -> bool {
    affinity(kind)
        .sanctuaries
        .iter()
        .any(|s| s.terrain == terrain)
}

/// Whether a `defender` standing on `terrain` is immune to capture by `attacker`.
pub fn sanctuary_blocks(defender: PieceType, terrain: TerrainType, attacker: PieceType) -> bool {
    affinity(defender)
        .sanctuaries
        .iter()
        .any(|s| s.terrain == terrain && s.against.contains(&attacker))
}

#[cfg(test)]
#[path = "terrain_tests.rs"]
mod terrain_tests;
