use serde::{Deserialize, Serialize};

use crate::config::SeatingRules;
use crate::types::{PieceType, TerrainType};

/// Unplaced pieces and terrain tiles held by one seat.
///
/// Both halves are multisets stored as per-type counters. Flat is never
/// stocked: clearing a cell back to flat costs nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pieces: [u8; 6],
    tiles: [u8; 5],
}

impl Inventory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A full issue of the seating's army and tile allotment.
    pub fn issue(rules: &SeatingRules) -> Self {
        let mut inv = Self::empty();
        for kind in PieceType::ALL {
            inv.pieces[kind.idx()] = rules.army.get(kind);
        }
        for terrain in TerrainType::ALL {
            inv.tiles[terrain.idx()] = rules.tiles.get(terrain);
        }
        inv
    }

    pub fn pieces(&self, kind: PieceType) -> u8 {
        self.pieces[kind.idx()]
    }

    pub fn tiles(&self, terrain: TerrainType) -> u8 {
        self.tiles[terrain.idx()]
    }

    pub fn set_pieces(&mut self, kind: PieceType, n: u8) {
        self.pieces[kind.idx()] = n;
    }

    pub fn set_tiles(&mut self, terrain: TerrainType, n: u8) {
        if !terrain.is_flat() {
            self.tiles[terrain.idx()] = n;
        }
    }

    /// Consumes one piece; `false` when none is left.
    pub fn take_piece(&mut self, kind: PieceType) -> bool {
        match self.pieces[kind.idx()].checked_sub(1) {
            Some(n) => {
                self.pieces[kind.idx()] = n;
                true
            }
            None => false,
        }
    }

    pub fn return_piece(&mut self, kind: PieceType) {
        let slot = &mut self.pieces[kind.idx()];
        *slot = slot.saturating_add(1);
    }

    /// Consumes one tile; flat always succeeds.
    pub fn take_tile(&mut self, terrain: TerrainType) -> bool {
        if terrain.is_flat() {
            return true;
        }
        match self.tiles[terrain.idx()].checked_sub(1) {
            Some(n) => {
                self.tiles[terrain.idx()] = n;
                true
            }
            None => false,
        }
    }

    pub fn return_tile(&mut self, terrain: TerrainType) {
        if !terrain.is_flat() {
            let slot = &mut self.tiles[terrain.idx()];
            *slot = slot.saturating_add(1);
        }
    }

    pub fn piece_count(&self) -> u32 {
        self.pieces.iter().map(|&n| n as u32).sum()
    }

    pub fn tile_count(&self) -> u32 {
        self.tiles.iter().map(|&n| n as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.piece_count() == 0 && self.tile_count() == 0
    }

    pub fn clear(&mut self) {
        *self = Self::empty();
    }
}
