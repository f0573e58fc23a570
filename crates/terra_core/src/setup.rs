//! Piece and terrain placement.
//!
//! Every edit to the board outside combat goes through [`place_piece`] or
//! [`place_terrain`], presets included. Each checks everything it needs to
//! before touching the position, so a rejection leaves it unchanged.

use tracing::trace;

use crate::board::Position;
use crate::config::RulesConfig;
use crate::error::RejectedAction;
use crate::inventory::Inventory;
use crate::terrain::terrain_allows;
use crate::territory::{in_territory, territory_of};
use crate::types::*;

/// Which constraints a placement is subject to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authority {
    /// Deployment: territory, inventory, quota, unit limits, terrain.
    Inventory,
    /// Genesis editing: territory, quota, unit limits, terrain. Inventory is
    /// not consulted.
    Free,
    /// Architect editing: terrain compatibility and the single king only.
    Architect,
}

impl Authority {
    fn uses_inventory(self) -> bool {
        self == Authority::Inventory
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Placed,
    /// An existing piece or tile of the seat was replaced.
    Swapped,
    Removed,
    Unchanged,
}

/// The parts of a match placement reads and writes.
pub struct PlacementCtx<'a> {
    pub pos: &'a mut Position,
    pub inventories: &'a mut [Inventory; 4],
    pub rules: &'a RulesConfig,
    pub active: &'a [Seat],
}

impl PlacementCtx<'_> {
    fn check_seat(
        &self,
        seat: Seat,
        at: Coord,
        authority: Authority,
    ) -> Result<(), RejectedAction> {
        if !self.active.contains(&seat) {
            return Err(RejectedAction::UnknownSeat(seat));
        }
        if !at.is_valid() {
            return Err(RejectedAction::OffBoard(at));
        }
        if authority != Authority::Architect && !in_territory(seat, self.pos.mode, at) {
            return Err(RejectedAction::OutsideTerritory { seat, at });
        }
        Ok(())
    }

    /// Non-flat tiles inside the seat's territory.
    pub fn terrain_used(&self, seat: Seat) -> usize {
        self.pos
            .terrain
            .count_features(&territory_of(seat, self.pos.mode))
    }

    /// Refills a seat's inventory with its army and tiles minus what it
    /// already has placed.
    pub fn reissue(&mut self, seat: Seat) {
        let seating = self.rules.seating(self.pos.mode);
        let mut inv = Inventory::empty();
        for kind in PieceType::ALL {
            let placed = self.pos.board.count(seat, kind);
            let left = (seating.army.get(kind) as usize).saturating_sub(placed);
            inv.set_pieces(kind, left as u8);
        }
        let cells = territory_of(seat, self.pos.mode);
        for terrain in TerrainType::ALL {
            let placed = cells
                .iter()
                .filter(|&&c| self.pos.terrain_at(c) == terrain)
                .count();
            let left = (seating.tiles.get(terrain) as usize).saturating_sub(placed);
            inv.set_tiles(terrain, left as u8);
        }
        self.inventories[seat.idx()] = inv;
    }
}

/// Places `kind` for `seat` at `at`, or removes the seat's piece there when
/// `kind` is `None`.
///
/// Removing from an empty cell or a cell another seat holds is a no-op.
/// Placing over one of the seat's own pieces swaps them, returning the old one
/// to inventory.
pub fn place_piece(
    ctx: &mut PlacementCtx<'_>,
    seat: Seat,
    at: Coord,
    kind: Option<PieceType>,
    authority: Authority,
) -> Result<Placement, RejectedAction> {
    ctx.check_seat(seat, at, authority)?;
    let occupant = ctx.pos.piece_at(at);

    let Some(kind) = kind else {
        return match occupant {
            Some(pc) if pc.owner == seat || authority == Authority::Architect => {
                ctx.pos.board.set(at, None);
                if authority.uses_inventory() {
                    ctx.inventories[seat.idx()].return_piece(pc.kind);
                }
                Ok(Placement::Removed)
            }
            _ => Ok(Placement::Unchanged),
        };
    };

    let terrain = ctx.pos.terrain_at(at);
    if !terrain_allows(kind, terrain) {
        return Err(RejectedAction::TerrainIncompatible { kind, terrain });
    }

    let replaced = match occupant {
        Some(pc) if pc.owner == seat && pc.kind == kind => return Ok(Placement::Unchanged),
        Some(pc) if pc.owner == seat => Some(pc.kind),
        Some(pc) if authority == Authority::Architect => {
            // the architect may overwrite anyone; the old owner loses the piece
            trace!(?pc, ?at, "architect overwrite");
            None
        }
        Some(_) => return Err(RejectedAction::OccupiedByOpponent(at)),
        None => None,
    };

    let seating = ctx.rules.seating(ctx.pos.mode);
    let on_board = ctx.pos.board.count(seat, kind);
    if kind == PieceType::King {
        if on_board >= 1 {
            return Err(RejectedAction::UnitLimit { kind, limit: 1 });
        }
    } else if authority != Authority::Architect && !ctx.rules.mercenary {
        let limit = seating.unit_limits.get(kind);
        if on_board >= limit as usize {
            return Err(RejectedAction::UnitLimit { kind, limit });
        }
    }

    if authority.uses_inventory() {
        let inv = &mut ctx.inventories[seat.idx()];
        if !inv.take_piece(kind) {
            return Err(RejectedAction::PieceNotInInventory(kind));
        }
        if let Some(old) = replaced {
            inv.return_piece(old);
        }
    }

    ctx.pos.board.set(at, Some(Piece::new(kind, seat)));
    Ok(if replaced.is_some() {
        Placement::Swapped
    } else {
        Placement::Placed
    })
}

/// Sets the terrain under `at`. `TerrainType::Flat` clears a tile.
///
/// The seat's quota caps how many non-flat tiles its territory may hold; it
/// blocks new tiles but never the replacement of an existing one.
pub fn place_terrain(
    ctx: &mut PlacementCtx<'_>,
    seat: Seat,
    at: Coord,
    terrain: TerrainType,
    authority: Authority,
) -> Result<Placement, RejectedAction> {
    ctx.check_seat(seat, at, authority)?;
    let current = ctx.pos.terrain_at(at);
    if current == terrain {
        return Ok(Placement::Unchanged);
    }
    if let Some(pc) = ctx.pos.piece_at(at) {
        if !terrain_allows(pc.kind, terrain) {
            return Err(RejectedAction::TerrainIncompatible {
                kind: pc.kind,
                terrain,
            });
        }
    }

    if terrain.is_flat() {
        if authority.uses_inventory() {
            ctx.inventories[seat.idx()].return_tile(current);
        }
        ctx.pos.terrain.set(at, terrain);
        return Ok(Placement::Removed);
    }

    if current.is_flat() && authority != Authority::Architect {
        let quota = ctx.rules.seating(ctx.pos.mode).terrain_quota;
        if ctx.terrain_used(seat) >= quota as usize {
            return Err(RejectedAction::QuotaReached { quota });
        }
    }

    if authority.uses_inventory() {
        let inv = &mut ctx.inventories[seat.idx()];
        if !inv.take_tile(terrain) {
            return Err(RejectedAction::TileNotInInventory(terrain));
        }
        inv.return_tile(current);
    }

    ctx.pos.terrain.set(at, terrain);
    Ok(if current.is_flat() {
        Placement::Placed
    } else {
        Placement::Swapped
    })
}

#[cfg(test)]
#[path = "setup_tests.rs"]
mod setup_tests;
