//! Formation and randomization presets.
//!
//! A preset clears the seat's units or tiles inside its territory, reissues
//! the matching half of its inventory, then lays the new layout down through
//! [`place_piece`] and [`place_terrain`]. Whatever those reject is reported
//! back instead of being forced onto the board. Randomized presets draw only
//! from the generator they are handed.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::RejectedAction;
use crate::setup::{place_piece, place_terrain, Authority, PlacementCtx};
use crate::territory::{counterpart, territory_of, SeatFrame};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    ClassicalFormation,
    RandomizeUnits,
    RandomizeTerrain,
    ElementalTerrain,
    /// Adopt the counterpart seat's layout, reflected into one's own territory.
    MirrorBoard,
}

/// What a preset could not place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresetReport {
    pub placed_pieces: usize,
    pub placed_tiles: usize,
    pub unplaced_pieces: Vec<PieceType>,
    pub unplaced_tiles: Vec<TerrainType>,
}

impl PresetReport {
    pub fn is_complete(&self) -> bool {
        self.unplaced_pieces.is_empty() && self.unplaced_tiles.is_empty()
    }
}

/// Back rank, local lateral 2..=9 at depth 0.
const TWO_SEAT_BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// Corner wedge as `(depth, lateral, kind)`, king in the corner.
const FOUR_SEAT_WEDGE: [(u8, u8, PieceType); 15] = [
    (0, 0, PieceType::King),
    (0, 1, PieceType::Rook),
    (1, 0, PieceType::Rook),
    (1, 1, PieceType::Queen),
    (0, 2, PieceType::Bishop),
    (2, 0, PieceType::Bishop),
    (1, 2, PieceType::Knight),
    (2, 1, PieceType::Knight),
    (0, 3, PieceType::Pawn),
    (3, 0, PieceType::Pawn),
    (0, 4, PieceType::Pawn),
    (1, 3, PieceType::Pawn),
    (2, 2, PieceType::Pawn),
    (3, 1, PieceType::Pawn),
    (4, 0, PieceType::Pawn),
];

/// Local `(depth, lateral, kind)` slots of the classical formation.
pub fn formation(mode: GameMode) -> Vec<(u8, u8, PieceType)> {
    if mode.is_four_seat() {
        return FOUR_SEAT_WEDGE.to_vec();
    }
    let mut slots = Vec::with_capacity(16);
    for (i, &kind) in TWO_SEAT_BACK_RANK.iter().enumerate() {
        slots.push((0, i as u8 + 2, kind));
    }
    for lateral in 2..=9 {
        slots.push((1, lateral, PieceType::Pawn));
    }
    slots
}

pub fn apply_preset<R: Rng + ?Sized>(
    ctx: &mut PlacementCtx<'_>,
    seat: Seat,
    preset: Preset,
    authority: Authority,
    rng: &mut R,
) -> Result<PresetReport, RejectedAction> {
    if !ctx.active.contains(&seat) {
        return Err(RejectedAction::UnknownSeat(seat));
    }
    let report = match preset {
        Preset::ClassicalFormation => classical_formation(ctx, seat, authority),
        Preset::RandomizeUnits => randomize_units(ctx, seat, authority, rng),
        Preset::RandomizeTerrain => randomize_terrain(ctx, seat, authority, rng),
        Preset::ElementalTerrain => elemental_terrain(ctx, seat, authority, rng),
        Preset::MirrorBoard => mirror_board(ctx, seat, authority)?,
    };
    trace!(?seat, ?preset, ?report, "preset applied");
    Ok(report)
}

fn clear_units(ctx: &mut PlacementCtx<'_>, seat: Seat) {
    for c in territory_of(seat, ctx.pos.mode) {
        if ctx.pos.piece_at(c).is_some_and(|p| p.owner == seat) {
            ctx.pos.board.set(c, None);
        }
    }
    ctx.reissue(seat);
}

fn clear_terrain(ctx: &mut PlacementCtx<'_>, seat: Seat) {
    for c in territory_of(seat, ctx.pos.mode) {
        ctx.pos.terrain.set(c, TerrainType::Flat);
    }
    ctx.reissue(seat);
}

/// The seat's army, king first.
fn army(ctx: &PlacementCtx<'_>) -> Vec<PieceType> {
    let seating = ctx.rules.seating(ctx.pos.mode);
    PieceType::ALL
        .iter()
        .flat_map(|&k| std::iter::repeat(k).take(seating.army.get(k) as usize))
        .collect()
}

/// The seat's tile allotment, grouped by terrain type.
fn tiles(ctx: &PlacementCtx<'_>) -> Vec<TerrainType> {
    let seating = ctx.rules.seating(ctx.pos.mode);
    TerrainType::ALL
        .iter()
        .flat_map(|&t| std::iter::repeat(t).take(seating.tiles.get(t) as usize))
        .collect()
}

pub fn classical_formation(
    ctx: &mut PlacementCtx<'_>,
    seat: Seat,
    authority: Authority,
) -> PresetReport {
    let mut report = PresetReport::default();
    let Some(frame) = SeatFrame::of(seat, ctx.pos.mode) else {
        return report;
    };
    clear_units(ctx, seat);

    for (depth, lateral, kind) in formation(ctx.pos.mode) {
        let placed = frame
            .to_board(depth, lateral)
            .map(|at| place_piece(ctx, seat, at, Some(kind), authority));
        match placed {
            Some(Ok(_)) => report.placed_pieces += 1,
            _ => report.unplaced_pieces.push(kind),
        }
    }
    report
}

/// Scatters the army over the territory, never onto desert.
pub fn randomize_units<R: Rng + ?Sized>(
    ctx: &mut PlacementCtx<'_>,
    seat: Seat,
    authority: Authority,
    rng: &mut R,
) -> PresetReport {
    let mut report = PresetReport::default();
    clear_units(ctx, seat);

    let mut cells: Vec<Coord> = territory_of(seat, ctx.pos.mode)
        .into_iter()
        .filter(|&c| ctx.pos.piece_at(c).is_none() && ctx.pos.terrain_at(c) != TerrainType::Desert)
        .collect();
    cells.shuffle(rng);

    for kind in army(ctx) {
        let slot = cells
            .iter()
            .position(|&c| place_piece(ctx, seat, c, Some(kind), authority).is_ok());
        match slot {
            Some(i) => {
                cells.swap_remove(i);
                report.placed_pieces += 1;
            }
            None => report.unplaced_pieces.push(kind),
        }
    }
    report
}

/// Lays the seat's tiles on random cells of its territory.
pub fn randomize_terrain<R: Rng + ?Sized>(
    ctx: &mut PlacementCtx<'_>,
    seat: Seat,
    authority: Authority,
    rng: &mut R,
) -> PresetReport {
    let mut report = PresetReport::default();
    clear_terrain(ctx, seat);

    let mut cells = territory_of(seat, ctx.pos.mode);
    cells.shuffle(rng);
    let mut tiles = tiles(ctx);
    tiles.shuffle(rng);

    for terrain in tiles {
        if lay_tile(ctx, seat, terrain, authority, &mut cells) {
            report.placed_tiles += 1;
        } else {
            report.unplaced_tiles.push(terrain);
        }
    }
    report
}

/// Deals the seat's tiles alternately into the two lateral halves of its
/// territory, so every terrain type is spread evenly across both.
pub fn elemental_terrain<R: Rng + ?Sized>(
    ctx: &mut PlacementCtx<'_>,
    seat: Seat,
    authority: Authority,
    rng: &mut R,
) -> PresetReport {
    let mut report = PresetReport::default();
    let Some(frame) = SeatFrame::of(seat, ctx.pos.mode) else {
        return report;
    };
    clear_terrain(ctx, seat);

    let split = frame.lateral_len() / 2;
    let (mut left, mut right): (Vec<Coord>, Vec<Coord>) = territory_of(seat, ctx.pos.mode)
        .into_iter()
        .partition(|&c| frame.to_local(c).1 < split);
    left.shuffle(rng);
    right.shuffle(rng);
    let mut halves = [left, right];
    let mut next = rng.gen_range(0..2);

    for terrain in tiles(ctx) {
        let [a, b] = &mut halves;
        let (first, second) = if next == 0 { (a, b) } else { (b, a) };
        if lay_tile(ctx, seat, terrain, authority, first)
            || lay_tile(ctx, seat, terrain, authority, second)
        {
            report.placed_tiles += 1;
            next = 1 - next;
        } else {
            report.unplaced_tiles.push(terrain);
        }
    }
    report
}

/// Tries `cells` in order and consumes the first one the tile lands on.
fn lay_tile(
    ctx: &mut PlacementCtx<'_>,
    seat: Seat,
    terrain: TerrainType,
    authority: Authority,
    cells: &mut Vec<Coord>,
) -> bool {
    let slot = cells
        .iter()
        .position(|&c| place_terrain(ctx, seat, c, terrain, authority).is_ok());
    match slot {
        Some(i) => {
            cells.swap_remove(i);
            true
        }
        None => false,
    }
}

/// Rebuilds the seat's territory as the reflection of its counterpart's.
///
/// Terrain is copied before pieces so every piece finds the ground it stood
/// on. Cells are matched through both seats' local frames, so what sat on the
/// counterpart's home edge lands on this seat's home edge.
pub fn mirror_board(
    ctx: &mut PlacementCtx<'_>,
    seat: Seat,
    authority: Authority,
) -> Result<PresetReport, RejectedAction> {
    let mode = ctx.pos.mode;
    let source = counterpart(seat, mode).ok_or(RejectedAction::NoCounterpart(seat))?;
    let (Some(theirs), Some(ours)) = (SeatFrame::of(source, mode), SeatFrame::of(seat, mode))
    else {
        return Err(RejectedAction::NoCounterpart(seat));
    };

    let mut report = PresetReport::default();
    clear_units(ctx, seat);
    clear_terrain(ctx, seat);

    let their_cells = territory_of(source, mode);
    let reflect = |c: Coord| {
        let (depth, lateral) = theirs.to_local(c);
        ours.to_board(depth, lateral)
    };

    for &c in &their_cells {
        let terrain = ctx.pos.terrain_at(c);
        if terrain.is_flat() {
            continue;
        }
        match reflect(c).map(|at| place_terrain(ctx, seat, at, terrain, authority)) {
            Some(Ok(_)) => report.placed_tiles += 1,
            _ => report.unplaced_tiles.push(terrain),
        }
    }
    for &c in &their_cells {
        let Some(pc) = ctx.pos.piece_at(c).filter(|p| p.owner == source) else {
            continue;
        };
        match reflect(c).map(|at| place_piece(ctx, seat, at, Some(pc.kind), authority)) {
            Some(Ok(_)) => report.placed_pieces += 1,
            _ => report.unplaced_pieces.push(pc.kind),
        }
    }
    Ok(report)
}

#[cfg(test)]
#[path = "presets_tests.rs"]
mod presets_tests;
