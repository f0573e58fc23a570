//! Threat detection.
//!
//! `is_cell_guarded` answers "could any enemy of `defender` capture on this
//! cell right now?" by scanning outward from the target instead of generating
//! every enemy move:
//! - knight jumps and the knight's elite 3-cell leap
//! - the seer (2-cell orthogonal) and bastion (1-cell diagonal) leaps
//! - sliding rays, which end at the first occupant, at a desert cell, and
//!   for a given slider at terrain it cannot enter
//! - king steps and the joust
//! - pawn capture geometry for every enemy seat, including backflip captures
//!
//! Terrain at the target is applied first: an attacker type that cannot enter
//! the target terrain, or that the occupant's sanctuary protects against, does
//! not guard the cell.

use crate::board::Position;
use crate::terrain::{sanctuary_blocks, terrain_allows};
use crate::territory::pawn_captures;
use crate::types::*;

pub const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// Knight elite leap: three cells orthogonally.
pub const KNIGHT_ELITE: [(i8, i8); 4] = [(3, 0), (-3, 0), (0, 3), (0, -3)];

/// Seer leap (bishop, queen): two cells orthogonally.
pub const SEER_LEAPS: [(i8, i8); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

/// Bastion leap (rook, queen): one cell diagonally.
pub const BASTION_LEAPS: [(i8, i8); 4] = DIAGONAL;

/// King joust: two cells orthogonally over the midpoint.
pub const JOUST_LEAPS: [(i8, i8); 4] = SEER_LEAPS;

const ORTHO_SLIDERS: [PieceType; 2] = [PieceType::Rook, PieceType::Queen];
const DIAG_SLIDERS: [PieceType; 2] = [PieceType::Bishop, PieceType::Queen];

/// Whether an enemy of `defender` could capture on `target`.
pub fn is_cell_guarded(pos: &Position, target: Coord, defender: Seat) -> bool {
    let terrain = pos.terrain_at(target);
    // Only the defender's own side benefits from sanctuary on the target.
    let sheltered = pos
        .piece_at(target)
        .filter(|p| !pos.is_enemy(p.owner, defender));
    let can_take = |attacker: PieceType| {
        terrain_allows(attacker, terrain)
            && !sheltered.is_some_and(|p| sanctuary_blocks(p.kind, terrain, attacker))
    };
    let hostile = |c: Coord, kinds: &[PieceType]| match pos.piece_at(c) {
        Some(pc) => {
            pos.is_enemy(pc.owner, defender) && kinds.contains(&pc.kind) && can_take(pc.kind)
        }
        None => false,
    };
    let leap_hit = |offsets: &[(i8, i8)], kinds: &[PieceType]| {
        offsets
            .iter()
            .filter_map(|&(dr, dc)| target.offset(dr, dc))
            .any(|c| hostile(c, kinds))
    };

    if leap_hit(&KNIGHT_JUMPS, &[PieceType::Knight])
        || leap_hit(&KNIGHT_ELITE, &[PieceType::Knight])
        || leap_hit(&SEER_LEAPS, &DIAG_SLIDERS)
        || leap_hit(&BASTION_LEAPS, &ORTHO_SLIDERS)
        || leap_hit(&KING_STEPS, &[PieceType::King])
    {
        return true;
    }

    if slide_hit(pos, target, &ORTHOGONAL, &ORTHO_SLIDERS, &hostile)
        || slide_hit(pos, target, &DIAGONAL, &DIAG_SLIDERS, &hostile)
    {
        return true;
    }

    if can_take(PieceType::King) && joust_hit(pos, target, defender) {
        return true;
    }

    can_take(PieceType::Pawn) && pawn_hit(pos, target, defender)
}

fn slide_hit(
    pos: &Position,
    target: Coord,
    dirs: &[(i8, i8)],
    kinds: &[PieceType],
    hostile: &impl Fn(Coord, &[PieceType]) -> bool,
) -> bool {
    for &(dr, dc) in dirs {
        // per-slider: has every cell between the target and here been enterable?
        let mut clear = [true; 2];
        let mut cur = target;
        while let Some(next) = cur.offset(dr, dc) {
            cur = next;
            if let Some(pc) = pos.piece_at(cur) {
                let reachable = kinds
                    .iter()
                    .zip(clear)
                    .any(|(&k, open)| open && k == pc.kind);
                if reachable && hostile(cur, kinds) {
                    return true;
                }
                break;
            }
            let t = pos.terrain_at(cur);
            if t == TerrainType::Desert {
                break;
            }
            for (k, open) in kinds.iter().zip(clear.iter_mut()) {
                if !terrain_allows(*k, t) {
                    *open = false;
                }
            }
        }
    }
    false
}

fn joust_hit(pos: &Position, target: Coord, defender: Seat) -> bool {
    JOUST_LEAPS.iter().any(|&(dr, dc)| {
        let (Some(mid), Some(from)) = (target.offset(dr / 2, dc / 2), target.offset(dr, dc))
        else {
            return false;
        };
        let Some(king) = pos.piece_at(from) else {
            return false;
        };
        if king.kind != PieceType::King || !pos.is_enemy(king.owner, defender) {
            return false;
        }
        match pos.piece_at(mid) {
            None => true,
            Some(m) => {
                pos.is_enemy(m.owner, king.owner)
                    && !sanctuary_blocks(m.kind, pos.terrain_at(mid), PieceType::King)
            }
        }
    })
}

fn pawn_hit(pos: &Position, target: Coord, defender: Seat) -> bool {
    for &seat in pos.mode.seats() {
        if !pos.is_enemy(seat, defender) {
            continue;
        }
        for (dr, dc) in pawn_captures(seat, pos.mode) {
            // diagonal capture lands on from + v; backflip capture on from - 2v
            let sources = [target.offset(-dr, -dc), target.offset(2 * dr, 2 * dc)];
            for from in sources.into_iter().flatten() {
                if let Some(pc) = pos.piece_at(from) {
                    if pc.owner == seat && pc.kind == PieceType::Pawn {
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Whether `seat`'s king is guarded. A seat without a king is never in check.
pub fn is_in_check(pos: &Position, seat: Seat) -> bool {
    match pos.board.king_of(seat) {
        Some(k) => is_cell_guarded(pos, k, seat),
        None => false,
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
