use crate::attacks::*;
use crate::board::Position;
use crate::terrain::{sanctuary_blocks, terrain_allows};
use crate::territory::{pawn_captures, pawn_forward};
use crate::types::*;

/// How a destination cell receives the moving piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Landing {
    Empty,
    Capture,
    Blocked,
}

/// Destinations for the piece standing on `origin`.
///
/// With `recursion_depth == 0` and `skip_check_filter == false`, every
/// candidate is played on a scratch copy of the position and dropped if it
/// leaves the mover's king guarded. Threat scans and move previews pass a
/// non-zero depth or set `skip_check_filter`.
///
/// An empty or off-board origin yields no moves.
pub fn legal_moves(
    pos: &Position,
    origin: Coord,
    recursion_depth: u8,
    skip_check_filter: bool,
) -> Vec<Coord> {
    if !origin.is_valid() {
        return Vec::new();
    }
    let piece = match pos.piece_at(origin) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut out = Vec::with_capacity(32);
    let gen = Gen {
        pos,
        from: origin,
        piece,
    };
    match piece.kind {
        PieceType::Pawn => gen.pawn(&mut out),
        PieceType::Knight => {
            gen.leaps(&KNIGHT_JUMPS, &mut out);
            gen.leaps(&KNIGHT_ELITE, &mut out);
        }
        PieceType::Bishop => {
            gen.slides(&DIAGONAL, &mut out);
            gen.leaps(&SEER_LEAPS, &mut out);
        }
        PieceType::Rook => {
            gen.slides(&ORTHOGONAL, &mut out);
            gen.leaps(&BASTION_LEAPS, &mut out);
        }
        PieceType::Queen => {
            gen.slides(&ORTHOGONAL, &mut out);
            gen.slides(&DIAGONAL, &mut out);
            gen.leaps(&SEER_LEAPS, &mut out);
            gen.leaps(&BASTION_LEAPS, &mut out);
        }
        PieceType::King => {
            gen.leaps(&KING_STEPS, &mut out);
            gen.jousts(recursion_depth, &mut out);
        }
    }

    if recursion_depth == 0 && !skip_check_filter {
        out.retain(|&to| leaves_king_safe(pos, Move::new(origin, to), piece.owner));
    }
    out
}

/// Check-filtered destinations; what a player may actually play.
pub fn safe_moves(pos: &Position, origin: Coord) -> Vec<Coord> {
    legal_moves(pos, origin, 0, false)
}

/// Plays `mv` on a scratch copy and asks whether `seat` is still out of check.
fn leaves_king_safe(pos: &Position, mv: Move, seat: Seat) -> bool {
    let mut scratch = pos.clone();
    scratch.apply_move(mv);
    !is_in_check(&scratch, seat)
}

/// Every check-filtered move for `seat`, grouped by origin in board order.
pub fn all_legal_moves(pos: &Position, seat: Seat) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    for (from, _) in pos.board.pieces_of(seat) {
        moves.extend(safe_moves(pos, from).into_iter().map(|to| Move::new(from, to)));
    }
    moves
}

pub fn has_any_legal_move(pos: &Position, seat: Seat) -> bool {
    pos.board
        .pieces_of(seat)
        .any(|(from, _)| !safe_moves(pos, from).is_empty())
}

/// The seat after `seat` in turn order that still has pieces on the board.
pub fn next_seat(pos: &Position, seat: Seat) -> Option<Seat> {
    let seats = pos.mode.seats();
    let start = seats.iter().position(|&s| s == seat)?;
    (1..=seats.len())
        .map(|i| seats[(start + i) % seats.len()])
        .find(|&s| pos.board.has_pieces(s))
}

struct Gen<'a> {
    pos: &'a Position,
    from: Coord,
    piece: Piece,
}

impl Gen<'_> {
    fn landing(&self, to: Coord) -> Landing {
        let terrain = self.pos.terrain_at(to);
        if !terrain_allows(self.piece.kind, terrain) {
            return Landing::Blocked;
        }
        match self.pos.piece_at(to) {
            None => Landing::Empty,
            Some(pc) if !self.pos.is_enemy(pc.owner, self.piece.owner) => Landing::Blocked,
            Some(pc) if sanctuary_blocks(pc.kind, terrain, self.piece.kind) => Landing::Blocked,
            Some(_) => Landing::Capture,
        }
    }

    fn leaps(&self, offsets: &[(i8, i8)], out: &mut Vec<Coord>) {
        for &(dr, dc) in offsets {
            if let Some(to) = self.from.offset(dr, dc) {
                if self.landing(to) != Landing::Blocked {
                    out.push(to);
                }
            }
        }
    }

    fn slides(&self, dirs: &[(i8, i8)], out: &mut Vec<Coord>) {
        for &(dr, dc) in dirs {
            let mut cur = self.from;
            while let Some(to) = cur.offset(dr, dc) {
                cur = to;
                match self.landing(to) {
                    Landing::Blocked => break,
                    Landing::Capture => {
                        out.push(to);
                        break;
                    }
                    Landing::Empty => {
                        out.push(to);
                        if self.pos.terrain_at(to) == TerrainType::Desert {
                            break;
                        }
                    }
                }
            }
        }
    }

    fn pawn(&self, out: &mut Vec<Coord>) {
        let seat = self.piece.owner;
        let (fr, fc) = pawn_forward(seat, self.pos.mode);
        if (fr, fc) == (0, 0) {
            return;
        }

        if let Some(step) = self.from.offset(fr, fc) {
            if self.landing(step) == Landing::Empty {
                out.push(step);
            }
        }

        // backflip: straight back two cells, leaping whatever is between
        if let Some(back) = self.from.offset(-2 * fr, -2 * fc) {
            if self.landing(back) == Landing::Empty {
                out.push(back);
            }
        }

        for (dr, dc) in pawn_captures(seat, self.pos.mode) {
            for to in [self.from.offset(dr, dc), self.from.offset(-2 * dr, -2 * dc)]
                .into_iter()
                .flatten()
            {
                if self.landing(to) == Landing::Capture {
                    out.push(to);
                }
            }
        }
    }

    fn jousts(&self, recursion_depth: u8, out: &mut Vec<Coord>) {
        for &(dr, dc) in &JOUST_LEAPS {
            let (mid, to) = match (self.from.offset(dr / 2, dc / 2), self.from.offset(dr, dc)) {
                (Some(m), Some(t)) => (m, t),
                _ => continue,
            };
            let mid_ok = match self.pos.piece_at(mid) {
                None => true,
                Some(pc) => {
                    self.pos.is_enemy(pc.owner, self.piece.owner)
                        && !sanctuary_blocks(pc.kind, self.pos.terrain_at(mid), PieceType::King)
                }
            };
            if !mid_ok || self.landing(to) == Landing::Blocked {
                continue;
            }
            if recursion_depth == 0 && is_cell_guarded(self.pos, mid, self.piece.owner) {
                continue;
            }
            out.push(to);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
