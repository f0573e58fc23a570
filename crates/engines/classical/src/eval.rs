//! Material and terrain evaluation.

use terra_core::terrain::is_sanctuary;
use terra_core::{PieceType, Position, Seat, SeatFrame, TerrainType};

/// Material values in centipawns, indexed by `PieceType::idx()`.
/// Order: King, Queen, Rook, Bishop, Knight, Pawn
const PIECE_VALUES: [i32; 6] = [0, 900, 500, 330, 320, 100];

const PAWN_ADVANCE: i32 = 6;
const CENTRE_WEIGHT: i32 = 2;
const SANCTUARY_BONUS: i32 = 15;
/// A piece left on desert is lost after its owner's next move.
const STRANDED_PENALTY: i32 = 60;

#[inline]
pub fn piece_value(kind: PieceType) -> i32 {
    PIECE_VALUES[kind.idx()]
}

/// Evaluates the position for `seat`.
///
/// Pieces of `seat` and its allies count for it, every other piece against
/// it. Returns a score in centipawns:
/// - Positive = good for `seat`
/// - Negative = bad for `seat`
pub fn evaluate(pos: &Position, seat: Seat) -> i32 {
    let mut score = 0i32;

    for (c, pc) in pos.board.pieces() {
        let terrain = pos.terrain_at(c);
        let mut v = piece_value(pc.kind);

        if pc.kind == PieceType::Pawn {
            if let Some(frame) = SeatFrame::of(pc.owner, pos.mode) {
                let (depth, lateral) = frame.to_local(c);
                let advance = if pos.mode.is_four_seat() {
                    depth.min(lateral)
                } else {
                    depth
                };
                v += PAWN_ADVANCE * advance as i32;
            }
        }
        if pc.kind != PieceType::King {
            v += CENTRE_WEIGHT * centre_proximity(c.row, c.col);
        }
        if is_sanctuary(pc.kind, terrain) {
            v += SANCTUARY_BONUS;
        }
        if terrain == TerrainType::Desert {
            v -= STRANDED_PENALTY;
        }

        score += if pos.mode.are_allies(pc.owner, seat) { v } else { -v };
    }

    score
}

/// 0 on the rim up to 5 on the four centre cells.
fn centre_proximity(row: u8, col: u8) -> i32 {
    let dr = (2 * row as i32 - 11).abs();
    let dc = (2 * col as i32 - 11).abs();
    (11 - dr.max(dc)) / 2
}
