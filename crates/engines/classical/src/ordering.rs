//! Move ordering for alpha-beta.
//!
//! Captures first by most-valuable-victim / least-valuable-attacker, nudged
//! by what the move does with desert and sanctuary terrain. A small random
//! term breaks ties so equal lines are not always searched in board order.

use rand::Rng;
use terra_core::terrain::is_sanctuary;
use terra_core::{all_legal_moves, joust_midpoint, Move, PieceType, Position, Seat, TerrainType};

use crate::eval::piece_value;

const ENTER_DESERT: i32 = -40;
const CAPTURE_ON_DESERT: i32 = 30;
const ESCAPE_DESERT: i32 = 50;
const REACH_SANCTUARY: i32 = 25;

/// Kings are worth nothing to the evaluator but are the dearest victim and
/// the most reluctant attacker.
fn order_value(kind: PieceType) -> i32 {
    match kind {
        PieceType::King => 1_000,
        k => piece_value(k),
    }
}

/// Heuristic score of `mv` before the tiebreak.
pub fn score_move(pos: &Position, mv: Move) -> i32 {
    let Some(mover) = pos.piece_at(mv.from) else {
        return i32::MIN;
    };
    let from_terrain = pos.terrain_at(mv.from);
    let to_terrain = pos.terrain_at(mv.to);

    let mut victims: Vec<PieceType> = pos.piece_at(mv.to).map(|p| p.kind).into_iter().collect();
    if mover.kind == PieceType::King {
        if let Some(mid) = joust_midpoint(mv.from, mv.to) {
            victims.extend(pos.piece_at(mid).map(|p| p.kind));
        }
    }

    let taken: i32 = victims.iter().map(|&v| order_value(v)).sum();
    let mut score = 10 * taken - order_value(mover.kind);

    if to_terrain == TerrainType::Desert {
        score += ENTER_DESERT;
        if !victims.is_empty() {
            score += CAPTURE_ON_DESERT;
        }
    } else if from_terrain == TerrainType::Desert {
        score += ESCAPE_DESERT;
    }
    if is_sanctuary(mover.kind, to_terrain) {
        score += REACH_SANCTUARY;
    }
    score
}

/// Every legal move for `seat`, best candidates first.
pub fn ordered_moves<R: Rng + ?Sized>(pos: &Position, seat: Seat, rng: &mut R) -> Vec<Move> {
    let mut scored: Vec<(i32, Move)> = all_legal_moves(pos, seat)
        .into_iter()
        .map(|mv| (score_move(pos, mv) + rng.gen_range(0..4), mv))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, mv)| mv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use terra_core::{Coord, GameMode, Piece};

    fn put(pos: &mut Position, r: u8, c: u8, kind: PieceType, seat: Seat) {
        pos.board
            .set(Coord::new(r, c), Some(Piece::new(kind, seat)));
    }

    #[test]
    fn test_queen_capture_first() {
        let mut pos = Position::new(GameMode::TwoNorthSouth);
        put(&mut pos, 11, 11, PieceType::King, Seat::White);
        put(&mut pos, 0, 0, PieceType::King, Seat::Black);
        put(&mut pos, 6, 0, PieceType::Rook, Seat::White);
        put(&mut pos, 6, 9, PieceType::Queen, Seat::Black);
        put(&mut pos, 9, 0, PieceType::Pawn, Seat::Black);

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let moves = ordered_moves(&pos, Seat::White, &mut rng);
        assert_eq!(moves[0], Move::new(Coord::new(6, 0), Coord::new(6, 9)));
        assert_eq!(moves[1], Move::new(Coord::new(6, 0), Coord::new(9, 0)));
    }

    #[test]
    fn test_desert_terms() {
        let mut pos = Position::new(GameMode::TwoNorthSouth);
        put(&mut pos, 6, 6, PieceType::Knight, Seat::White);
        put(&mut pos, 3, 3, PieceType::Rook, Seat::White);
        pos.terrain.set(Coord::new(8, 7), TerrainType::Desert);
        pos.terrain.set(Coord::new(3, 3), TerrainType::Desert);

        let onto = score_move(&pos, Move::new(Coord::new(6, 6), Coord::new(8, 7)));
        let flat = score_move(&pos, Move::new(Coord::new(6, 6), Coord::new(8, 5)));
        assert_eq!(onto, flat + ENTER_DESERT);

        let escape = score_move(&pos, Move::new(Coord::new(3, 3), Coord::new(3, 5)));
        assert_eq!(escape, ESCAPE_DESERT - 500);
    }

    #[test]
    fn test_sanctuary_term() {
        let mut pos = Position::new(GameMode::TwoNorthSouth);
        put(&mut pos, 6, 6, PieceType::Bishop, Seat::White);
        pos.terrain.set(Coord::new(4, 4), TerrainType::Swamp);
        assert_eq!(
            score_move(&pos, Move::new(Coord::new(6, 6), Coord::new(4, 4))),
            REACH_SANCTUARY - 330
        );
    }

    #[test]
    fn test_quiet_moves_prefer_cheaper_mover() {
        let mut pos = Position::new(GameMode::TwoNorthSouth);
        put(&mut pos, 8, 2, PieceType::Queen, Seat::White);
        put(&mut pos, 8, 8, PieceType::Knight, Seat::White);

        let queen = score_move(&pos, Move::new(Coord::new(8, 2), Coord::new(7, 2)));
        let knight = score_move(&pos, Move::new(Coord::new(8, 8), Coord::new(6, 7)));
        assert_eq!(queen, -900);
        assert_eq!(knight, -320);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let moves = ordered_moves(&pos, Seat::White, &mut rng);
        let first_queen = moves.iter().position(|m| m.from == Coord::new(8, 2));
        let last_knight = moves.iter().rposition(|m| m.from == Coord::new(8, 8));
        assert!(last_knight < first_queen);
    }

    #[test]
    fn test_joust_victim_counts() {
        let mut pos = Position::new(GameMode::TwoNorthSouth);
        put(&mut pos, 6, 6, PieceType::King, Seat::White);
        put(&mut pos, 5, 6, PieceType::Knight, Seat::Black);
        assert_eq!(
            score_move(&pos, Move::new(Coord::new(6, 6), Coord::new(4, 6))),
            10 * 320 - 1_000
        );
    }
}
