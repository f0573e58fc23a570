use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terra_core::{
    all_legal_moves, Coord, GameMode, MatchState, Piece, PieceType, Preset,
};

fn put(pos: &mut Position, r: u8, c: u8, kind: PieceType, seat: Seat) {
    pos.board
        .set(Coord::new(r, c), Some(Piece::new(kind, seat)));
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn classical(mode: GameMode) -> Position {
    let mut game = MatchState::new(mode);
    for &seat in mode.seats() {
        game.apply_preset(seat, Preset::ClassicalFormation, 0)
            .unwrap();
    }
    game.position().clone()
}

#[test]
fn test_pick_best_move_start_position() {
    let pos = classical(GameMode::TwoNorthSouth);
    let mut nodes = 0;
    let result = pick_best_move(&pos, Seat::White, 2, &mut rng(), &mut nodes);
    let (mv, _) = result.unwrap();
    assert!(all_legal_moves(&pos, Seat::White).contains(&mv));
    assert!(nodes > 0);
}

#[test]
fn test_takes_hanging_queen() {
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    put(&mut pos, 11, 11, PieceType::King, Seat::White);
    put(&mut pos, 0, 0, PieceType::King, Seat::Black);
    put(&mut pos, 6, 0, PieceType::Rook, Seat::White);
    put(&mut pos, 6, 9, PieceType::Queen, Seat::Black);

    let (mv, score) = best_move(&pos, Seat::White, 2, &mut rng()).unwrap();
    assert_eq!(mv, Move::new(Coord::new(6, 0), Coord::new(6, 9)));
    assert!(score > 0);
}

#[test]
fn test_finds_mate_in_one() {
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    put(&mut pos, 0, 0, PieceType::King, Seat::Black);
    put(&mut pos, 11, 11, PieceType::King, Seat::White);
    put(&mut pos, 1, 11, PieceType::Rook, Seat::White);
    put(&mut pos, 2, 10, PieceType::Rook, Seat::White);

    let (mv, score) = best_move(&pos, Seat::White, 1, &mut rng()).unwrap();
    assert!(score >= MATE);

    let after = play(&pos, Seat::White, mv);
    assert!(is_in_check(&after, Seat::Black));
    assert!(!has_any_legal_move(&after, Seat::Black));
}

#[test]
fn test_no_moves_returns_none() {
    // Black is stalemated in the corner
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    put(&mut pos, 0, 0, PieceType::King, Seat::Black);
    put(&mut pos, 11, 11, PieceType::King, Seat::White);
    put(&mut pos, 1, 11, PieceType::Rook, Seat::White);
    put(&mut pos, 11, 1, PieceType::Rook, Seat::White);

    assert!(best_move(&pos, Seat::Black, 2, &mut rng()).is_none());
}

#[test]
fn test_play_applies_desert_expiry() {
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    put(&mut pos, 11, 5, PieceType::King, Seat::White);
    put(&mut pos, 0, 5, PieceType::King, Seat::Black);
    put(&mut pos, 8, 8, PieceType::Knight, Seat::White);
    put(&mut pos, 3, 3, PieceType::Knight, Seat::Black);
    pos.terrain.set(Coord::new(8, 8), TerrainType::Desert);
    pos.terrain.set(Coord::new(3, 3), TerrainType::Desert);

    let after = play(
        &pos,
        Seat::White,
        Move::new(Coord::new(11, 5), Coord::new(10, 5)),
    );
    assert_eq!(after.piece_at(Coord::new(8, 8)), None);
    // only the mover's pieces expire
    assert!(after.piece_at(Coord::new(3, 3)).is_some());
}

#[test]
fn test_same_seed_same_choice() {
    let pos = classical(GameMode::TwoEastWest);
    let a = best_move(&pos, Seat::Black, 2, &mut ChaCha8Rng::seed_from_u64(3));
    let b = best_move(&pos, Seat::Black, 2, &mut ChaCha8Rng::seed_from_u64(3));
    assert_eq!(a, b);
}

#[test]
fn test_four_seat_search() {
    for mode in [GameMode::FourPlayer, GameMode::Alliance2v2] {
        let pos = classical(mode);
        for &seat in mode.seats() {
            let (mv, _) = best_move(&pos, seat, 1, &mut rng()).unwrap();
            assert_eq!(pos.piece_at(mv.from).map(|p| p.owner), Some(seat));
        }
    }
}

#[test]
fn test_engine_trait() {
    use terra_core::{Engine, SearchLimits};

    let pos = classical(GameMode::TwoNorthSouth);
    let mut engine = crate::ClassicalEngine::with_seed(11);
    let first = engine.search(&pos, Seat::White, SearchLimits::depth(1));
    assert!(first.best_move.is_some());
    assert!(first.nodes > 0);

    engine.new_game();
    let again = engine.search(&pos, Seat::White, SearchLimits::depth(1));
    assert_eq!(first.best_move, again.best_move);
}
