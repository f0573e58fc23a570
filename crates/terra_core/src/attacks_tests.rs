use super::*;

fn put(pos: &mut Position, row: u8, col: u8, kind: PieceType, owner: Seat) {
    pos.board
        .set(Coord::new(row, col), Some(Piece::new(kind, owner)));
}

#[test]
fn test_knight_jump_and_elite_leap() {
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    put(&mut pos, 4, 4, PieceType::Knight, Seat::Black);

    assert!(is_cell_guarded(&pos, Coord::new(6, 5), Seat::White));
    assert!(is_cell_guarded(&pos, Coord::new(7, 4), Seat::White));
    assert!(is_cell_guarded(&pos, Coord::new(4, 1), Seat::White));
    assert!(!is_cell_guarded(&pos, Coord::new(5, 5), Seat::White));
    // a knight never guards for its own side
    assert!(!is_cell_guarded(&pos, Coord::new(7, 4), Seat::Black));
}

#[test]
fn test_slide_stops_at_desert() {
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    put(&mut pos, 4, 0, PieceType::Rook, Seat::Black);
    pos.terrain.set(Coord::new(4, 3), TerrainType::Desert);

    assert!(is_cell_guarded(&pos, Coord::new(4, 3), Seat::White));
    assert!(!is_cell_guarded(&pos, Coord::new(4, 5), Seat::White));
}

#[test]
fn test_impassable_intermediate_is_per_slider() {
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    put(&mut pos, 4, 0, PieceType::Rook, Seat::Black);
    pos.terrain.set(Coord::new(4, 2), TerrainType::Forest);
    assert!(!is_cell_guarded(&pos, Coord::new(4, 4), Seat::White));

    // the queen walks through forest where the rook cannot
    put(&mut pos, 4, 0, PieceType::Queen, Seat::Black);
    assert!(is_cell_guarded(&pos, Coord::new(4, 4), Seat::White));
}

#[test]
fn test_seer_and_bastion_leaps() {
    let mut pos = Position::new(GameMode::TwoEastWest);
    put(&mut pos, 5, 5, PieceType::Bishop, Seat::White);
    put(&mut pos, 8, 8, PieceType::Rook, Seat::White);

    assert!(is_cell_guarded(&pos, Coord::new(5, 7), Seat::Black));
    assert!(is_cell_guarded(&pos, Coord::new(3, 5), Seat::Black));
    assert!(is_cell_guarded(&pos, Coord::new(9, 9), Seat::Black));
    // an adjacent orthogonal cell is out of reach for the bishop
    assert!(!is_cell_guarded(&pos, Coord::new(5, 6), Seat::Black));
}

#[test]
fn test_sanctuary_suppresses_specific_attackers() {
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    let target = Coord::new(6, 6);
    put(&mut pos, 6, 6, PieceType::Knight, Seat::White);
    pos.terrain.set(target, TerrainType::Forest);
    put(&mut pos, 3, 3, PieceType::Bishop, Seat::Black);

    assert!(!is_cell_guarded(&pos, target, Seat::White));

    // pawns are not among the attackers forest protects against
    put(&mut pos, 5, 7, PieceType::Pawn, Seat::Black);
    assert!(is_cell_guarded(&pos, target, Seat::White));
}

#[test]
fn test_target_terrain_blocks_attacker_type() {
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    put(&mut pos, 4, 4, PieceType::Knight, Seat::Black);
    pos.terrain.set(Coord::new(6, 5), TerrainType::Swamp);

    assert!(!is_cell_guarded(&pos, Coord::new(6, 5), Seat::White));
}

#[test]
fn test_allies_do_not_guard_against_each_other() {
    let mut pos = Position::new(GameMode::Alliance2v2);
    put(&mut pos, 4, 0, PieceType::Rook, Seat::Black);

    assert!(!is_cell_guarded(&pos, Coord::new(4, 5), Seat::White));
    assert!(is_cell_guarded(&pos, Coord::new(4, 5), Seat::Red));
}

#[test]
fn test_joust_threat() {
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    put(&mut pos, 4, 4, PieceType::King, Seat::Black);
    assert!(is_cell_guarded(&pos, Coord::new(4, 6), Seat::White));

    // the king cannot leap over its own pieces
    put(&mut pos, 4, 5, PieceType::Pawn, Seat::Black);
    assert!(!is_cell_guarded(&pos, Coord::new(4, 6), Seat::White));

    // nor over a bishop sheltered in swamp
    put(&mut pos, 4, 5, PieceType::Bishop, Seat::White);
    pos.terrain.set(Coord::new(4, 5), TerrainType::Swamp);
    assert!(!is_cell_guarded(&pos, Coord::new(4, 6), Seat::White));
}

#[test]
fn test_pawn_capture_geometry() {
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    put(&mut pos, 6, 4, PieceType::Pawn, Seat::White);

    assert!(is_cell_guarded(&pos, Coord::new(5, 3), Seat::Black));
    assert!(is_cell_guarded(&pos, Coord::new(5, 5), Seat::Black));
    assert!(!is_cell_guarded(&pos, Coord::new(5, 4), Seat::Black));
    // backflip captures
    assert!(is_cell_guarded(&pos, Coord::new(8, 6), Seat::Black));
    assert!(is_cell_guarded(&pos, Coord::new(8, 2), Seat::Black));
    assert!(!is_cell_guarded(&pos, Coord::new(8, 4), Seat::Black));
}

#[test]
fn test_four_seat_pawn_captures_orthogonally() {
    let mut pos = Position::new(GameMode::FourPlayer);
    // red advances toward the south-east corner
    put(&mut pos, 2, 2, PieceType::Pawn, Seat::Red);

    assert!(is_cell_guarded(&pos, Coord::new(3, 2), Seat::White));
    assert!(is_cell_guarded(&pos, Coord::new(2, 3), Seat::Blue));
    assert!(!is_cell_guarded(&pos, Coord::new(3, 3), Seat::White));
}

#[test]
fn test_is_in_check() {
    let mut pos = Position::new(GameMode::TwoNorthSouth);
    assert!(!is_in_check(&pos, Seat::White));

    put(&mut pos, 11, 5, PieceType::King, Seat::White);
    put(&mut pos, 0, 5, PieceType::Rook, Seat::Black);
    assert!(is_in_check(&pos, Seat::White));

    put(&mut pos, 6, 5, PieceType::Pawn, Seat::White);
    assert!(!is_in_check(&pos, Seat::White));
}
