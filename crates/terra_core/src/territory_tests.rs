use super::*;

#[test]
fn test_two_seat_territories_split_the_board() {
    for mode in [GameMode::TwoNorthSouth, GameMode::TwoEastWest] {
        let white = territory_of(Seat::White, mode);
        let black = territory_of(Seat::Black, mode);
        assert_eq!(white.len(), 72);
        assert_eq!(black.len(), 72);
        assert!(white.iter().all(|c| !black.contains(c)));
    }
}

#[test]
fn test_north_south_halves() {
    let mode = GameMode::TwoNorthSouth;
    assert!(in_territory(Seat::White, mode, Coord::new(11, 0)));
    assert!(in_territory(Seat::White, mode, Coord::new(6, 5)));
    assert!(!in_territory(Seat::White, mode, Coord::new(5, 5)));
    assert!(in_territory(Seat::Black, mode, Coord::new(0, 11)));
    assert!(!in_territory(Seat::Red, mode, Coord::new(0, 0)));
}

#[test]
fn test_four_seat_quadrants() {
    let mode = GameMode::FourPlayer;
    let mut seen = std::collections::HashSet::new();
    for &seat in mode.seats() {
        let cells = territory_of(seat, mode);
        assert_eq!(cells.len(), 36);
        for c in cells {
            assert!(seen.insert(c), "quadrants must not overlap");
        }
    }
    assert_eq!(seen.len(), 144);
    assert!(in_territory(Seat::Red, mode, Coord::new(0, 0)));
    assert!(in_territory(Seat::Black, mode, Coord::new(0, 11)));
    assert!(in_territory(Seat::Blue, mode, Coord::new(11, 11)));
    assert!(in_territory(Seat::White, mode, Coord::new(11, 0)));
}

#[test]
fn test_frame_roundtrip() {
    for mode in [GameMode::TwoEastWest, GameMode::Alliance2v2] {
        for &seat in mode.seats() {
            let frame = SeatFrame::of(seat, mode).unwrap();
            for c in territory_of(seat, mode) {
                let (d, l) = frame.to_local(c);
                assert_eq!(frame.to_board(d, l), Some(c));
            }
        }
    }
}

#[test]
fn test_pawn_directions() {
    assert_eq!(pawn_forward(Seat::White, GameMode::TwoNorthSouth), (-1, 0));
    assert_eq!(pawn_forward(Seat::Black, GameMode::TwoNorthSouth), (1, 0));
    assert_eq!(pawn_forward(Seat::White, GameMode::TwoEastWest), (0, 1));
    assert_eq!(pawn_forward(Seat::Black, GameMode::TwoEastWest), (0, -1));
    assert_eq!(pawn_forward(Seat::White, GameMode::FourPlayer), (-1, 1));
    assert_eq!(pawn_forward(Seat::Red, GameMode::FourPlayer), (1, 1));
    assert_eq!(pawn_forward(Seat::Black, GameMode::FourPlayer), (1, -1));
    assert_eq!(pawn_forward(Seat::Blue, GameMode::FourPlayer), (-1, -1));
}

#[test]
fn test_pawn_capture_vectors() {
    assert_eq!(
        pawn_captures(Seat::White, GameMode::TwoNorthSouth),
        [(-1, -1), (-1, 1)]
    );
    assert_eq!(
        pawn_captures(Seat::Black, GameMode::TwoEastWest),
        [(-1, -1), (1, -1)]
    );
    // diagonal movers capture orthogonally
    assert_eq!(
        pawn_captures(Seat::Red, GameMode::FourPlayer),
        [(1, 0), (0, 1)]
    );
}

#[test]
fn test_counterparts() {
    assert_eq!(counterpart(Seat::White, GameMode::TwoNorthSouth), Some(Seat::Black));
    assert_eq!(counterpart(Seat::Red, GameMode::FourPlayer), Some(Seat::Blue));
    assert_eq!(counterpart(Seat::Red, GameMode::TwoEastWest), None);
}
