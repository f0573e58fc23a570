use super::*;

#[test]
fn test_coord_offset_stays_on_board() {
    let c = Coord::new(0, 11);
    assert_eq!(c.offset(1, -1), Some(Coord::new(1, 10)));
    assert_eq!(c.offset(-1, 0), None);
    assert_eq!(c.offset(0, 1), None);
}

#[test]
fn test_coord_index_roundtrip_corners() {
    assert_eq!(Coord::new(0, 0).index(), 0);
    assert_eq!(Coord::new(11, 11).index(), CELLS - 1);
    assert_eq!(Coord::from_index(13), Coord::new(1, 1));
    assert_eq!(Coord::all().count(), CELLS);
}

#[test]
fn test_alliance_teams() {
    let mode = GameMode::Alliance2v2;
    assert!(mode.are_allies(Seat::White, Seat::Black));
    assert!(mode.are_allies(Seat::Red, Seat::Blue));
    assert!(!mode.are_allies(Seat::White, Seat::Red));

    // free-for-all: every seat stands alone
    assert!(!GameMode::FourPlayer.are_allies(Seat::White, Seat::Black));
}

#[test]
fn test_mode_tags() {
    for mode in [
        GameMode::TwoNorthSouth,
        GameMode::TwoEastWest,
        GameMode::FourPlayer,
        GameMode::Alliance2v2,
    ] {
        assert_eq!(GameMode::from_tag(mode.tag()), Some(mode));
    }
    assert_eq!(GameMode::from_tag("chess960"), None);
}

#[test]
fn test_piece_chars() {
    for kind in PieceType::ALL {
        assert_eq!(PieceType::from_char(kind.to_char()), Some(kind));
    }
    for seat in Seat::ALL {
        assert_eq!(Seat::from_char(seat.to_char()), Some(seat));
    }
    for t in TerrainType::ALL {
        assert_eq!(TerrainType::from_char(t.to_char()), Some(t));
    }
}
