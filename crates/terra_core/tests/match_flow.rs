//! Whole matches driven through the public `MatchState` surface.

use terra_core::*;

fn c(row: u8, col: u8) -> Coord {
    Coord::new(row, col)
}

/// The action log of a short north/south match up to the first moves.
fn opening_script() -> Vec<(Seat, Action)> {
    vec![
        (Seat::White, Action::Preset { preset: Preset::ElementalTerrain, seed: 21 }),
        (Seat::Black, Action::Preset { preset: Preset::RandomizeTerrain, seed: 22 }),
        (Seat::White, Action::Ready),
        (Seat::Black, Action::Ready),
        (Seat::White, Action::Preset { preset: Preset::RandomizeUnits, seed: 23 }),
        (Seat::Black, Action::Preset { preset: Preset::MirrorBoard, seed: 0 }),
        (Seat::White, Action::Ready),
        (Seat::Black, Action::Ready),
    ]
}

#[test]
fn test_replicas_agree_on_serialized_log() {
    let log = opening_script();
    let wire = serde_json::to_string(&log).unwrap();
    let replayed: Vec<(Seat, Action)> = serde_json::from_str(&wire).unwrap();

    let mut a = MatchState::new(GameMode::TwoNorthSouth);
    let mut b = MatchState::new(GameMode::TwoNorthSouth);
    for ((seat, action), (seat_b, action_b)) in log.into_iter().zip(replayed) {
        assert_eq!(a.apply(seat, action), b.apply(seat_b, action_b));
    }
    assert_eq!(a.phase(), Phase::Combat);
    assert_eq!(a.position(), b.position());
    assert!(a.layout_is_consistent());

    // both replicas accept the same first move
    let seat = a.turn().unwrap();
    let mv = all_legal_moves(a.position(), seat)[0];
    assert_eq!(
        a.apply(seat, Action::Move(mv)),
        b.apply(seat, Action::Move(mv))
    );
    assert_eq!(a.position(), b.position());
    assert_ne!(a.turn(), Some(seat));
}

#[test]
fn test_snapshot_mid_match() {
    let mut game = MatchState::new(GameMode::TwoNorthSouth);
    for (seat, action) in opening_script() {
        game.apply(seat, action).unwrap();
    }
    let snap = LayoutSnapshot::capture("after deployment", game.position());
    let restored = LayoutSnapshot::from_json(&snap.to_json().unwrap())
        .unwrap()
        .to_position()
        .unwrap();
    assert_eq!(&restored, game.position());
    assert_eq!(decode_seed(&encode_seed(&restored)).unwrap(), restored);

    // a restored layout can be played from directly
    let resumed = MatchState::from_position(restored, RulesConfig::default());
    assert_eq!(resumed.phase(), Phase::Combat);
    assert_eq!(resumed.turn(), Some(Seat::White));
}

#[test]
fn test_alliance_partners_never_capture_each_other() {
    let mode = GameMode::Alliance2v2;
    let mut game = MatchState::new(mode);
    for (i, &seat) in mode.seats().iter().enumerate() {
        game.apply_preset(seat, Preset::ClassicalFormation, 0).unwrap();
        game.apply_preset(seat, Preset::RandomizeTerrain, i as u64)
            .unwrap();
    }
    for _ in 0..2 {
        for &seat in mode.seats() {
            game.ready(seat).unwrap();
        }
    }
    assert_eq!(game.phase(), Phase::Combat);

    // play the first legal move of each seat for a few rounds
    for _ in 0..12 {
        let Some(seat) = game.turn() else { break };
        for mv in all_legal_moves(game.position(), seat) {
            if let Some(target) = game.position().piece_at(mv.to) {
                assert!(!mode.are_allies(seat, target.owner));
            }
        }
        let mv = all_legal_moves(game.position(), seat)[0];
        let outcome = game.move_piece(seat, mv.from, mv.to).unwrap();
        for (_, victim) in outcome.captured {
            assert!(!mode.are_allies(seat, victim.owner));
        }
    }
}

#[test]
fn test_architect_scenario_into_combat() {
    let mut game = MatchState::new(GameMode::FourPlayer);
    game.apply(Seat::Red, Action::AuthorizeArchitect).unwrap();

    let kings = [
        (Seat::White, c(6, 6)),
        (Seat::Red, c(0, 0)),
        (Seat::Black, c(0, 11)),
        (Seat::Blue, c(11, 11)),
    ];
    for (seat, at) in kings {
        game.place_piece(seat, at, Some(PieceType::King)).unwrap();
    }
    game.place_terrain(Seat::Blue, c(6, 7), TerrainType::Desert)
        .unwrap();
    assert_eq!(
        game.place_piece(Seat::White, c(7, 7), Some(PieceType::King)),
        Err(RejectedAction::UnitLimit {
            kind: PieceType::King,
            limit: 1
        })
    );

    game.apply(Seat::White, Action::FinishDeployment).unwrap();
    assert_eq!(game.phase(), Phase::Combat);
    assert_eq!(game.turn(), Some(Seat::White));

    // the White king steps onto desert and survives its own move
    game.move_piece(Seat::White, c(6, 6), c(6, 7)).unwrap();
    assert_eq!(game.position().board.king_of(Seat::White), Some(c(6, 7)));
    assert_eq!(game.turn(), Some(Seat::Red));
}

#[test]
fn test_rules_file_round_trip() {
    let rules = RulesConfig::from_toml_str(
        r#"
        mercenary = true

        [four_player]
        terrain_quota = 4
        "#,
    )
    .unwrap();
    assert!(rules.mercenary);
    assert_eq!(rules.seating(GameMode::FourPlayer).terrain_quota, 4);
    assert_eq!(rules.seating(GameMode::TwoEastWest).terrain_quota, 10);

    let mut game = MatchState::with_rules(GameMode::Alliance2v2, rules);
    for (i, &seat) in GameMode::Alliance2v2.seats().iter().enumerate() {
        let report = game
            .apply_preset(seat, Preset::RandomizeTerrain, 100 + i as u64)
            .unwrap();
        assert_eq!(report.placed_tiles, 4);
    }
}
