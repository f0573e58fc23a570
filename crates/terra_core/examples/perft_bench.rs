//! Perft benchmark for profiling the move generator.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p terra_core -- [depth] [seed]
//!
//! Examples:
//!   # Default: depth 3 over the built-in layouts
//!   cargo run --release --example perft_bench -p terra_core
//!
//!   # Custom depth and layout seed
//!   cargo run --release --example perft_bench -p terra_core -- 2 "ns|12/bK11/12/12/12/12/12/12/12/12/11wK/12|............/............/............/............/............/............/............/............/............/............/............/............"

use std::env;
use std::time::Instant;

use terra_core::{decode_seed, perft, GameMode, MatchState, Position, Preset, Seat};

fn main() {
    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);

    // If a seed is provided, use single position mode
    if let Some(seed) = args.get(2) {
        match decode_seed(seed) {
            Ok(pos) => run_single_position(&pos, depth),
            Err(e) => eprintln!("bad seed: {e}"),
        }
    } else {
        run_all_positions(depth);
    }
}

/// Classical formations on a randomized terrain per mode.
fn opening(mode: GameMode) -> Position {
    let mut game = MatchState::new(mode);
    for (i, &seat) in mode.seats().iter().enumerate() {
        let _ = game.apply_preset(seat, Preset::ElementalTerrain, i as u64);
        let _ = game.apply_preset(seat, Preset::ClassicalFormation, 0);
    }
    game.position().clone()
}

fn first_seat(pos: &Position) -> Seat {
    pos.seats_on_board()
        .first()
        .copied()
        .unwrap_or(Seat::White)
}

fn run_single_position(pos: &Position, depth: u8) {
    println!("Mode: {:?}", pos.mode);
    println!("Depth: {depth}");
    println!();

    let start = Instant::now();
    let nodes = perft(pos, first_seat(pos), depth);
    let elapsed = start.elapsed();

    let nps = if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {nps:.0}");
}

fn run_all_positions(depth: u8) {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = std::time::Duration::ZERO;

    for mode in [
        GameMode::TwoNorthSouth,
        GameMode::TwoEastWest,
        GameMode::FourPlayer,
        GameMode::Alliance2v2,
    ] {
        let pos = opening(mode);

        print!("{:.<30}", format!("{mode:?}"));

        let start = Instant::now();
        let nodes = perft(&pos, first_seat(&pos), depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;

        let nps = if elapsed.as_secs_f64() > 0.0 {
            nodes as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        println!(" {nodes:>12} nodes in {elapsed:>8.3?} ({nps:>10.0} nps)");
    }

    println!();
    println!("{:=<70}", "");
    let total_nps = if total_time.as_secs_f64() > 0.0 {
        total_nodes as f64 / total_time.as_secs_f64()
    } else {
        0.0
    };
    println!("TOTAL: {total_nodes} nodes in {total_time:.3?} ({total_nps:.0} nps)");
}
