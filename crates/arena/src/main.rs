//! Arena CLI
//!
//! Plays matches between engines and tracks Elo ratings.

use std::env;
use std::process::ExitCode;

use arena::{
    create_engine, ArenaConfig, ArenaError, EloTracker, MatchConfig, MatchRunner,
    TournamentConfig, TournamentResults,
};
use terra_core::GameMode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Terra arena");
    println!();
    println!("Usage:");
    println!("  arena match <engine_a> <engine_b> [--games N] [--depth D] [--mode M] [--seed S]");
    println!("  arena leaderboard");
    println!("  arena --config FILE");
    println!();
    println!("Engines:");
    println!("  classical[:seed]   - Paranoid minimax with material and terrain eval");
    println!("  random[:seed]      - Uniformly random legal moves");
    println!();
    println!("Modes: ns, ew, ffa, 2v2");
    println!();
    println!("Examples:");
    println!("  arena match classical random --games 20 --depth 2");
    println!("  arena match classical classical:7 --mode 2v2 --seed 42");
}

/// Applies `--games`, `--depth`, `--mode` and `--seed` on top of `config`.
fn parse_overrides(args: &[String], config: &mut ArenaConfig) -> Result<(), String> {
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("{flag} needs a value"))?;
        let bad = || format!("bad value for {flag}: {value}");
        match flag {
            "--games" | "-g" => config.games = value.parse().map_err(|_| bad())?,
            "--depth" | "-d" => config.depth = value.parse().map_err(|_| bad())?,
            "--seed" | "-s" => config.seed = value.parse().map_err(|_| bad())?,
            "--mode" | "-m" => config.mode = GameMode::from_tag(value).ok_or_else(bad)?,
            _ => return Err(format!("unknown option: {flag}")),
        }
        i += 2;
    }
    Ok(())
}

/// Plays every pairing, updates the Elo file and prints the report.
fn run_arena(config: &ArenaConfig) -> Result<(), ArenaError> {
    let pairings = config.pairings();
    info!(pairings = pairings.len(), mode = config.mode.tag(), "arena starting");

    let mut tracker = EloTracker::load_or_default(&config.elo_file)?;
    let mut results = TournamentResults::new(
        &config.engines.join(" / "),
        config.engines.clone(),
        TournamentConfig::from(config),
    );
    let runner = MatchRunner::new(MatchConfig::from(config));

    for (spec_a, spec_b) in pairings {
        let mut engine_a = create_engine(spec_a)?;
        let mut engine_b = create_engine(spec_b)?;

        println!("=== Match: {spec_a} vs {spec_b} ===");
        println!(
            "Games: {}, Depth: {}, Mode: {}",
            config.games,
            config.depth,
            config.mode.tag()
        );
        let result = runner.run_match(engine_a.as_mut(), engine_b.as_mut());
        println!(
            "{spec_a}: {} wins, {} losses, {} draws (score {:.1}%)\n",
            result.wins,
            result.losses,
            result.draws,
            result.score() * 100.0
        );

        tracker.update_ratings(spec_a, spec_b, &result);
        results.add_match(spec_a, spec_b, result);
    }

    print!("{}", results.generate_report());
    println!();
    print!("{}", tracker.format_leaderboard());

    tracker.save(&config.elo_file)?;
    if let Some(path) = &config.results_file {
        results.save(path)?;
    }
    Ok(())
}

fn show_leaderboard(config: &ArenaConfig) -> Result<(), ArenaError> {
    let tracker = EloTracker::load_or_default(&config.elo_file)?;
    if tracker.ratings.is_empty() {
        println!("No arena data found. Run some matches first!");
    } else {
        print!("{}", tracker.format_leaderboard());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return ExitCode::SUCCESS;
    };

    let outcome = match command.as_str() {
        "match" if args.len() >= 4 => {
            let mut config = ArenaConfig {
                engines: vec![args[2].clone(), args[3].clone()],
                ..Default::default()
            };
            match parse_overrides(&args[4..], &mut config) {
                Ok(()) => run_arena(&config),
                Err(msg) => {
                    eprintln!("Error: {msg}");
                    print_usage();
                    return ExitCode::FAILURE;
                }
            }
        }
        "match" => {
            eprintln!("Error: match requires two engine specifications");
            print_usage();
            return ExitCode::FAILURE;
        }
        "--config" | "-c" => match args.get(2) {
            Some(path) => ArenaConfig::load(path).and_then(|config| run_arena(&config)),
            None => {
                eprintln!("Error: --config requires a file");
                return ExitCode::FAILURE;
            }
        },
        "leaderboard" | "elo" => show_leaderboard(&ArenaConfig::default()),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "arena failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_overrides() {
        let mut config = ArenaConfig::default();
        parse_overrides(
            &args(&["--games", "4", "-d", "3", "--mode", "ffa", "--seed", "9"]),
            &mut config,
        )
        .unwrap();
        assert_eq!(config.games, 4);
        assert_eq!(config.depth, 3);
        assert_eq!(config.mode, GameMode::FourPlayer);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_bad_overrides() {
        let mut config = ArenaConfig::default();
        assert!(parse_overrides(&args(&["--games"]), &mut config).is_err());
        assert!(parse_overrides(&args(&["--mode", "hex"]), &mut config).is_err());
        assert!(parse_overrides(&args(&["--fast", "1"]), &mut config).is_err());
        assert_eq!(config.games, ArenaConfig::default().games);
    }
}
