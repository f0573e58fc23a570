//! Match runner for playing whole games between engines
//!
//! A game starts from an empty Genesis board. Every seat lays seeded random
//! terrain, readies, deploys the classical formation and readies again; from
//! then on the engines move. Their proposals go back through
//! [`MatchState::move_piece`] like any other player's.

use terra_core::{
    EndReason, Engine, GameMode, MatchState, Phase, Preset, RejectedAction, RulesConfig, Seat,
    SearchLimits,
};
use tracing::{debug, info, warn};

use crate::config::ArenaConfig;
use crate::elo::{GameResult, MatchResult};

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub num_games: u32,
    pub depth: u8,
    /// Plies before the game is scored as a draw
    pub max_plies: u32,
    pub mode: GameMode,
    pub seed: u64,
    /// Swap sides every game; each layout is then played once from each side
    pub alternate_sides: bool,
    pub verbose: bool,
    pub rules: RulesConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            depth: 2,
            max_plies: 300,
            mode: GameMode::TwoNorthSouth,
            seed: 0,
            alternate_sides: true,
            verbose: true,
            rules: RulesConfig::default(),
        }
    }
}

impl From<&ArenaConfig> for MatchConfig {
    fn from(config: &ArenaConfig) -> Self {
        Self {
            num_games: config.games,
            depth: config.depth,
            max_plies: config.max_plies,
            mode: config.mode,
            seed: config.seed,
            alternate_sides: true,
            verbose: config.verbose,
            rules: config.rules.clone(),
        }
    }
}

/// The seats one engine controls. In four-seat modes each engine takes two
/// opposite seats, which are partners in `Alliance2v2`.
pub fn side_seats(mode: GameMode, side: usize) -> &'static [Seat] {
    match (mode.is_four_seat(), side) {
        (false, 0) => &[Seat::White],
        (false, _) => &[Seat::Black],
        (true, 0) => &[Seat::White, Seat::Black],
        (true, _) => &[Seat::Red, Seat::Blue],
    }
}

/// How one game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    /// From the first side's point of view
    pub result: GameResult,
    /// `None` when the ply limit ran out
    pub reason: Option<EndReason>,
    pub plies: u32,
}

pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Plays the configured number of games. The result is from
    /// `engine_a`'s point of view.
    pub fn run_match(&self, engine_a: &mut dyn Engine, engine_b: &mut dyn Engine) -> MatchResult {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let a_first = !self.config.alternate_sides || game_num % 2 == 0;
            let seed = if self.config.alternate_sides {
                self.config.seed.wrapping_add(u64::from(game_num / 2))
            } else {
                self.config.seed.wrapping_add(u64::from(game_num))
            };

            let report = if a_first {
                self.play_game(engine_a, engine_b, seed)
            } else {
                self.play_game(engine_b, engine_a, seed)
            };
            let game_result = if a_first {
                report.result
            } else {
                report.result.flipped()
            };
            result.record(game_result);

            if self.config.verbose {
                let outcome = match game_result {
                    GameResult::Win => "1-0",
                    GameResult::Loss => "0-1",
                    GameResult::Draw => "1/2",
                };
                println!(
                    "Game {}/{}: {} ({}, {} plies, {}) - Score: {}-{}-{}",
                    game_num + 1,
                    self.config.num_games,
                    outcome,
                    if a_first { "first" } else { "second" },
                    report.plies,
                    report
                        .reason
                        .map_or("ply limit".to_string(), |r| format!("{r:?}")),
                    result.wins,
                    result.losses,
                    result.draws
                );
            }
        }

        info!(
            a = engine_a.name(),
            b = engine_b.name(),
            wins = result.wins,
            losses = result.losses,
            draws = result.draws,
            "match finished"
        );
        result
    }

    /// Plays one game with `first` on side 0.
    pub fn play_game(
        &self,
        first: &mut dyn Engine,
        second: &mut dyn Engine,
        seed: u64,
    ) -> GameReport {
        let mode = self.config.mode;
        first.new_game();
        second.new_game();

        let mut game = MatchState::with_rules(mode, self.config.rules.clone());
        if let Err(e) = deploy(&mut game, seed) {
            // the built-in presets always leave a king per seat
            warn!(error = %e, seed, "deployment failed; scoring a draw");
            return GameReport {
                result: GameResult::Draw,
                reason: None,
                plies: 0,
            };
        }

        let limits = SearchLimits::depth(self.config.depth);
        let mut plies = 0;
        while plies < self.config.max_plies {
            let Some(seat) = game.turn() else { break };
            let engine: &mut dyn Engine = if side_seats(mode, 0).contains(&seat) {
                &mut *first
            } else {
                &mut *second
            };

            let search = engine.search(game.position(), seat, limits);
            let accepted = match search.best_move {
                Some(mv) => match game.move_piece(seat, mv.from, mv.to) {
                    Ok(_) => true,
                    Err(e) => {
                        warn!(engine = engine.name(), ?seat, ?mv, error = %e, "illegal proposal");
                        false
                    }
                },
                None => {
                    warn!(engine = engine.name(), ?seat, "no move proposed");
                    false
                }
            };
            if !accepted {
                if let Err(e) = game.forfeit(seat) {
                    warn!(?seat, error = %e, "forfeit refused");
                    break;
                }
            }
            plies += 1;
        }

        let (result, reason) = match game.verdict() {
            Some(verdict) => {
                let result = match verdict.winners.first() {
                    None => GameResult::Draw,
                    Some(seat) if side_seats(mode, 0).contains(seat) => GameResult::Win,
                    Some(_) => GameResult::Loss,
                };
                (result, Some(verdict.reason))
            }
            None => (GameResult::Draw, None),
        };
        debug!(seed, plies, ?result, ?reason, "game over");
        GameReport {
            result,
            reason,
            plies,
        }
    }
}

/// Seeded random terrain, then the classical formation, for every seat.
pub fn deploy(game: &mut MatchState, seed: u64) -> Result<(), RejectedAction> {
    let seats = game.mode().seats();
    for (i, &seat) in seats.iter().enumerate() {
        let terrain_seed = seed.wrapping_mul(31).wrapping_add(i as u64);
        game.apply_preset(seat, Preset::RandomizeTerrain, terrain_seed)?;
    }
    for &seat in seats {
        game.ready(seat)?;
    }
    for &seat in seats {
        game.apply_preset(seat, Preset::ClassicalFormation, 0)?;
    }
    for &seat in seats {
        game.ready(seat)?;
    }
    debug_assert_eq!(game.phase(), Phase::Combat);
    Ok(())
}

/// Runs a single match with default settings
pub fn quick_match(
    engine_a: &mut dyn Engine,
    engine_b: &mut dyn Engine,
    num_games: u32,
    depth: u8,
) -> MatchResult {
    let config = MatchConfig {
        num_games,
        depth,
        ..Default::default()
    };
    MatchRunner::new(config).run_match(engine_a, engine_b)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
