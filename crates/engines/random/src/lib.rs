//! Random Move Engine
//!
//! Picks uniformly among the seat's check-filtered moves. It is the arena's
//! baseline opponent and a cheap way to drive the rules through long, odd
//! games in every seating mode.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terra_core::{all_legal_moves, Engine, Position, Seat, SearchLimits, SearchResult};


/// An engine that plays random legal moves.
///
/// Draws come from its own seeded generator, so a game against it replays
/// exactly for the same seed.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    seed: u64,
    rng: ChaCha8Rng,
    nodes: u64,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            nodes: 0,
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, pos: &Position, seat: Seat, _limits: SearchLimits) -> SearchResult {
        let moves = all_legal_moves(pos, seat);
        self.nodes = 1;

        let best_move = moves.choose(&mut self.rng).copied();

        SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}
