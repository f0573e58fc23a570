//! Classical Terra Engine
//!
//! Paranoid alpha-beta search over the full rules, with a terrain-aware
//! material evaluation. This is the scripted opponent for every seat.

mod eval;
mod ordering;
mod search;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terra_core::{Engine, Position, Seat, SearchLimits, SearchResult};
use tracing::debug;

/// Search depth used when the caller does not ask for one.
pub const DEFAULT_DEPTH: u8 = 2;

/// Classical engine using paranoid minimax with alpha-beta pruning.
///
/// This engine uses:
/// - Paranoid minimax (the searching seat and its allies maximise)
/// - MVV-LVA move ordering with terrain terms and a seeded tiebreak
/// - Material, pawn advancement, centre and terrain evaluation
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    seed: u64,
    rng: ChaCha8Rng,
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
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

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, pos: &Position, seat: Seat, limits: SearchLimits) -> SearchResult {
        self.nodes = 0;
        let depth = limits.depth.max(1);

        let best = search::pick_best_move(pos, seat, depth, &mut self.rng, &mut self.nodes);
        debug!(?seat, depth, nodes = self.nodes, ?best, "search finished");

        SearchResult {
            best_move: best.map(|(mv, _)| mv),
            score: best.map(|(_, s)| s).unwrap_or(0),
            depth,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Classical v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}

// Re-export for direct use if needed
pub use eval::{evaluate, piece_value};
pub use ordering::{ordered_moves, score_move};
pub use search::{best_move, play, MATE};
