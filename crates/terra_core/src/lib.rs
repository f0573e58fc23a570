pub mod attacks;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod inventory;
pub mod movegen;
pub mod perft;
pub mod phase;
pub mod presets;
pub mod setup;
pub mod snapshot;
pub mod terrain;
pub mod territory;
pub mod types;

// Re-export the rules surface (not engine-specific)
pub use attacks::{is_cell_guarded, is_in_check};
pub use board::*;
pub use config::{PieceCounts, RulesConfig, SeatingRules, TileCounts};
pub use error::{ConfigError, RejectedAction, SnapshotError};
pub use game::{ActionOutcome, EndReason, MatchState, Verdict};
pub use inventory::Inventory;
pub use movegen::*;
pub use perft::perft;
pub use phase::{Action, ActionKind, Phase};
pub use presets::{Preset, PresetReport};
pub use setup::{Authority, Placement};
pub use snapshot::{decode_seed, encode_seed, LayoutSnapshot};
pub use territory::{counterpart, in_territory, territory_of, SeatFrame};
pub use types::*;

// =============================================================================
// Engine trait, implemented by every computer opponent
// =============================================================================

/// How far an engine may look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum search depth in plies
    pub depth: u8,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self { depth }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(2)
    }
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score in centipawns from the searching seat's perspective
    pub score: i32,
    /// Search depth reached
    pub depth: u8,
    /// Number of nodes searched (for stats)
    pub nodes: u64,
}

/// Trait that all engines must implement.
///
/// Engines only ever see a raw [`Position`] and the seat to move. The move
/// they return is a proposal: the caller resubmits it through
/// [`MatchState::move_piece`], which validates it like any other move.
pub trait Engine: Send {
    fn search(&mut self, pos: &Position, seat: Seat, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name for reports and the leaderboard
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
