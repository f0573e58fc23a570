//! Error types for the rules engine
//!
//! `RejectedAction` is the only error a match surfaces. A rejected action
//! leaves the match untouched and is never retried by the engine.

use thiserror::Error;

use crate::phase::{ActionKind, Phase};
use crate::types::{Coord, GameMode, PieceType, Seat, TerrainType};

/// Why a placement, move or phase action was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectedAction {
    #[error("{action:?} is not allowed during {phase:?}")]
    WrongPhase { phase: Phase, action: ActionKind },

    #[error("not {seat:?}'s turn")]
    NotYourTurn { seat: Seat },

    #[error("cell ({}, {}) is off the board", .0.row, .0.col)]
    OffBoard(Coord),

    #[error("seat {0:?} is not active in this match")]
    UnknownSeat(Seat),

    #[error("({}, {}) is outside {seat:?}'s territory", .at.row, .at.col)]
    OutsideTerritory { seat: Seat, at: Coord },

    #[error("cell ({}, {}) is held by another seat", .0.row, .0.col)]
    OccupiedByOpponent(Coord),

    #[error("{kind:?} cannot stand on {terrain:?}")]
    TerrainIncompatible { kind: PieceType, terrain: TerrainType },

    #[error("no {0:?} left in inventory")]
    PieceNotInInventory(PieceType),

    #[error("no {0:?} tile left in inventory")]
    TileNotInInventory(TerrainType),

    #[error("unit limit of {limit} reached for {kind:?}")]
    UnitLimit { kind: PieceType, limit: u8 },

    #[error("terrain quota of {quota} tiles reached")]
    QuotaReached { quota: u8 },

    #[error("{0:?} has no seat facing it in this mode")]
    NoCounterpart(Seat),

    #[error("no piece at ({}, {})", .0.row, .0.col)]
    NoPieceAtOrigin(Coord),

    #[error("piece at ({}, {}) belongs to another seat", .0.row, .0.col)]
    NotOwner(Coord),

    #[error("illegal move ({}, {}) -> ({}, {})", .from.row, .from.col, .to.row, .to.col)]
    IllegalMove { from: Coord, to: Coord },

    #[error("{0:?} must field a king before readying")]
    MissingKing(Seat),

    #[error("mode cannot change to {0:?} once a seat is ready")]
    ModeLocked(GameMode),
}

/// Errors from reading or writing layout snapshots
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("malformed seed: expected `<mode>|<pieces>|<terrain>`")]
    MalformedSeed,

    #[error("unknown mode tag `{0}`")]
    UnknownMode(String),

    #[error("expected 12 {section} rows, found {found}")]
    RowCount { section: &'static str, found: usize },

    #[error("{section} row {row} does not cover 12 cells")]
    RowWidth { section: &'static str, row: usize },

    #[error("unexpected `{token}` in {section} row {row}")]
    BadToken {
        section: &'static str,
        row: usize,
        token: char,
    },

    #[error("cell ({}, {}) is off the board", .0.row, .0.col)]
    OffBoard(Coord),

    #[error("cell ({}, {}) listed twice", .0.row, .0.col)]
    DuplicateCell(Coord),

    #[error("seat {seat:?} does not play in {mode:?}")]
    SeatNotInMode { seat: Seat, mode: GameMode },

    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from loading a rules file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid rules: {0}")]
    Invalid(String),
}
