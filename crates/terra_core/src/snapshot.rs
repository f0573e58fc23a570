//! Layout snapshots.
//!
//! A snapshot is the board and terrain of a position under a name, with no
//! match state attached. It travels either as JSON or as a compact seed:
//!
//! ```text
//! <mode>|<12 piece rows>|<12 terrain rows>
//! ```
//!
//! Rows are separated by `/` and listed from row 0. A piece row is a run of
//! tokens: a decimal count of empty cells, or a seat letter (`w b r u`)
//! followed by a piece letter (`K Q R B N P`). A terrain row is exactly twelve
//! of `. f s m d`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::SnapshotError;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub at: Coord,
    pub piece: Piece,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub at: Coord,
    pub terrain: TerrainType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub name: String,
    pub mode: GameMode,
    pub pieces: Vec<PlacedPiece>,
    /// Non-flat tiles only.
    pub terrain: Vec<PlacedTile>,
}

impl LayoutSnapshot {
    /// Records the layout of `pos` in board order.
    pub fn capture(name: impl Into<String>, pos: &Position) -> Self {
        let pieces = pos
            .board
            .pieces()
            .map(|(at, piece)| PlacedPiece { at, piece })
            .collect();
        let terrain = Coord::all()
            .filter_map(|at| {
                let terrain = pos.terrain_at(at);
                (!terrain.is_flat()).then_some(PlacedTile { at, terrain })
            })
            .collect();
        Self {
            name: name.into(),
            mode: pos.mode,
            pieces,
            terrain,
        }
    }

    /// Rebuilds the position, refusing anything a board cannot hold.
    pub fn to_position(&self) -> Result<Position, SnapshotError> {
        let mut pos = Position::new(self.mode);

        let mut seen = HashSet::new();
        for p in &self.pieces {
            check_cell(p.at, &mut seen)?;
            check_seat(p.piece.owner, self.mode)?;
            pos.board.set(p.at, Some(p.piece));
        }
        seen.clear();
        for t in &self.terrain {
            check_cell(t.at, &mut seen)?;
            pos.terrain.set(t.at, t.terrain);
        }
        Ok(pos)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_seed(&self) -> Result<String, SnapshotError> {
        Ok(encode_seed(&self.to_position()?))
    }

    pub fn from_seed(name: impl Into<String>, seed: &str) -> Result<Self, SnapshotError> {
        Ok(Self::capture(name, &decode_seed(seed)?))
    }
}

fn check_cell(c: Coord, seen: &mut HashSet<Coord>) -> Result<(), SnapshotError> {
    if !c.is_valid() {
        return Err(SnapshotError::OffBoard(c));
    }
    if !seen.insert(c) {
        return Err(SnapshotError::DuplicateCell(c));
    }
    Ok(())
}

fn check_seat(seat: Seat, mode: GameMode) -> Result<(), SnapshotError> {
    if mode.has_seat(seat) {
        Ok(())
    } else {
        Err(SnapshotError::SeatNotInMode { seat, mode })
    }
}

pub fn encode_seed(pos: &Position) -> String {
    let mut pieces = Vec::with_capacity(BOARD_SIZE as usize);
    let mut terrain = Vec::with_capacity(BOARD_SIZE as usize);

    for row in 0..BOARD_SIZE {
        let mut line = String::new();
        let mut empty = 0;
        for col in 0..BOARD_SIZE {
            match pos.piece_at(Coord::new(row, col)) {
                None => empty += 1,
                Some(pc) => {
                    if empty > 0 {
                        line.push_str(&empty.to_string());
                        empty = 0;
                    }
                    line.push(pc.owner.to_char());
                    line.push(pc.kind.to_char());
                }
            }
        }
        if empty > 0 {
            line.push_str(&empty.to_string());
        }
        pieces.push(line);

        terrain.push(
            (0..BOARD_SIZE)
                .map(|col| pos.terrain_at(Coord::new(row, col)).to_char())
                .collect::<String>(),
        );
    }

    format!("{}|{}|{}", pos.mode.tag(), pieces.join("/"), terrain.join("/"))
}

pub fn decode_seed(seed: &str) -> Result<Position, SnapshotError> {
    let mut parts = seed.trim().split('|');
    let (Some(tag), Some(piece_part), Some(terrain_part), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(SnapshotError::MalformedSeed);
    };
    let mode = GameMode::from_tag(tag).ok_or_else(|| SnapshotError::UnknownMode(tag.to_string()))?;
    let mut pos = Position::new(mode);

    let rows = split_rows(piece_part, "piece")?;
    for (row, line) in rows.iter().enumerate() {
        decode_piece_row(&mut pos, row, line)?;
    }

    let rows = split_rows(terrain_part, "terrain")?;
    for (row, line) in rows.iter().enumerate() {
        if line.chars().count() != BOARD_SIZE as usize {
            return Err(SnapshotError::RowWidth {
                section: "terrain",
                row,
            });
        }
        for (col, ch) in line.chars().enumerate() {
            let terrain = TerrainType::from_char(ch).ok_or(SnapshotError::BadToken {
                section: "terrain",
                row,
                token: ch,
            })?;
            pos.terrain.set(Coord::new(row as u8, col as u8), terrain);
        }
    }
    Ok(pos)
}

fn split_rows<'a>(part: &'a str, section: &'static str) -> Result<Vec<&'a str>, SnapshotError> {
    let rows: Vec<&str> = part.split('/').collect();
    if rows.len() != BOARD_SIZE as usize {
        return Err(SnapshotError::RowCount {
            section,
            found: rows.len(),
        });
    }
    Ok(rows)
}

fn decode_piece_row(pos: &mut Position, row: usize, line: &str) -> Result<(), SnapshotError> {
    let bad = |token| SnapshotError::BadToken {
        section: "piece",
        row,
        token,
    };
    let too_wide = || SnapshotError::RowWidth {
        section: "piece",
        row,
    };

    let width = BOARD_SIZE as usize;
    let mut col = 0usize;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if let Some(d) = ch.to_digit(10) {
            // counts may run to two digits
            let mut run = d as usize;
            while let Some(next) = chars.peek().and_then(|c| c.to_digit(10)) {
                run = run.saturating_mul(10).saturating_add(next as usize);
                chars.next();
            }
            if run == 0 {
                return Err(bad(ch));
            }
            col = col.saturating_add(run);
        } else {
            let seat = Seat::from_char(ch).ok_or_else(|| bad(ch))?;
            let kind_ch = chars.next().ok_or_else(|| bad(ch))?;
            let kind = match kind_ch {
                'K' | 'Q' | 'R' | 'B' | 'N' | 'P' => PieceType::from_char(kind_ch),
                _ => None,
            }
            .ok_or_else(|| bad(kind_ch))?;
            check_seat(seat, pos.mode)?;
            if col >= width {
                return Err(too_wide());
            }
            pos.board
                .set(Coord::new(row as u8, col as u8), Some(Piece::new(kind, seat)));
            col += 1;
        }
        if col > width {
            return Err(too_wide());
        }
    }
    if col != width {
        return Err(too_wide());
    }
    Ok(())
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
