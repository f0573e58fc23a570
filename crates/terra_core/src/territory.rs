//! Seat geometry: home territories, seat-local frames and pawn directions.
//!
//! Every seat owns a frame whose origin is its home edge (two-seat modes) or
//! home corner (four-seat modes). Local coordinates are `(depth, lateral)`:
//! depth grows away from home, lateral runs along the home edge. Formations
//! and mirroring are written once in local coordinates and projected through
//! the frame of whichever seat they are applied to.

use crate::types::{Coord, GameMode, Seat, BOARD_SIZE};

const LAST: i8 = BOARD_SIZE as i8 - 1;
const HALF: u8 = BOARD_SIZE / 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeatFrame {
    origin: (i8, i8),
    depth_step: (i8, i8),
    lateral_step: (i8, i8),
    /// Four-seat frames advance along both axes at once.
    diagonal: bool,
}

impl SeatFrame {
    pub fn of(seat: Seat, mode: GameMode) -> Option<SeatFrame> {
        if !mode.has_seat(seat) {
            return None;
        }
        let frame = match (mode, seat) {
            (GameMode::TwoNorthSouth, Seat::White) => edge((LAST, 0), (-1, 0), (0, 1)),
            (GameMode::TwoNorthSouth, _) => edge((0, 0), (1, 0), (0, 1)),
            (GameMode::TwoEastWest, Seat::White) => edge((0, 0), (0, 1), (1, 0)),
            (GameMode::TwoEastWest, _) => edge((0, LAST), (0, -1), (1, 0)),
            (_, Seat::White) => corner((LAST, 0), (-1, 0), (0, 1)),
            (_, Seat::Red) => corner((0, 0), (1, 0), (0, 1)),
            (_, Seat::Black) => corner((0, LAST), (1, 0), (0, -1)),
            (_, Seat::Blue) => corner((LAST, LAST), (-1, 0), (0, -1)),
        };
        Some(frame)
    }

    /// Board cell for a local `(depth, lateral)` pair, if on the board.
    pub fn to_board(&self, depth: u8, lateral: u8) -> Option<Coord> {
        let (d, l) = (depth as i8, lateral as i8);
        Coord::at(
            self.origin.0 + d * self.depth_step.0 + l * self.lateral_step.0,
            self.origin.1 + d * self.depth_step.1 + l * self.lateral_step.1,
        )
    }

    /// Inverse of [`SeatFrame::to_board`].
    pub fn to_local(&self, c: Coord) -> (u8, u8) {
        let dr = c.row as i8 - self.origin.0;
        let dc = c.col as i8 - self.origin.1;
        // each step vector is a unit vector on exactly one axis
        let depth = dr * self.depth_step.0 + dc * self.depth_step.1;
        let lateral = dr * self.lateral_step.0 + dc * self.lateral_step.1;
        (depth as u8, lateral as u8)
    }

    pub fn contains(&self, c: Coord) -> bool {
        let (depth, lateral) = self.to_local(c);
        depth < HALF && lateral < self.lateral_len()
    }

    pub fn lateral_len(&self) -> u8 {
        if self.diagonal {
            HALF
        } else {
            BOARD_SIZE
        }
    }

    pub fn forward(&self) -> (i8, i8) {
        if self.diagonal {
            (
                self.depth_step.0 + self.lateral_step.0,
                self.depth_step.1 + self.lateral_step.1,
            )
        } else {
            self.depth_step
        }
    }
}

fn edge(origin: (i8, i8), depth_step: (i8, i8), lateral_step: (i8, i8)) -> SeatFrame {
    SeatFrame {
        origin,
        depth_step,
        lateral_step,
        diagonal: false,
    }
}

fn corner(origin: (i8, i8), depth_step: (i8, i8), lateral_step: (i8, i8)) -> SeatFrame {
    SeatFrame {
        origin,
        depth_step,
        lateral_step,
        diagonal: true,
    }
}

/// Cells a seat may deploy into. Empty for seats not seated in `mode`.
pub fn territory_of(seat: Seat, mode: GameMode) -> Vec<Coord> {
    match SeatFrame::of(seat, mode) {
        Some(frame) => Coord::all().filter(|&c| frame.contains(c)).collect(),
        None => Vec::new(),
    }
}

pub fn in_territory(seat: Seat, mode: GameMode, c: Coord) -> bool {
    SeatFrame::of(seat, mode).is_some_and(|f| f.contains(c))
}

/// Single-step pawn advance for a seat.
pub fn pawn_forward(seat: Seat, mode: GameMode) -> (i8, i8) {
    SeatFrame::of(seat, mode).map_or((0, 0), |f| f.forward())
}

/// The two capture vectors flanking a seat's forward direction.
pub fn pawn_captures(seat: Seat, mode: GameMode) -> [(i8, i8); 2] {
    let (dr, dc) = pawn_forward(seat, mode);
    if dr == 0 {
        [(-1, dc), (1, dc)]
    } else if dc == 0 {
        [(dr, -1), (dr, 1)]
    } else {
        [(dr, 0), (0, dc)]
    }
}

/// The seat whose territory faces `seat` across the board.
pub fn counterpart(seat: Seat, mode: GameMode) -> Option<Seat> {
    let other = match seat {
        Seat::White => Seat::Black,
        Seat::Black => Seat::White,
        Seat::Red => Seat::Blue,
        Seat::Blue => Seat::Red,
    };
    (mode.has_seat(seat) && mode.has_seat(other)).then_some(other)
}

#[cfg(test)]
#[path = "territory_tests.rs"]
mod territory_tests;
