use serde::{Deserialize, Serialize};

use crate::types::*;

/// Piece placement on the 12×12 grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [None; CELLS],
        }
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Option<Piece> {
        self.cells[c.index()]
    }

    #[inline]
    pub fn set(&mut self, c: Coord, pc: Option<Piece>) {
        self.cells[c.index()] = pc;
    }

    pub fn take(&mut self, c: Coord) -> Option<Piece> {
        self.cells[c.index()].take()
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|p| (Coord::from_index(i), p)))
    }

    pub fn pieces_of(&self, seat: Seat) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.owner == seat)
    }

    pub fn count(&self, seat: Seat, kind: PieceType) -> usize {
        self.pieces_of(seat).filter(|(_, p)| p.kind == kind).count()
    }

    pub fn king_of(&self, seat: Seat) -> Option<Coord> {
        self.pieces_of(seat)
            .find(|(_, p)| p.kind == PieceType::King)
            .map(|(c, _)| c)
    }

    pub fn has_pieces(&self, seat: Seat) -> bool {
        self.pieces_of(seat).next().is_some()
    }

    pub fn clear_seat(&mut self, seat: Seat) -> Vec<(Coord, Piece)> {
        let removed: Vec<_> = self.pieces_of(seat).collect();
        for (c, _) in &removed {
            self.set(*c, None);
        }
        removed
    }
}

/// Terrain overlay, co-indexed with [`Board`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainGrid {
    cells: [TerrainType; CELLS],
}

impl Default for TerrainGrid {
    fn default() -> Self {
        Self::flat()
    }
}

impl TerrainGrid {
    pub fn flat() -> Self {
        Self {
            cells: [TerrainType::Flat; CELLS],
        }
    }

    #[inline]
    pub fn get(&self, c: Coord) -> TerrainType {
        self.cells[c.index()]
    }

    #[inline]
    pub fn set(&mut self, c: Coord, t: TerrainType) {
        self.cells[c.index()] = t;
    }

    /// Non-flat tiles among `cells`.
    pub fn count_features<'a>(&self, cells: impl IntoIterator<Item = &'a Coord>) -> usize {
        cells.into_iter().filter(|&&c| !self.get(c).is_flat()).count()
    }
}

/// What an applied move did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: Piece,
    /// Destination capture first, then a joust midpoint capture if any.
    pub captured: Vec<(Coord, Piece)>,
}

/// Replay record of the most recent move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub from: Coord,
    pub to: Coord,
    pub path: Vec<Coord>,
    pub piece: Piece,
}

/// A board, its terrain and the seating it is played under.
///
/// This is the raw snapshot the move generator and the engines work on. It
/// carries no phase or turn information.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub terrain: TerrainGrid,
    pub mode: GameMode,
}

impl Position {
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::empty(),
            terrain: TerrainGrid::flat(),
            mode,
        }
    }

    #[inline]
    pub fn piece_at(&self, c: Coord) -> Option<Piece> {
        self.board.get(c)
    }

    #[inline]
    pub fn terrain_at(&self, c: Coord) -> TerrainType {
        self.terrain.get(c)
    }

    pub fn is_enemy(&self, a: Seat, b: Seat) -> bool {
        !self.mode.are_allies(a, b)
    }

    /// Seats of the mode that still have pieces, in turn order.
    pub fn seats_on_board(&self) -> Vec<Seat> {
        self.mode
            .seats()
            .iter()
            .copied()
            .filter(|&s| self.board.has_pieces(s))
            .collect()
    }

    /// Moves the piece and resolves captures, including the joust midpoint.
    ///
    /// Performs no legality checks; returns `None` when the origin is empty.
    pub fn apply_move(&mut self, mv: Move) -> Option<MoveOutcome> {
        let moved = self.board.take(mv.from)?;
        let mut captured = Vec::new();
        if let Some(victim) = self.board.get(mv.to) {
            captured.push((mv.to, victim));
        }
        self.board.set(mv.to, Some(moved));

        if moved.kind == PieceType::King {
            if let Some(mid) = joust_midpoint(mv.from, mv.to) {
                if let Some(victim) = self.board.take(mid) {
                    captured.push((mid, victim));
                }
            }
        }

        Some(MoveOutcome { moved, captured })
    }
}

/// The cell a king leaps over when jousting from `from` to `to`.
pub fn joust_midpoint(from: Coord, to: Coord) -> Option<Coord> {
    let dr = to.row as i8 - from.row as i8;
    let dc = to.col as i8 - from.col as i8;
    match (dr.abs(), dc.abs()) {
        (2, 0) | (0, 2) => from.offset(dr / 2, dc / 2),
        _ => None,
    }
}

/// Cells traversed by a move, origin and destination included.
///
/// Straight-line moves list every cell on the line; any other shape (knight
/// jumps) is just its two endpoints.
pub fn move_path(from: Coord, to: Coord) -> Vec<Coord> {
    let dr = to.row as i8 - from.row as i8;
    let dc = to.col as i8 - from.col as i8;
    let straight = dr == 0 || dc == 0 || dr.abs() == dc.abs();
    if !straight || from == to {
        return vec![from, to];
    }
    let steps = dr.abs().max(dc.abs());
    let (sr, sc) = (dr.signum(), dc.signum());
    (0..=steps)
        .filter_map(|i| from.offset(sr * i, sc * i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_move_captures() {
        let mut pos = Position::new(GameMode::TwoNorthSouth);
        let rook = Piece::new(PieceType::Rook, Seat::White);
        let pawn = Piece::new(PieceType::Pawn, Seat::Black);
        pos.board.set(Coord::new(4, 4), Some(rook));
        pos.board.set(Coord::new(4, 8), Some(pawn));

        let out = pos
            .apply_move(Move::new(Coord::new(4, 4), Coord::new(4, 8)))
            .unwrap();
        assert_eq!(out.moved, rook);
        assert_eq!(out.captured, vec![(Coord::new(4, 8), pawn)]);
        assert_eq!(pos.piece_at(Coord::new(4, 8)), Some(rook));
        assert_eq!(pos.piece_at(Coord::new(4, 4)), None);
    }

    #[test]
    fn test_apply_move_joust_takes_midpoint() {
        let mut pos = Position::new(GameMode::TwoNorthSouth);
        let king = Piece::new(PieceType::King, Seat::White);
        let knight = Piece::new(PieceType::Knight, Seat::Black);
        pos.board.set(Coord::new(6, 6), Some(king));
        pos.board.set(Coord::new(5, 6), Some(knight));

        let out = pos
            .apply_move(Move::new(Coord::new(6, 6), Coord::new(4, 6)))
            .unwrap();
        assert_eq!(out.captured, vec![(Coord::new(5, 6), knight)]);
        assert_eq!(pos.piece_at(Coord::new(5, 6)), None);
    }

    #[test]
    fn test_apply_move_empty_origin() {
        let mut pos = Position::new(GameMode::TwoEastWest);
        assert!(pos
            .apply_move(Move::new(Coord::new(0, 0), Coord::new(1, 1)))
            .is_none());
    }

    #[test]
    fn test_move_path_shapes() {
        let path = move_path(Coord::new(4, 4), Coord::new(4, 7));
        assert_eq!(
            path,
            vec![
                Coord::new(4, 4),
                Coord::new(4, 5),
                Coord::new(4, 6),
                Coord::new(4, 7)
            ]
        );
        let jump = move_path(Coord::new(4, 4), Coord::new(6, 5));
        assert_eq!(jump, vec![Coord::new(4, 4), Coord::new(6, 5)]);
        let diag = move_path(Coord::new(2, 2), Coord::new(0, 0));
        assert_eq!(diag.len(), 3);
    }
}
