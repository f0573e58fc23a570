use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: u8 = 12;
pub const CELLS: usize = 144;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    White,
    Black,
    Red,
    Blue,
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::White, Seat::Black, Seat::Red, Seat::Blue];

    pub fn idx(self) -> usize {
        match self {
            Seat::White => 0,
            Seat::Black => 1,
            Seat::Red => 2,
            Seat::Blue => 3,
        }
    }

    pub fn from_char(c: char) -> Option<Seat> {
        match c {
            'w' => Some(Seat::White),
            'b' => Some(Seat::Black),
            'r' => Some(Seat::Red),
            'u' => Some(Seat::Blue),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Seat::White => 'w',
            Seat::Black => 'b',
            Seat::Red => 'r',
            Seat::Blue => 'u',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Pawn,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceType::King),
            'Q' => Some(PieceType::Queen),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Knight => 'N',
            PieceType::Pawn => 'P',
        }
    }

    /// Sliding pieces stop dead on entering a desert cell.
    pub fn is_slider(self) -> bool {
        matches!(self, PieceType::Queen | PieceType::Rook | PieceType::Bishop)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceType,
    pub owner: Seat,
}

impl Piece {
    pub fn new(kind: PieceType, owner: Seat) -> Self {
        Self { kind, owner }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainType {
    #[default]
    Flat,
    Forest,
    Swamp,
    Mountain,
    Desert,
}

impl TerrainType {
    pub const ALL: [TerrainType; 5] = [
        TerrainType::Flat,
        TerrainType::Forest,
        TerrainType::Swamp,
        TerrainType::Mountain,
        TerrainType::Desert,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_char(c: char) -> Option<TerrainType> {
        match c {
            '.' => Some(TerrainType::Flat),
            'f' => Some(TerrainType::Forest),
            's' => Some(TerrainType::Swamp),
            'm' => Some(TerrainType::Mountain),
            'd' => Some(TerrainType::Desert),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            TerrainType::Flat => '.',
            TerrainType::Forest => 'f',
            TerrainType::Swamp => 's',
            TerrainType::Mountain => 'm',
            TerrainType::Desert => 'd',
        }
    }

    pub fn is_flat(self) -> bool {
        self == TerrainType::Flat
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    TwoNorthSouth,
    TwoEastWest,
    FourPlayer,
    Alliance2v2,
}

impl GameMode {
    /// Seats in turn order.
    pub fn seats(self) -> &'static [Seat] {
        match self {
            GameMode::TwoNorthSouth | GameMode::TwoEastWest => &[Seat::White, Seat::Black],
            // clockwise from the south-west corner
            GameMode::FourPlayer | GameMode::Alliance2v2 => {
                &[Seat::White, Seat::Red, Seat::Black, Seat::Blue]
            }
        }
    }

    pub fn has_seat(self, seat: Seat) -> bool {
        self.seats().contains(&seat)
    }

    pub fn is_four_seat(self) -> bool {
        matches!(self, GameMode::FourPlayer | GameMode::Alliance2v2)
    }

    /// Team index of a seat. Only `Alliance2v2` puts two seats on one team.
    pub fn team_of(self, seat: Seat) -> usize {
        match self {
            GameMode::Alliance2v2 => match seat {
                Seat::White | Seat::Black => 0,
                Seat::Red | Seat::Blue => 1,
            },
            _ => seat.idx(),
        }
    }

    pub fn are_allies(self, a: Seat, b: Seat) -> bool {
        self.team_of(a) == self.team_of(b)
    }

    pub fn tag(self) -> &'static str {
        match self {
            GameMode::TwoNorthSouth => "ns",
            GameMode::TwoEastWest => "ew",
            GameMode::FourPlayer => "ffa",
            GameMode::Alliance2v2 => "2v2",
        }
    }

    pub fn from_tag(tag: &str) -> Option<GameMode> {
        match tag {
            "ns" => Some(GameMode::TwoNorthSouth),
            "ew" => Some(GameMode::TwoEastWest),
            "ffa" => Some(GameMode::FourPlayer),
            "2v2" => Some(GameMode::Alliance2v2),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Checked constructor for signed arithmetic results.
    pub fn at(row: i8, col: i8) -> Option<Coord> {
        let n = BOARD_SIZE as i8;
        if (0..n).contains(&row) && (0..n).contains(&col) {
            Some(Coord::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Whether the cell lies on the 12×12 board. Deserialized coordinates
    /// are not range-checked.
    pub fn is_valid(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    pub fn offset(self, dr: i8, dc: i8) -> Option<Coord> {
        Coord::at(self.row as i8 + dr, self.col as i8 + dc)
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    pub fn from_index(i: usize) -> Coord {
        Coord::new((i / BOARD_SIZE as usize) as u8, (i % BOARD_SIZE as usize) as u8)
    }

    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELLS).map(Coord::from_index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
