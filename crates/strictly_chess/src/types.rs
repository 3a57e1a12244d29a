//! Core domain types for the chess session.
//!
//! These types are independent of the rules engine so the controller, the
//! renderer and the tests can all speak about squares, pieces and moves
//! without touching engine internals.

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// White (moves first).
    White,
    /// Black.
    Black,
}

impl Color {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the display label for this side.
    pub fn label(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// Pawn.
    Pawn,
    /// Knight.
    Knight,
    /// Bishop.
    Bishop,
    /// Rook.
    Rook,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl PieceKind {
    /// Returns the uppercase letter used in algebraic notation (`P` for pawns).
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Piece {
    /// Owner of the piece.
    pub color: Color,
    /// What the piece is.
    pub kind: PieceKind,
}

impl Piece {
    /// Returns the FEN-style letter: uppercase for White, lowercase for Black.
    pub fn symbol(self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

/// Errors produced when converting grid or algebraic coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CoordError {
    /// Row or column outside `0..8`.
    #[display("Grid position ({}, {}) is off the board", row, col)]
    OffBoard {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// Text that is not a square name such as `e4`.
    #[display("'{}' is not a square name", _0)]
    BadName(#[error(not(source))] String),
}

/// A square on the board in algebraic terms.
///
/// Files and ranks are stored zero-based: file 0 is `a`, rank 0 is `1`.
/// The grid used by the renderer is stored top-to-bottom from Black's back
/// rank, so grid row 0 is rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square from zero-based file and rank, if both are on the board.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    /// Converts a renderer grid position (row 0 = rank 8) into a square.
    pub fn from_grid(row: usize, col: usize) -> Result<Self, CoordError> {
        if row >= 8 || col >= 8 {
            return Err(CoordError::OffBoard { row, col });
        }
        Ok(Self {
            file: col as u8,
            rank: 7 - row as u8,
        })
    }

    /// Returns the renderer grid position `(row, col)` of this square.
    pub fn to_grid(self) -> (usize, usize) {
        (7 - self.rank as usize, self.file as usize)
    }

    /// Zero-based file (0 = `a`).
    pub fn file(self) -> u8 {
        self.file
    }

    /// Zero-based rank (0 = rank `1`).
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Index in `a1 = 0 .. h8 = 63` order.
    pub fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// Inverse of [`Square::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        (index < 64).then(|| Self {
            file: (index % 8) as u8,
            rank: (index / 8) as u8,
        })
    }

    /// Whether the square is a light square.
    pub fn is_light(self) -> bool {
        (self.file + self.rank) % 2 == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(CoordError::BadName(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(|| CoordError::BadName(s.to_string()))
    }
}

/// A move from one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// Origin square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Piece a pawn turns into on the last rank.
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a non-promoting move.
    pub fn simple(from: Square, to: Square) -> Self {
        Self::new(from, to, None)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Squares of the most recently executed move, kept for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct LastMove {
    /// Where the piece came from.
    pub from: Square,
    /// Where the piece landed.
    pub to: Square,
}

impl LastMove {
    /// Whether `square` is one of the two highlighted squares.
    pub fn touches(&self, square: Square) -> bool {
        self.from == square || self.to == square
    }
}

impl From<Move> for LastMove {
    fn from(mv: Move) -> Self {
        Self::new(mv.from, mv.to)
    }
}

/// Who plays whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// One human against the random mover.
    SinglePlayer {
        /// Side controlled by the human.
        human: Color,
    },
    /// Two humans sharing the board.
    TwoPlayer,
}

impl GameMode {
    /// Single-player with the human on White.
    pub fn single_player() -> Self {
        GameMode::SinglePlayer {
            human: Color::White,
        }
    }

    /// Returns the side driven by the AI, if any.
    pub fn ai_side(self) -> Option<Color> {
        match self {
            GameMode::SinglePlayer { human } => Some(human.opponent()),
            GameMode::TwoPlayer => None,
        }
    }

    /// Whether a human may act when `side` is to move.
    pub fn human_controls(self, side: Color) -> bool {
        self.ai_side() != Some(side)
    }

    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            GameMode::SinglePlayer { .. } => "1 Player",
            GameMode::TwoPlayer => "2 Players",
        }
    }
}

/// Read-only copy of the board, indexed `[row][col]` with row 0 = rank 8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    grid: [[Option<Piece>; 8]; 8],
}

impl BoardSnapshot {
    /// Creates a snapshot from a grid.
    pub fn new(grid: [[Option<Piece>; 8]; 8]) -> Self {
        Self { grid }
    }

    /// An empty board.
    pub fn empty() -> Self {
        Self {
            grid: [[None; 8]; 8],
        }
    }

    /// Returns the piece at `square`.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let (row, col) = square.to_grid();
        self.grid[row][col]
    }

    /// Returns the grid rows, top (rank 8) first.
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.grid
    }

    /// Renders the position as eight lines of FEN-style letters, `.` for empty.
    pub fn display(&self) -> String {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', Piece::symbol))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
