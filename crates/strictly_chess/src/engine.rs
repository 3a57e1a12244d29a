//! Rules-engine contract and the `shakmaty`-backed implementation.
//!
//! The engine is the single source of truth for chess legality. The session
//! controller only ever talks to it through [`RulesEngine`]; it never edits
//! the board itself and never re-derives which moves are legal.

use shakmaty::fen::Fen;
use shakmaty::{
    Bitboard, Board, CastlingMode, Chess, EnPassantMode, File, Position, Rank, Role,
};
use tracing::{debug, instrument, warn};

use crate::{BoardSnapshot, ChessError, Color, EngineRejection, Move, Piece, PieceKind, Square};

/// Operations the session controller needs from a chess rules engine.
pub trait RulesEngine {
    /// Legal moves of the side to move, optionally only those starting at `from`.
    fn legal_moves(&self, from: Option<Square>) -> Vec<Move>;

    /// The side whose turn it is.
    fn side_to_move(&self) -> Color;

    /// The piece standing on `square`.
    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// A read-only copy of the current board.
    fn snapshot(&self) -> BoardSnapshot;

    /// Executes `mv`, updating board and turn together.
    ///
    /// # Errors
    ///
    /// Returns [`EngineRejection`] and leaves the position untouched when the
    /// move is not legal here.
    fn execute(&mut self, mv: Move) -> Result<(), EngineRejection>;

    /// Reverts exactly one executed move. Returns `false` if none was played.
    fn undo_last(&mut self) -> bool;

    /// Whether the side to move is in check.
    fn is_in_check(&self) -> bool;

    /// Whether the side to move is checkmated.
    fn is_checkmate(&self) -> bool;

    /// Whether the side to move is stalemated.
    fn is_stalemate(&self) -> bool;

    /// Any other draw the engine recognises.
    fn is_drawn_otherwise(&self) -> bool;
}

/// What makes two positions "the same" for repetition purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RepetitionKey {
    board: Board,
    turn: shakmaty::Color,
    castling: Bitboard,
    ep_square: Option<shakmaty::Square>,
}

impl RepetitionKey {
    fn of(position: &Chess) -> Self {
        Self {
            board: position.board().clone(),
            turn: position.turn(),
            castling: position.castles().castling_rights(),
            ep_square: position.ep_square(EnPassantMode::Legal),
        }
    }
}

/// Halfmove clock value at which the fifty-move rule draws the game.
const FIFTY_MOVE_PLIES: u32 = 100;

/// Rules engine backed by the `shakmaty` crate.
///
/// Undo is implemented by keeping every earlier position on a stack.
#[derive(Debug, Clone)]
pub struct ShakmatyEngine {
    position: Chess,
    undo_stack: Vec<Chess>,
    seen: Vec<RepetitionKey>,
}

impl ShakmatyEngine {
    /// Creates an engine at the standard starting position.
    #[instrument]
    pub fn new() -> Self {
        Self::with_position(Chess::default())
    }

    /// Creates an engine from a FEN string.
    ///
    /// # Errors
    ///
    /// Returns [`ChessError`] when the text is not FEN or describes an
    /// impossible position.
    #[instrument]
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|e| ChessError::new(format!("Invalid FEN '{}': {}", fen, e)))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| ChessError::new(format!("Illegal position '{}': {}", fen, e)))?;
        debug!(fen, "Loaded position from FEN");
        Ok(Self::with_position(position))
    }

    fn with_position(position: Chess) -> Self {
        let seen = vec![RepetitionKey::of(&position)];
        Self {
            position,
            undo_stack: Vec::new(),
            seen,
        }
    }

    /// Finds the engine move matching `mv`.
    ///
    /// A pawn reaching the last rank without a promotion piece is promoted to
    /// a queen.
    fn find_legal(&self, mv: Move) -> Option<shakmaty::Move> {
        let wanted = mv.promotion.unwrap_or(PieceKind::Queen);
        self.position.legal_moves().into_iter().find(|candidate| {
            let converted = from_engine_move(candidate);
            converted.from == mv.from
                && converted.to == mv.to
                && converted.promotion.is_none_or(|kind| kind == wanted)
        })
    }
}

impl Default for ShakmatyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for ShakmatyEngine {
    #[instrument(skip(self))]
    fn legal_moves(&self, from: Option<Square>) -> Vec<Move> {
        self.position
            .legal_moves()
            .iter()
            .map(from_engine_move)
            .filter(|mv| from.is_none_or(|sq| mv.from == sq))
            .collect()
    }

    fn side_to_move(&self) -> Color {
        from_engine_color(self.position.turn())
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position
            .board()
            .piece_at(to_engine_square(square))
            .map(from_engine_piece)
    }

    fn snapshot(&self) -> BoardSnapshot {
        let mut grid = [[None; 8]; 8];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                if let Ok(square) = Square::from_grid(row, col) {
                    *cell = self.piece_at(square);
                }
            }
        }
        BoardSnapshot::new(grid)
    }

    #[instrument(skip(self), fields(mv = %mv))]
    fn execute(&mut self, mv: Move) -> Result<(), EngineRejection> {
        if self.position.legal_moves().is_empty() {
            warn!("Move attempted in a finished position");
            return Err(EngineRejection::GameOver);
        }
        let Some(engine_move) = self.find_legal(mv) else {
            warn!("Engine rejected move");
            return Err(EngineRejection::Illegal(mv));
        };

        self.undo_stack.push(self.position.clone());
        self.position.play_unchecked(&engine_move);
        self.seen.push(RepetitionKey::of(&self.position));
        debug!(ply = self.undo_stack.len(), "Move executed");
        Ok(())
    }

    #[instrument(skip(self))]
    fn undo_last(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.position = previous;
                self.seen.pop();
                debug!(ply = self.undo_stack.len(), "Move undone");
                true
            }
            None => {
                debug!("Nothing to undo");
                false
            }
        }
    }

    fn is_in_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    #[instrument(skip(self))]
    fn is_drawn_otherwise(&self) -> bool {
        if self.position.is_insufficient_material() {
            debug!("Draw by insufficient material");
            return true;
        }
        if self.position.halfmoves() >= FIFTY_MOVE_PLIES {
            debug!("Draw by fifty-move rule");
            return true;
        }
        let current = RepetitionKey::of(&self.position);
        let repeats = self.seen.iter().filter(|key| **key == current).count();
        if repeats >= 3 {
            debug!(repeats, "Draw by threefold repetition");
            return true;
        }
        false
    }
}

// ─────────────────────────────────────────────────────────────
//  Conversions between shakmaty and domain types
// ─────────────────────────────────────────────────────────────

fn to_engine_square(square: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        File::new(u32::from(square.file())),
        Rank::new(u32::from(square.rank())),
    )
}

fn from_engine_square(square: shakmaty::Square) -> Square {
    // shakmaty indexes squares a1 = 0 .. h8 = 63, same as `Square::index`.
    Square::from_index(usize::from(square))
        .unwrap_or_else(|| unreachable!("shakmaty squares are always on the board"))
}

fn from_engine_color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

fn from_engine_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn from_engine_piece(piece: shakmaty::Piece) -> Piece {
    Piece::new(from_engine_color(piece.color), from_engine_role(piece.role))
}

/// Converts an engine move, expressing castling as the king's two-square step.
fn from_engine_move(mv: &shakmaty::Move) -> Move {
    match *mv {
        shakmaty::Move::Normal {
            from,
            to,
            promotion,
            ..
        } => Move::new(
            from_engine_square(from),
            from_engine_square(to),
            promotion.map(from_engine_role),
        ),
        shakmaty::Move::EnPassant { from, to } => {
            Move::simple(from_engine_square(from), from_engine_square(to))
        }
        shakmaty::Move::Castle { king, rook } => {
            let king = from_engine_square(king);
            let rook = from_engine_square(rook);
            let file = if rook.file() > king.file() { 6 } else { 2 };
            let to = Square::new(file, king.rank()).unwrap_or(king);
            Move::simple(king, to)
        }
        shakmaty::Move::Put { to, .. } => {
            // Drops only exist in crazyhouse; standard chess never produces them.
            let to = from_engine_square(to);
            Move::simple(to, to)
        }
    }
}
