//! Cursor movement for keyboard "taps".

use crossterm::event::KeyCode;
use strictly_chess::{Color, Square};

/// Board cursor in grid coordinates, row 0 being rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    row: usize,
    col: usize,
}

impl Cursor {
    /// Places the cursor on `square`.
    pub fn at(square: Square) -> Self {
        let (row, col) = square.to_grid();
        Self { row, col }
    }

    /// Starting cursor for `side`: on its king's pawn.
    pub fn home(side: Color) -> Self {
        match side {
            Color::White => Self { row: 6, col: 4 },
            Color::Black => Self { row: 1, col: 4 },
        }
    }

    /// Grid row.
    pub fn row(self) -> usize {
        self.row
    }

    /// Grid column.
    pub fn col(self) -> usize {
        self.col
    }

    /// The square under the cursor.
    pub fn square(self) -> Option<Square> {
        Square::from_grid(self.row, self.col).ok()
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::home(Color::White)
    }
}

/// Moves the cursor with arrow keys (or `hjkl`), stopping at the board edge.
pub fn move_cursor(cursor: Cursor, key: KeyCode) -> Cursor {
    let Cursor { row, col } = cursor;
    match key {
        KeyCode::Up | KeyCode::Char('k') => Cursor {
            row: row.saturating_sub(1),
            col,
        },
        KeyCode::Down | KeyCode::Char('j') => Cursor {
            row: (row + 1).min(7),
            col,
        },
        KeyCode::Left | KeyCode::Char('h') => Cursor {
            row,
            col: col.saturating_sub(1),
        },
        KeyCode::Right | KeyCode::Char('l') => Cursor {
            row,
            col: (col + 1).min(7),
        },
        _ => cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_squares() {
        assert_eq!(Cursor::home(Color::White).square(), "e2".parse().ok());
        assert_eq!(Cursor::home(Color::Black).square(), "e7".parse().ok());
    }

    #[test]
    fn test_arrows_follow_board_directions() {
        let start = Cursor::at("e2".parse().unwrap());
        let up = move_cursor(start, KeyCode::Up);
        assert_eq!(up.square(), "e3".parse().ok());
        let right = move_cursor(up, KeyCode::Right);
        assert_eq!(right.square(), "f3".parse().ok());
    }

    #[test]
    fn test_stops_at_edges() {
        let corner = Cursor::at("a8".parse().unwrap());
        assert_eq!(move_cursor(corner, KeyCode::Up), corner);
        assert_eq!(move_cursor(corner, KeyCode::Left), corner);
        let far = Cursor::at("h1".parse().unwrap());
        assert_eq!(move_cursor(far, KeyCode::Down), far);
        assert_eq!(move_cursor(far, KeyCode::Right), far);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let cursor = Cursor::default();
        assert_eq!(move_cursor(cursor, KeyCode::Char('x')), cursor);
    }
}
