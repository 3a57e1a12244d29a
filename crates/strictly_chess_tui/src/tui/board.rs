//! Stateless board rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use strictly_chess::{GameController, Piece, PieceKind, Square};

use super::input::Cursor;

const LIGHT: Color = Color::Rgb(240, 217, 181);
const DARK: Color = Color::Rgb(181, 136, 99);
const LAST_MOVE: Color = Color::Rgb(205, 210, 106);
const SELECTED: Color = Color::Rgb(130, 151, 105);
const TARGET: Color = Color::Rgb(100, 140, 180);
const CURSOR: Color = Color::Cyan;
const CHECK: Color = Color::Rgb(220, 80, 80);

/// Width of the board widget including rank labels and borders.
const BOARD_WIDTH: u16 = 2 + 8 * 3 + 2;
/// Height of the board widget including file labels and borders.
const BOARD_HEIGHT: u16 = 8 + 1 + 2;

/// Draws the game screen: title, board, status line and, once the game has
/// ended, the result dialog.
pub fn draw_game(frame: &mut Frame, game: &GameController, cursor: Cursor, sound: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let mode = game
        .session()
        .map(|s| s.mode().label())
        .unwrap_or("No game");
    let title = Paragraph::new(format!("Strictly Chess - {}", mode))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let board_area = center_rect(chunks[1], BOARD_WIDTH, BOARD_HEIGHT);
    let board = Paragraph::new(board_lines(game, cursor))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(board, board_area);

    let status = Paragraph::new(status_line(game, sound))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(
        "←↑↓→: Move cursor | Enter/Space: Tap | u: Undo | r: Restart | Esc: Pause",
    )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);

    if let Some(message) = game.termination_message() {
        draw_result_dialog(frame, &message);
    }
}

fn board_lines(game: &GameController, cursor: Cursor) -> Vec<Line<'static>> {
    let snapshot = game.snapshot();
    let selection = game.selection();
    let last = game.last_move();
    let checked_king = game.in_check().then(|| game.side_to_move());

    let mut lines = Vec::with_capacity(9);
    for (row, cells) in snapshot.rows().iter().enumerate() {
        let mut spans = vec![Span::styled(
            format!("{} ", 8 - row),
            Style::default().fg(Color::DarkGray),
        )];
        for (col, cell) in cells.iter().enumerate() {
            let Ok(square) = Square::from_grid(row, col) else {
                continue;
            };
            let mut bg = if square.is_light() { LIGHT } else { DARK };
            if last.is_some_and(|m| m.touches(square)) {
                bg = LAST_MOVE;
            }
            if selection.is_target(square) {
                bg = TARGET;
            }
            if selection.square() == Some(square) {
                bg = SELECTED;
            }
            if let Some(piece) = cell
                && piece.kind == PieceKind::King
                && checked_king == Some(piece.color)
            {
                bg = CHECK;
            }
            if cursor.row() == row && cursor.col() == col {
                bg = CURSOR;
            }

            let text = match cell {
                Some(piece) => format!(" {} ", glyph(*piece)),
                None if selection.is_target(square) => " · ".to_string(),
                None => "   ".to_string(),
            };
            spans.push(Span::styled(
                text,
                Style::default()
                    .bg(bg)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled(
        "   a  b  c  d  e  f  g  h",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn status_line(game: &GameController, sound: bool) -> String {
    let Some(session) = game.session() else {
        return "No game in progress".to_string();
    };
    if let Some(message) = session.termination_message() {
        return message;
    }
    let side = game.side_to_move();
    let mut status = format!("{} to move", side);
    if game.in_check() {
        status.push_str(" (check)");
    }
    if game.pending_reply().is_some() {
        status.push_str(" | AI thinking...");
    }
    if !sound {
        status.push_str(" | muted");
    }
    status
}

fn draw_result_dialog(frame: &mut Frame, message: &str) {
    let area = center_rect(frame.area(), 36, 7);
    let text = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("r: Restart | m: Menu"),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Game Over"));
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

/// Unicode chess glyph for `piece`.
pub fn glyph(piece: Piece) -> char {
    use strictly_chess::Color as Side;
    match (piece.color, piece.kind) {
        (Side::White, PieceKind::King) => '♔',
        (Side::White, PieceKind::Queen) => '♕',
        (Side::White, PieceKind::Rook) => '♖',
        (Side::White, PieceKind::Bishop) => '♗',
        (Side::White, PieceKind::Knight) => '♘',
        (Side::White, PieceKind::Pawn) => '♙',
        (Side::Black, PieceKind::King) => '♚',
        (Side::Black, PieceKind::Queen) => '♛',
        (Side::Black, PieceKind::Rook) => '♜',
        (Side::Black, PieceKind::Bishop) => '♝',
        (Side::Black, PieceKind::Knight) => '♞',
        (Side::Black, PieceKind::Pawn) => '♟',
    }
}

/// Centers a `width` x `height` rectangle inside `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vertical);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_chess::{DEFAULT_REPLY_DELAY, GameMode, RandomMover};

    #[test]
    fn test_glyphs_differ_by_color() {
        use strictly_chess::Color as Side;
        assert_eq!(glyph(Piece::new(Side::White, PieceKind::Knight)), '♘');
        assert_eq!(glyph(Piece::new(Side::Black, PieceKind::Knight)), '♞');
    }

    #[test]
    fn test_center_rect_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);
        assert_eq!(rect.width, BOARD_WIDTH);
        assert_eq!(rect.height, BOARD_HEIGHT);
        assert_eq!(rect.x, (80 - BOARD_WIDTH) / 2);
    }

    #[test]
    fn test_status_reports_turn_and_mute() {
        let mut game = GameController::standard(RandomMover::seeded(1), DEFAULT_REPLY_DELAY);
        assert_eq!(status_line(&game, true), "No game in progress");
        game.start_game(GameMode::TwoPlayer);
        assert_eq!(status_line(&game, true), "White to move");
        assert_eq!(status_line(&game, false), "White to move | muted");
    }

    #[test]
    fn test_board_has_rank_rows_and_file_labels() {
        let mut game = GameController::standard(RandomMover::seeded(1), DEFAULT_REPLY_DELAY);
        game.start_game(GameMode::TwoPlayer);
        let lines = board_lines(&game, Cursor::default());
        assert_eq!(lines.len(), 9);
        // Rank label plus eight squares.
        assert_eq!(lines[0].spans.len(), 9);
        assert_eq!(lines[0].spans[1].content, " ♜ ");
    }
}
