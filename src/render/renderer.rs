use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameState, Point};
use crate::metrics::GameMetrics;

/// What occupies a single board cell when drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Head,
    Body,
    Food,
    Empty,
}

impl Tile {
    /// `body` is the snake's segments collected once per frame
    pub fn at(state: &GameState, body: &HashSet<Point>, pos: Point) -> Self {
        if pos == state.snake.head() {
            Tile::Head
        } else if body.contains(&pos) {
            Tile::Body
        } else if pos == state.food {
            Tile::Food
        } else {
            Tile::Empty
        }
    }

    fn span(self) -> Span<'static> {
        match self {
            Tile::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Tile::Body => Span::styled("□ ", Style::default().fg(Color::White)),
            Tile::Food => Span::styled(
                "● ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Tile::Empty => Span::styled("  ", Style::default()),
        }
    }
}

/// First visible index of a `visible`-wide window over `len` cells,
/// centred on `focus` and kept inside the board.
fn window_start(len: i32, visible: i32, focus: i32) -> i32 {
    if visible >= len {
        0
    } else {
        (focus - visible / 2).clamp(0, len - visible)
    }
}

/// Draws the board, score header and control hints
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Score line
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        if state.is_running() {
            frame.render_widget(self.render_grid(chunks[1], state), chunks[1]);
        } else {
            frame.render_widget(self.render_game_over(state, metrics), chunks[1]);
        }

        frame.render_widget(self.render_controls(state), chunks[2]);
    }

    /// Draws the whole board when it fits, otherwise a window that follows the head.
    /// Each cell is two characters wide.
    fn render_grid(&self, area: Rect, state: &GameState) -> Paragraph<'static> {
        let board = state.board;
        let cell = board.cell_size();
        let head = state.snake.head();
        let body: HashSet<Point> = state.snake.body.iter().copied().collect();

        let inner_cols = i32::from(area.width.saturating_sub(2)) / 2;
        let inner_rows = i32::from(area.height.saturating_sub(2));
        let visible_cols = board.columns().min(inner_cols);
        let visible_rows = board.rows().min(inner_rows);

        let first_col = window_start(board.columns(), visible_cols, head.x / cell);
        let first_row = window_start(board.rows(), visible_rows, head.y / cell);

        let lines: Vec<Line> = (first_row..first_row + visible_rows)
            .map(|row| {
                Line::from(
                    (first_col..first_col + visible_cols)
                        .map(|col| {
                            Tile::at(state, &body, board.cell_at(col, row)).span()
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let title = if visible_cols < board.columns() || visible_rows < board.rows() {
            " Snake Game (following head) "
        } else {
            " Snake Game "
        };

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(title),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        Paragraph::new(Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(state.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ]))
        .alignment(Alignment::Left)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  in {}", metrics.format_time()),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'static> {
        let line = if state.is_running() {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        } else {
            Line::from(Span::styled(
                "Press any key to exit",
                Style::default().fg(Color::Gray),
            ))
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::game::{GameConfig, GameEngine, GameStatus};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn small_state() -> GameState {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3).unwrap();
        engine.reset()
    }

    #[test]
    fn test_tile_classification() {
        let mut state = small_state();
        state.food = Point::new(0, 0);
        let body: HashSet<Point> = state.snake.body.iter().copied().collect();

        assert_eq!(Tile::at(&state, &body, state.snake.head()), Tile::Head);
        assert_eq!(Tile::at(&state, &body, state.snake.tail()), Tile::Body);
        assert_eq!(Tile::at(&state, &body, Point::new(0, 0)), Tile::Food);
        assert_eq!(Tile::at(&state, &body, Point::new(90, 90)), Tile::Empty);
    }

    #[test]
    fn test_window_start() {
        // Whole board fits
        assert_eq!(window_start(10, 20, 5), 0);
        // Centred on the focus
        assert_eq!(window_start(60, 39, 30), 11);
        // Clamped at both edges
        assert_eq!(window_start(60, 39, 2), 0);
        assert_eq!(window_start(60, 39, 59), 21);
    }

    #[test]
    fn test_default_board_in_small_terminal_follows_head() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 3).unwrap();
        let mut state = engine.reset();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let draw = |terminal: &mut Terminal<TestBackend>, state: &GameState| {
            terminal
                .draw(|frame| Renderer::new().render(frame, state, &GameMetrics::new()))
                .unwrap();
        };

        draw(&mut terminal, &state);
        let text = screen_text(&terminal);
        assert!(text.contains("■"), "head not drawn on an 80x24 terminal");
        assert!(text.contains("following head"));

        // Near the bottom-right wall the head stays on screen
        state.food = Point::new(0, 0);
        state.snake = crate::game::Snake::new(
            Point::new(590, 490),
            crate::game::Direction::Right,
            3,
            10,
        );
        draw(&mut terminal, &state);
        assert!(screen_text(&terminal).contains("■"));
    }

    #[test]
    fn test_render_running_shows_score() {
        let state = small_state();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render(frame, &state, &GameMetrics::new()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("■"));
    }

    #[test]
    fn test_render_game_over_panel() {
        let mut state = small_state();
        state.score = 4;
        state.status = GameStatus::GameOver;
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render(frame, &state, &GameMetrics::new()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 4"));
    }
}
