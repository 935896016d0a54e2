use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{Direction, GameController, GameSession, Phase, Position};
use crate::input::{Button, ControlPad};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame and return where the control pad ended up, so clicks
    /// can be matched against it
    pub fn render(
        &self,
        frame: &mut Frame,
        controller: &GameController,
        metrics: &GameMetrics,
    ) -> ControlPad {
        let session = controller.session();

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(session, metrics);
        frame.render_widget(stats, chunks[0]);

        let (grid_width, grid_height) = grid_extent(session.grid_size);
        let body = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Length(grid_width),
                Constraint::Length(ControlPad::WIDTH + 2),
                Constraint::Min(0),
            ])
            .split(chunks[1]);

        let grid_area = Rect {
            height: grid_height.min(body[0].height),
            ..body[0]
        };
        frame.render_widget(self.render_grid(session), grid_area);

        match controller.phase() {
            Phase::Running => {}
            Phase::Idle => self.render_overlay(frame, grid_area, self.idle_lines()),
            Phase::GameOver => {
                self.render_overlay(frame, grid_area, self.game_over_lines(session))
            }
        }

        let panel = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Controls ");
        let pad_area = panel.inner(body[1]);
        frame.render_widget(panel, body[1]);
        let pad = ControlPad::layout(pad_area);
        self.render_pad(frame, &pad, controller.is_running());

        frame.render_widget(self.render_controls(), chunks[2]);

        pad
    }

    fn render_grid(&self, session: &GameSession) -> Paragraph<'_> {
        let head = session.snake.head();
        let mut lines = Vec::new();

        for y in 0..session.grid_size {
            let mut spans = Vec::new();

            for x in 0..session.grid_size {
                let pos = Position::new(x, y);

                let cell = if pos == head {
                    // Head points the way the snake is moving
                    Span::styled(
                        head_glyph(session.direction),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if session.is_occupied_by_snake(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == session.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, session: &GameSession, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.best_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Tick: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}ms", session.tick_interval.as_millis()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn idle_lines(&self) -> Vec<Line<'static>> {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Ready",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Start to play",
                Style::default().fg(Color::Gray),
            )),
        ]
    }

    fn game_over_lines(&self, session: &GameSession) -> Vec<Line<'static>> {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Game Over!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                "Press Start to play again",
                Style::default().fg(Color::Gray),
            )),
        ]
    }

    fn render_overlay(&self, frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
        let height = (lines.len() as u16 + 3).min(area.height);
        let width = 30.min(area.width);
        let overlay = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, overlay);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            ),
            overlay,
        );
    }

    fn render_pad(&self, frame: &mut Frame, pad: &ControlPad, running: bool) {
        for (button, rect) in pad.buttons() {
            let highlight = match button {
                Button::Start => !running,
                Button::Steer(_) => running,
                Button::Reset => false,
            };
            let color = if highlight { Color::Cyan } else { Color::Gray };

            let widget = Paragraph::new(button.label())
                .alignment(Alignment::Center)
                .style(Style::default().fg(color))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                );
            frame.render_widget(widget, *rect);
        }
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" start | "),
            Span::styled("R", Style::default().fg(Color::Yellow)),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal columns and rows the bordered grid needs; two columns per cell
fn grid_extent(grid_size: i32) -> (u16, u16) {
    let cells = u16::try_from(grid_size.max(0)).unwrap_or(u16::MAX);
    let width = cells.saturating_mul(2).saturating_add(2);
    let height = cells.saturating_add(2);
    (width, height)
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}
