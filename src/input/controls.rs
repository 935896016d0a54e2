use ratatui::layout::Rect;

use crate::game::Direction;

/// An on-screen button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Steer(Direction),
    Start,
    Reset,
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self {
            Button::Steer(Direction::Up) => "▲",
            Button::Steer(Direction::Down) => "▼",
            Button::Steer(Direction::Left) => "◀",
            Button::Steer(Direction::Right) => "▶",
            Button::Start => "Start",
            Button::Reset => "Reset",
        }
    }
}

const ARROW_WIDTH: u16 = 5;
const ARROW_HEIGHT: u16 = 3;
const WIDE_WIDTH: u16 = 9;

/// Where each control-pad button sits on screen.
///
/// Arrows form a cross with Start and Reset underneath:
///
/// ```text
///        [▲]
///   [◀]  [▼]  [▶]
///  [Start] [Reset]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlPad {
    buttons: Vec<(Button, Rect)>,
}

impl ControlPad {
    /// Total width the pad wants
    pub const WIDTH: u16 = ARROW_WIDTH * 3 + 3;
    /// Total height the pad wants
    pub const HEIGHT: u16 = ARROW_HEIGHT * 3;

    /// Lay the pad out inside `area`, dropping buttons that do not fit
    pub fn layout(area: Rect) -> Self {
        let (x, y) = (area.x, area.y);
        let candidates = [
            (
                Button::Steer(Direction::Up),
                Rect::new(x + ARROW_WIDTH + 1, y, ARROW_WIDTH, ARROW_HEIGHT),
            ),
            (
                Button::Steer(Direction::Left),
                Rect::new(x, y + ARROW_HEIGHT, ARROW_WIDTH, ARROW_HEIGHT),
            ),
            (
                Button::Steer(Direction::Down),
                Rect::new(x + ARROW_WIDTH + 1, y + ARROW_HEIGHT, ARROW_WIDTH, ARROW_HEIGHT),
            ),
            (
                Button::Steer(Direction::Right),
                Rect::new(x + 2 * (ARROW_WIDTH + 1), y + ARROW_HEIGHT, ARROW_WIDTH, ARROW_HEIGHT),
            ),
            (
                Button::Start,
                Rect::new(x, y + 2 * ARROW_HEIGHT, WIDE_WIDTH, ARROW_HEIGHT),
            ),
            (
                Button::Reset,
                Rect::new(x + WIDE_WIDTH, y + 2 * ARROW_HEIGHT, WIDE_WIDTH, ARROW_HEIGHT),
            ),
        ];

        let buttons = candidates
            .into_iter()
            .filter(|(_, rect)| fits_within(*rect, area))
            .collect();

        Self { buttons }
    }

    pub fn buttons(&self) -> &[(Button, Rect)] {
        &self.buttons
    }

    /// The button under a terminal cell, if any
    pub fn hit(&self, column: u16, row: u16) -> Option<Button> {
        self.buttons
            .iter()
            .find(|(_, rect)| point_in_rect(column, row, *rect))
            .map(|(button, _)| *button)
    }
}

fn point_in_rect(column: u16, row: u16, rect: Rect) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

fn fits_within(inner: Rect, outer: Rect) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.x + inner.width <= outer.x + outer.width
        && inner.y + inner.height <= outer.y + outer.height
}
