//! Mapping between terminal cells and play-area units.
//!
//! A cell is twice as tall as it is wide, so one column spans 10 units and
//! one row spans 20; a target square then renders as 8x4 cells.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};

use crate::target::{Bounds, Point, TargetInstance, TARGET_SIZE};

pub const UNITS_PER_COL: f64 = 10.0;
pub const UNITS_PER_ROW: f64 = 20.0;

const HORIZONTAL_MARGIN: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub hud: Rect,
    /// Bordered field, including the border
    pub field: Rect,
    /// Clickable interior of the field
    pub play: Rect,
    pub help: Rect,
}

pub fn split(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1), // hud
            Constraint::Min(3),    // field
            Constraint::Length(1), // help
        ])
        .split(area);

    let field = chunks[1];
    ScreenLayout {
        hud: chunks[0],
        field,
        play: Block::default().borders(Borders::ALL).inner(field),
        help: chunks[2],
    }
}

pub fn bounds_for(play: Rect) -> Bounds {
    Bounds::new(
        play.width as f64 * UNITS_PER_COL,
        play.height as f64 * UNITS_PER_ROW,
    )
}

/// Center of the clicked cell in play-area units, if the cell is inside `play`
pub fn cell_to_point(play: Rect, column: u16, row: u16) -> Option<Point> {
    if column < play.x || row < play.y || column >= play.right() || row >= play.bottom() {
        return None;
    }
    Some(Point::new(
        ((column - play.x) as f64 + 0.5) * UNITS_PER_COL,
        ((row - play.y) as f64 + 0.5) * UNITS_PER_ROW,
    ))
}

pub fn point_to_cell(play: Rect, point: Point) -> Option<(u16, u16)> {
    if point.x < 0.0 || point.y < 0.0 {
        return None;
    }
    let dx = (point.x / UNITS_PER_COL).floor() as u16;
    let dy = (point.y / UNITS_PER_ROW).floor() as u16;
    if dx >= play.width || dy >= play.height {
        return None;
    }
    Some((play.x + dx, play.y + dy))
}

/// Cells covered by `target`, clipped to `play`
pub fn target_rect(play: Rect, target: &TargetInstance) -> Option<Rect> {
    let (x, y) = point_to_cell(play, target.position)?;
    let rect = Rect::new(
        x,
        y,
        (TARGET_SIZE / UNITS_PER_COL) as u16,
        (TARGET_SIZE / UNITS_PER_ROW) as u16,
    )
    .intersection(play);
    (!rect.is_empty()).then_some(rect)
}
