//! Field-to-grid mapping shared by every renderer.
//!
//! A [`Viewport`] scales field coordinates onto a grid of cells (terminal
//! characters, or canvas pixels at scale 1) and back, so paddles keep one
//! fixed height wherever they are drawn and pointer rows map to field y.

use crate::types::*;

/// Dashed net: one dash of this length every `NET_LINE_SPACING` field units
pub const NET_LINE_HEIGHT: f32 = 30.0;
pub const NET_LINE_SPACING: f32 = 60.0;

/// Inclusive cell rectangle
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellRect {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl CellRect {
    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn contains(&self, col: usize, row: usize) -> bool {
        col >= self.left && col <= self.right && row >= self.top && row <= self.bottom
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Viewport {
    cols: usize,
    rows: usize,
    scale_x: f32,
    scale_y: f32,
    config: Config,
}

impl Viewport {
    pub fn new(cols: usize, rows: usize, config: &Config) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Viewport {
            cols,
            rows,
            scale_x: cols as f32 / config.field_width,
            scale_y: rows as f32 / config.field_height,
            config: *config,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Paddle height in cells; the same at every position.
    pub fn paddle_height_cells(&self) -> usize {
        ((self.config.paddle_height * self.scale_y).round() as usize).max(1)
    }

    fn paddle_width_cells(&self) -> usize {
        ((self.config.paddle_width * self.scale_x).round() as usize).max(1)
    }

    /// Cells covered by a paddle, clipped to the grid. `None` when the
    /// paddle is entirely off screen (paddles are not clamped to the field).
    pub fn paddle_rect(&self, top_y: f32, side: Side) -> Option<CellRect> {
        let height = self.paddle_height_cells() as i64;
        let rows = self.rows as i64;
        // Far off-screen paddles collapse to the nearest hidden position
        let top = ((top_y * self.scale_y).round() as i64).clamp(-(height + rows), rows);
        let bottom = top + height - 1;
        if bottom < 0 || top >= rows {
            return None;
        }

        let width = self.paddle_width_cells();
        let offset = (self.config.paddle_side_offset * self.scale_x).round() as usize;
        let left = match side {
            Side::Player => offset,
            Side::Opponent => self.cols.saturating_sub(offset + width),
        }
        .min(self.cols - 1);
        let right = (left + width - 1).min(self.cols - 1);

        Some(CellRect {
            left,
            right,
            top: top.max(0) as usize,
            bottom: bottom.min(self.rows as i64 - 1) as usize,
        })
    }

    /// Cell holding the ball centre, or `None` outside the field.
    pub fn ball_cell(&self, pos: Vec2) -> Option<(usize, usize)> {
        let col = (pos.x * self.scale_x).floor();
        let row = (pos.y * self.scale_y).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as usize, row as usize))
    }

    /// Field y at the middle of grid row `row`
    pub fn field_y_from_row(&self, row: usize) -> f32 {
        (row as f32 + 0.5) / self.scale_y
    }

    /// Rows covered by net dashes
    pub fn net_rows(&self) -> Vec<usize> {
        let mut rows = Vec::new();
        let mut y = 0.0;
        while y < self.config.field_height {
            let first = (y * self.scale_y).floor() as usize;
            let dash = ((NET_LINE_HEIGHT * self.scale_y).round() as usize).max(1);
            for row in first..(first + dash).min(self.rows) {
                if rows.last() != Some(&row) {
                    rows.push(row);
                }
            }
            y += NET_LINE_SPACING;
        }
        rows
    }

    pub fn net_col(&self) -> usize {
        self.cols / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_height_consistency() {
        let config = Config::default();
        let viewport = Viewport::new(80, 24, &config);
        let expected = viewport.paddle_height_cells();

        for top_y in [0.0, 37.5, 100.0, 213.0, 350.0, 499.0] {
            for side in [Side::Player, Side::Opponent] {
                let rect = viewport.paddle_rect(top_y, side).unwrap();
                assert_eq!(rect.height(), expected, "top_y {top_y}");
            }
        }
    }

    #[test]
    fn test_paddle_rect_clips_and_disappears() {
        let config = Config::default();
        let viewport = Viewport::new(80, 24, &config);

        let rect = viewport.paddle_rect(-50.0, Side::Player).unwrap();
        assert_eq!(rect.top, 0);
        assert!(rect.height() < viewport.paddle_height_cells());

        let rect = viewport.paddle_rect(580.0, Side::Opponent).unwrap();
        assert_eq!(rect.bottom, 23);

        assert!(viewport.paddle_rect(-500.0, Side::Player).is_none());
        assert!(viewport.paddle_rect(900.0, Side::Player).is_none());
    }

    #[test]
    fn test_far_off_screen_paddle_is_hidden() {
        let viewport = Viewport::new(80, 24, &Config::default());

        assert!(viewport.paddle_rect(1e21, Side::Player).is_none());
        assert!(viewport.paddle_rect(-1e21, Side::Opponent).is_none());
        assert!(viewport.paddle_rect(f32::MAX, Side::Opponent).is_none());
        assert!(viewport.paddle_rect(f32::MIN, Side::Player).is_none());
    }

    #[test]
    fn test_paddles_sit_on_their_edges() {
        let config = Config::default();
        let viewport = Viewport::new(80, 24, &config);

        let left = viewport.paddle_rect(200.0, Side::Player).unwrap();
        let right = viewport.paddle_rect(200.0, Side::Opponent).unwrap();

        assert_eq!(left.left, 2);
        assert_eq!(right.right, 77);
        assert!(left.right < viewport.net_col());
        assert!(right.left > viewport.net_col());
        assert!(left.contains(2, left.top));
    }

    #[test]
    fn test_ball_cell() {
        let config = Config::default();
        let viewport = Viewport::new(80, 24, &config);

        assert_eq!(viewport.ball_cell(Vec2::new(400.0, 300.0)), Some((40, 12)));
        assert_eq!(viewport.ball_cell(Vec2::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(viewport.ball_cell(Vec2::new(-1.0, 300.0)), None);
        assert_eq!(viewport.ball_cell(Vec2::new(400.0, 600.0)), None);
    }

    #[test]
    fn test_row_to_field_y() {
        let config = Config::default();
        let viewport = Viewport::new(80, 24, &config);

        assert!((viewport.field_y_from_row(0) - 12.5).abs() < 1e-3);
        assert!((viewport.field_y_from_row(12) - 312.5).abs() < 1e-3);

        // A pointer on the ball's row targets that row
        let (_, row) = viewport.ball_cell(Vec2::new(400.0, 300.0)).unwrap();
        assert_eq!(row, 12);
    }

    #[test]
    fn test_net_rows() {
        let config = Config::default();
        let viewport = Viewport::new(80, 20, &config);

        // Field units per row: 30, so each dash covers exactly one row of two
        assert_eq!(viewport.net_rows(), vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }
}
