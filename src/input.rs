//! Pointer and keyboard input for the arena shell.
//!
//! The DOM hands us pixel positions; the render pass registers rectangles
//! with action IDs (see `shell::actions`). A pointer sample becomes a cell,
//! the cell becomes an action ID, and the shell sees only [`InputEvent`]s.

use ratzilla::ratatui::layout::Rect;

/// Normalized input delivered to the shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Keyboard character (lowercased by the caller).
    Key(char),
    /// Pointer went down on a registered target.
    Click(u16),
    /// Pointer went up, over the given target if any.
    Release(Option<u16>),
}

/// A tappable rectangle in terminal cells.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

impl ClickTarget {
    fn contains(&self, col: u16, row: u16) -> bool {
        let r = &self.rect;
        col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
    }
}

/// Targets registered by the last frame plus the terminal size they were
/// laid out for. Rebuilt on every draw.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Start a new frame of the given size.
    pub fn begin_frame(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        if rect.width > 0 && rect.height > 0 {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// Register one full-width row of `area`. Rows outside `area` are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Register targets for a single-row tab bar.
    ///
    /// `tab_widths` holds `(label_width, action_id)` per tab in display order.
    /// Each tab owns its label plus half of each neighbouring separator; the
    /// outermost tabs stretch to the edges of `total_width`.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        if tab_widths.is_empty() || total_width == 0 {
            return;
        }

        let mut spans: Vec<(u16, u16)> = Vec::with_capacity(tab_widths.len());
        let mut cursor = 0u16;
        for &(w, _) in tab_widths {
            spans.push((cursor, cursor + w));
            cursor += w + separator_width;
        }

        let last = tab_widths.len() - 1;
        for (i, &(_, action_id)) in tab_widths.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let gap_start = spans[i - 1].1;
                gap_start + (spans[i].0 - gap_start) / 2
            };
            let right = if i == last {
                total_width
            } else {
                let gap_start = spans[i].1;
                gap_start + (spans[i + 1].0 - gap_start) / 2
            };
            let width = right.min(total_width).saturating_sub(left);
            self.add_click_target(Rect::new(x + left, y, width, height), action_id);
        }
    }

    /// Action under a cell. Later registrations sit on top.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| t.contains(col, row))
            .map(|t| t.action_id)
    }

    /// Action under a pixel position relative to the grid's top-left corner.
    pub fn hit_test_pixel(&self, x: f64, y: f64, grid_width: f64, grid_height: f64) -> Option<u16> {
        let col = pixel_x_to_col(x, grid_width, self.terminal_cols)?;
        let row = pixel_y_to_row(y, grid_height, self.terminal_rows)?;
        self.hit_test(col, row)
    }
}

/// Narrow screens stack the log under the arena instead of beside it.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Pixel Y (relative to the grid top) to a terminal row, None outside the grid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Pixel X (relative to the grid left) to a terminal column, None outside the grid.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(pos: f64, extent: f64, cells: u16) -> Option<u16> {
    if !(extent > 0.0) || cells == 0 || !(pos >= 0.0) {
        return None;
    }
    let idx = (pos / (extent / cells as f64)) as u16;
    (idx < cells).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_rows_and_columns() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 10, 1), 1);
        cs.add_click_target(Rect::new(10, 5, 10, 3), 2);

        assert_eq!(cs.hit_test(9, 5), Some(1));
        assert_eq!(cs.hit_test(10, 5), Some(2));
        assert_eq!(cs.hit_test(12, 7), Some(2));
        assert_eq!(cs.hit_test(12, 8), None);
        assert_eq!(cs.hit_test(20, 5), None);
    }

    #[test]
    fn overlay_target_wins_over_arena() {
        // The shop overlay registers after the enemy panel.
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 80, 20), 1);
        cs.add_click_target(Rect::new(20, 5, 40, 10), 2);

        assert_eq!(cs.hit_test(30, 8), Some(2));
        assert_eq!(cs.hit_test(5, 8), Some(1));
    }

    #[test]
    fn empty_rect_is_not_registered() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 0, 3), 1);
        cs.add_click_target(Rect::new(0, 0, 3, 0), 2);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn row_target_must_lie_inside_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 15, 2);
        cs.add_row_target(area, 12, 3);

        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(5, 12), Some(3));
        assert_eq!(cs.hit_test(4, 12), None);
    }

    #[test]
    fn begin_frame_resets_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), 1);
        cs.begin_frame(100, 40);
        assert!(cs.targets.is_empty());
        assert_eq!((cs.terminal_cols, cs.terminal_rows), (100, 40));
    }

    #[test]
    fn tab_targets_split_separators() {
        // " Armes " (7) + " │ " (3) + " Bonus " (7)
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[(7, 10), (7, 11)], 3, 2, 4, 40, 1);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(2, 4), Some(10));
        // First separator column goes left, the rest right.
        assert_eq!(cs.hit_test(2 + 7, 4), Some(10));
        assert_eq!(cs.hit_test(2 + 8, 4), Some(11));
        assert_eq!(cs.hit_test(41, 4), Some(11));
        assert_eq!(cs.hit_test(42, 4), None);
        assert_eq!(cs.hit_test(1, 4), None);
    }

    #[test]
    fn tab_targets_ignore_empty_input() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[], 3, 0, 0, 80, 1);
        cs.register_tab_targets(&[(5, 1)], 3, 0, 0, 0, 1);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_conversion_bounds() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(f64::NAN, 800.0, 80), None);
    }

    #[test]
    fn pixel_hit_test_pipeline() {
        let mut cs = ClickState::new();
        cs.begin_frame(80, 30);
        cs.add_click_target(Rect::new(20, 10, 20, 5), 7);

        // Cells are 10px wide and 15px tall.
        assert_eq!(cs.hit_test_pixel(25.0 * 10.0 + 3.0, 12.0 * 15.0 + 7.0, 800.0, 450.0), Some(7));
        assert_eq!(cs.hit_test_pixel(5.0, 5.0, 800.0, 450.0), None);
        assert_eq!(cs.hit_test_pixel(900.0, 200.0, 800.0, 450.0), None);
    }

    #[test]
    fn every_row_centre_maps_to_itself() {
        let rows: u16 = 30;
        let cell = 15.0;
        for r in 0..rows {
            let y = r as f64 * cell + cell / 2.0;
            assert_eq!(pixel_y_to_row(y, rows as f64 * cell, rows), Some(r));
        }
    }
}
