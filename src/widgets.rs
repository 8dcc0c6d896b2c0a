//! Widgets that draw themselves and register their own click targets.
//!
//! - [`TabBar`]: the shop's Armes / Bonus switcher.
//! - [`ClickableList`]: shop rows, setup choices and the help bar.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// One-row tab bar. Targets follow the rendered label widths.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// `(padded label width, action_id)` per tab, plus the separator width.
    fn layout(&self) -> (Vec<(u16, u16)>, u16) {
        let widths = self
            .tabs
            .iter()
            .map(|(label, _, id)| (Line::from(format!(" {label} ")).width() as u16, *id))
            .collect();
        (widths, Line::from(self.separator).width() as u16)
    }

    /// Register targets without drawing. `render` calls this.
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        let (widths, sep_width) = self.layout();
        // Full outer height so the border rows are tappable too.
        cs.register_tab_targets(&widths, sep_width, inner.x, area.y, inner.width, area.height.max(1));
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        self.register_targets(area, cs);

        let mut spans: Vec<Span> = Vec::new();
        for (i, (label, style, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(format!(" {label} "), *style));
        }
        let paragraph = Paragraph::new(Line::from(spans));
        let paragraph = match self.block {
            Some(block) => paragraph.block(block),
            None => paragraph,
        };
        f.render_widget(paragraph, area);
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines for a [`Paragraph`], some of them bound to an action.
///
/// Targets are computed from line positions at registration time, so lines
/// can be inserted anywhere without recomputing rows by hand.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register one row target per visual row of each clickable line.
    ///
    /// `top_offset`/`bottom_offset` are the rows taken by borders. With
    /// `wrap_width == 0` every line is one row; otherwise lines wider than
    /// `wrap_width` take `ceil(width / wrap_width)` rows.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        wrap_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let mut row_of_line = Vec::with_capacity(self.lines.len());
        let mut visual = 0u16;
        for line in &self.lines {
            let h = match wrap_width {
                0 => 1,
                w => (line.width().max(1)).div_ceil(w as usize) as u16,
            };
            row_of_line.push((visual, h));
            visual += h;
        }

        for &(idx, action_id) in &self.actions {
            let Some(&(start, height)) = row_of_line.get(idx as usize) else {
                continue;
            };
            for vr in start..start + height {
                if vr < scroll {
                    continue;
                }
                let row = content_y + (vr - scroll);
                if row >= content_end {
                    break;
                }
                cs.add_row_target(area, row, action_id);
            }
        }
    }

    /// [`register_targets`](Self::register_targets) with offsets taken from
    /// the block that will wrap the paragraph.
    pub fn register_targets_with_block(
        &self,
        area: Rect,
        block: &Block,
        cs: &mut ClickState,
        scroll: u16,
        wrap_width: u16,
    ) {
        let inner = block.inner(area);
        let top = inner.y.saturating_sub(area.y);
        let bottom = (area.y + area.height).saturating_sub(inner.y + inner.height);
        self.register_targets(area, cs, top, bottom, scroll, wrap_width);
    }
}
