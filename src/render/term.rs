use super::surface::{PixelRect, Point, Surface};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

/// Glyph used to fill rectangles
const BLOCK_SYMBOL: &str = "█";

/// Glyph used to fill circles
const DISC_SYMBOL: &str = "●";

/// Number of pixels covered by one terminal cell in each dimension
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Scale {
    pub(crate) x: u32,
    pub(crate) y: u32,
}

/// A [`Surface`] that draws into a region of a ratatui [`Buffer`].
///
/// Each terminal cell stands for a `scale.x` × `scale.y` block of pixels.  A
/// shape colors every terminal cell it overlaps (rectangles) or whose
/// midpoint it covers (circles).
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct TermSurface<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    scale: Scale,
}

impl<'a> TermSurface<'a> {
    pub(crate) fn new(area: Rect, buf: &'a mut Buffer, scale: Scale) -> TermSurface<'a> {
        TermSurface { area, buf, scale }
    }
}

impl TermSurface<'_> {
    fn sx(&self) -> u32 {
        self.scale.x.max(1)
    }

    fn sy(&self) -> u32 {
        self.scale.y.max(1)
    }

    /// Columns overlapping the pixel span `[left, right)`, clipped to the
    /// area
    fn columns(&self, left: u32, right: u32) -> Range<u16> {
        clip(left / self.sx(), right.div_ceil(self.sx()), self.area.width)
    }

    /// Rows overlapping the pixel span `[top, bottom)`, clipped to the area
    fn rows(&self, top: u32, bottom: u32) -> Range<u16> {
        clip(top / self.sy(), bottom.div_ceil(self.sy()), self.area.height)
    }

    fn draw_cell(&mut self, col: u16, row: u16, symbol: &str, style: Style) {
        if col >= self.area.width || row >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(col) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.reset();
            cell.set_symbol(symbol).set_style(style);
        }
    }
}

impl Surface for TermSurface<'_> {
    fn bounds(&self) -> PixelRect {
        PixelRect::new(
            0,
            0,
            u32::from(self.area.width).saturating_mul(self.sx()),
            u32::from(self.area.height).saturating_mul(self.sy()),
        )
    }

    fn clear(&mut self, rect: PixelRect) {
        for row in self.rows(rect.y, rect.bottom()) {
            for col in self.columns(rect.x, rect.right()) {
                self.draw_cell(col, row, " ", Style::new());
            }
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let style = Style::new().fg(color);
        for row in self.rows(rect.y, rect.bottom()) {
            for col in self.columns(rect.x, rect.right()) {
                self.draw_cell(col, row, BLOCK_SYMBOL, style);
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: u32, color: Color) {
        let style = Style::new().fg(color);
        let (sx, sy) = (i64::from(self.sx()), i64::from(self.sy()));
        // Work in doubled coordinates so that cell midpoints are integers
        let (cx, cy) = (2 * i64::from(center.x), 2 * i64::from(center.y));
        let r2 = (2 * i64::from(radius)).pow(2);
        let rows = self.rows(
            center.y.saturating_sub(radius),
            center.y.saturating_add(radius),
        );
        let cols = self.columns(
            center.x.saturating_sub(radius),
            center.x.saturating_add(radius),
        );
        for row in rows {
            let dy = 2 * i64::from(row) * sy + sy - cy;
            for col in cols.clone() {
                let dx = 2 * i64::from(col) * sx + sx - cx;
                if dx * dx + dy * dy <= r2 {
                    self.draw_cell(col, row, DISC_SYMBOL, style);
                }
            }
        }
    }

    fn draw_text(&mut self, anchor: Point, text: &str, color: Color) {
        let Ok(row) = u16::try_from(anchor.y / self.sy()) else {
            return;
        };
        if row >= self.area.height {
            return;
        }
        let width = u32::try_from(text.width()).unwrap_or(u32::MAX);
        let start = (anchor.x / self.sx()).saturating_sub(width / 2);
        let Ok(start) = u16::try_from(start) else {
            return;
        };
        if start >= self.area.width {
            return;
        }
        let max_width = usize::from(self.area.width - start);
        self.buf.set_stringn(
            self.area.x.saturating_add(start),
            self.area.y.saturating_add(row),
            text,
            max_width,
            Style::new().fg(color),
        );
    }
}

fn clip(start: u32, end: u32, limit: u16) -> Range<u16> {
    let start = u16::try_from(start).unwrap_or(u16::MAX).min(limit);
    let end = u16::try_from(end).unwrap_or(u16::MAX).min(limit);
    start..end.max(start)
}
