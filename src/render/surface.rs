use ratatui::style::Color;

/// A point on a drawing surface, in pixels from the top-left corner
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Point {
    pub(crate) x: u32,
    pub(crate) y: u32,
}

impl Point {
    pub(crate) const fn new(x: u32, y: u32) -> Point {
        Point { x, y }
    }
}

/// An axis-aligned rectangle on a drawing surface, in pixels
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct PixelRect {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl PixelRect {
    pub(crate) const fn new(x: u32, y: u32, width: u32, height: u32) -> PixelRect {
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    /// Return the rectangle's midpoint, rounded toward the top-left
    pub(crate) fn center(self) -> Point {
        Point::new(
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    pub(crate) fn right(self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub(crate) fn bottom(self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

/// A 2D drawing context.
///
/// Implementations decide how pixels map onto their output medium; callers
/// address the surface purely in pixels and should redraw the whole frame
/// each time.
pub(crate) trait Surface {
    /// Return the area covered by the surface, anchored at the origin
    fn bounds(&self) -> PixelRect;

    /// Erase everything drawn within `rect`
    fn clear(&mut self, rect: PixelRect);

    /// Fill `rect` with a solid color
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Fill the disc with the given center & radius with a solid color
    fn fill_circle(&mut self, center: Point, radius: u32, color: Color);

    /// Draw a single line of text horizontally centered on `anchor`
    fn draw_text(&mut self, anchor: Point, text: &str, color: Color);
}
