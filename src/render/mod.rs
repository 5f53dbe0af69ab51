mod surface;
mod term;
pub(crate) use self::surface::{PixelRect, Point, Surface};
pub(crate) use self::term::{Scale, TermSurface};
use crate::consts;
use crate::game::{Cell, Ending, Engine, Phase};

/// Draws the state of an [`Engine`] onto a [`Surface`].
///
/// Every call to [`Renderer::draw()`] repaints the entire surface; nothing is
/// carried over from earlier frames.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Renderer {
    /// Width & height of a grid cell in pixels
    cell_size: u32,
}

impl Renderer {
    pub(crate) fn new(cell_size: u32) -> Renderer {
        Renderer { cell_size }
    }

    pub(crate) fn draw<S, R, T: Surface>(&self, engine: &Engine<S, R>, surface: &mut T) {
        let bounds = surface.bounds();
        surface.clear(bounds);
        if engine.phase() == Phase::Idle {
            surface.draw_text(bounds.center(), "Press Enter to start", consts::TEXT_COLOR);
            return;
        }
        for (i, cell) in engine.snake().cells().enumerate() {
            let color = if i == 0 {
                consts::SNAKE_HEAD_COLOR
            } else {
                consts::SNAKE_BODY_COLOR
            };
            if let Some(rect) = self.cell_rect(cell) {
                surface.fill_rect(rect, color);
            }
        }
        if let Some(rect) = engine.food().and_then(|c| self.cell_rect(c)) {
            surface.fill_circle(rect.center(), self.cell_size / 2, consts::FOOD_COLOR);
        }
        if let Phase::Over(ending) = engine.phase() {
            let Point { x, y } = bounds.center();
            let headline = match ending {
                Ending::Wall | Ending::Body => "GAME OVER!",
                Ending::BoardFull => "BOARD CLEARED!",
            };
            surface.draw_text(
                Point::new(x, y.saturating_sub(self.cell_size)),
                headline,
                consts::TEXT_COLOR,
            );
            surface.draw_text(
                Point::new(x, y.saturating_add(self.cell_size)),
                &format!("Final score: {}", engine.score()),
                consts::TEXT_COLOR,
            );
        }
    }

    /// Return the pixel rectangle occupied by `cell`, or `None` if the cell
    /// has negative coordinates
    fn cell_rect(&self, cell: Cell) -> Option<PixelRect> {
        let x = u32::try_from(cell.x).ok()?.checked_mul(self.cell_size)?;
        let y = u32::try_from(cell.y).ok()?.checked_mul(self.cell_size)?;
        Some(PixelRect::new(x, y, self.cell_size, self.cell_size))
    }
}
