use rand::Rng;

/// A cell on the game grid.
///
/// Coordinates are signed so that a candidate position one step past an edge
/// of the grid (e.g., `x == -1`) can be represented and rejected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }
}

/// The fixed-size playing field, measured in cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    pub(crate) const fn new(width: u16, height: u16) -> Grid {
        Grid { width, height }
    }

    /// Compute the grid that fits on a canvas of the given pixel dimensions
    /// when each cell is `cell_size` pixels square.  Partial cells at the
    /// right & bottom edges are discarded.
    pub(crate) fn from_canvas(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Grid {
        let cells = |px: u32| {
            px.checked_div(cell_size)
                .map_or(0, |n| u16::try_from(n).unwrap_or(u16::MAX))
        };
        Grid::new(cells(canvas_width), cells(canvas_height))
    }

    pub(crate) fn width(self) -> u16 {
        self.width
    }

    pub(crate) fn height(self) -> u16 {
        self.height
    }

    /// Total number of cells in the grid
    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub(crate) fn is_empty(self) -> bool {
        self.area() == 0
    }

    /// Is `cell` within `[0, width) × [0, height)`?
    pub(crate) fn contains(self, cell: Cell) -> bool {
        (0..i32::from(self.width)).contains(&cell.x) && (0..i32::from(self.height)).contains(&cell.y)
    }

    /// Iterate over every cell in the grid in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }

    /// Draw a cell uniformly at random.  The grid must not be empty.
    pub(crate) fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Cell {
        Cell::new(
            rng.random_range(0..i32::from(self.width)),
            rng.random_range(0..i32::from(self.height)),
        )
    }
}
