use super::grid::{Cell, Grid};
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};

/// Choose a cell for the next piece of food that is not occupied by `snake`.
///
/// Cells are drawn uniformly from the whole grid and rejected while they land
/// on the snake.  After [`MAX_FOOD_ATTEMPTS`][consts::MAX_FOOD_ATTEMPTS]
/// rejections, a cell is chosen uniformly from the free cells instead, so a
/// nearly-full grid cannot stall placement.  Returns `None` if no cell is
/// free.
pub(super) fn place<R: Rng + ?Sized>(grid: Grid, snake: &Snake, rng: &mut R) -> Option<Cell> {
    if grid.is_empty() {
        return None;
    }
    for _ in 0..consts::MAX_FOOD_ATTEMPTS {
        let cell = grid.random_cell(rng);
        if !snake.contains(cell) {
            return Some(cell);
        }
    }
    grid.cells().filter(|&c| !snake.contains(c)).choose(rng)
}
