use super::grid::Cell;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// The snake is stored head-first: `head` is the leading cell and `body`
/// holds the remaining cells in order, ending with the tail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    pub(super) head: Cell,
    pub(super) body: VecDeque<Cell>,
}

impl Snake {
    /// Create a snake from its cells, listed head-first.  Returns `None` if
    /// `cells` is empty.
    pub(crate) fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Option<Snake> {
        let mut cells = cells.into_iter();
        let head = cells.next()?;
        Some(Snake {
            head,
            body: cells.collect(),
        })
    }

    pub(crate) fn head(&self) -> Cell {
        self.head
    }

    #[cfg(test)]
    pub(crate) fn tail(&self) -> Cell {
        self.body.back().copied().unwrap_or(self.head)
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Iterate over the snake's cells, head first
    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Does any segment of the snake, head or tail included, occupy `cell`?
    pub(crate) fn contains(&self, cell: Cell) -> bool {
        self.head == cell || self.body.contains(&cell)
    }

    /// Make `cell` the new head, keeping the old head as the first body
    /// segment
    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(self.head);
        self.head = cell;
    }

    /// Remove the last segment.  A snake consisting of only a head is left
    /// unchanged.
    pub(crate) fn drop_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Snake {
        Snake::from_cells([Cell::new(5, 10), Cell::new(4, 10), Cell::new(3, 10)])
            .expect("cells should be nonempty")
    }

    #[test]
    fn from_cells_empty() {
        assert_eq!(Snake::from_cells([]), None);
    }

    #[test]
    fn head_first_order() {
        let snake = start();
        assert_eq!(snake.head(), Cell::new(5, 10));
        assert_eq!(snake.tail(), Cell::new(3, 10));
        assert_eq!(snake.len(), 3);
        assert_eq!(
            snake.cells().collect::<Vec<_>>(),
            [Cell::new(5, 10), Cell::new(4, 10), Cell::new(3, 10)]
        );
    }

    #[test]
    fn push_and_drop() {
        let mut snake = start();
        snake.push_head(Cell::new(6, 10));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.drop_tail(), Some(Cell::new(3, 10)));
        assert_eq!(
            snake.cells().collect::<Vec<_>>(),
            [Cell::new(6, 10), Cell::new(5, 10), Cell::new(4, 10)]
        );
        assert!(snake.contains(Cell::new(4, 10)));
        assert!(!snake.contains(Cell::new(3, 10)));
    }

    #[test]
    fn lone_head_keeps_head() {
        let mut snake = Snake::from_cells([Cell::new(1, 1)]).expect("cells should be nonempty");
        assert_eq!(snake.drop_tail(), None);
        assert_eq!(snake.tail(), Cell::new(1, 1));
        assert_eq!(snake.len(), 1);
    }
}
