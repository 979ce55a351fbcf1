use rand::Rng;
use ratatui::layout::{Position, Positions, Rect, Size};

/// The playing field: a `width` × `height` rectangle of cells with its
/// top-left cell at the origin.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Grid {
    pub(crate) fn new(width: u16, height: u16) -> Grid {
        Grid { width, height }
    }

    pub(crate) fn in_bounds(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Total number of cells in the grid
    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Iterate over every cell, row by row
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    /// The cell at the center of the grid, rounding down
    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Draw a cell uniformly at random.  The grid must not be empty.
    pub(crate) fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }
}

/// Taxicab distance between two cells
pub(crate) fn manhattan(a: Position, b: Position) -> u32 {
    u32::from(a.x.abs_diff(b.x)) + u32::from(a.y.abs_diff(b.y))
}
