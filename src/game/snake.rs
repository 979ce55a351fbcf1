use super::direction::Direction;
use super::grid::Grid;
use ratatui::{layout::Position, style::Color};
use std::collections::VecDeque;

/// A snake on the grid, either the player's or an NPC's.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, head first
    pub(super) body: VecDeque<Position>,

    /// The direction in which the snake moved on the last tick
    pub(super) direction: Direction,

    /// The direction the snake will take on the next tick
    pub(super) next_direction: Direction,

    /// Dead NPCs are neither drawn nor collided with
    pub(super) alive: bool,

    pub(super) color: Color,
}

impl Snake {
    /// Create a one-segment snake at `head` facing `direction`
    pub(crate) fn new(head: Position, direction: Direction, color: Color) -> Snake {
        Snake {
            body: VecDeque::from([head]),
            direction,
            next_direction: direction,
            alive: true,
            color,
        }
    }

    pub(crate) fn head(&self) -> Position {
        // The body is never empty: it starts with one cell and every move
        // pushes before it pops.
        self.body[0]
    }

    pub(crate) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Buffer a turn for the next tick.  A request to reverse onto the neck
    /// is ignored.
    pub(crate) fn turn(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.next_direction = direction;
        }
    }

    /// Commit the buffered turn and return the cell the head would move into,
    /// or `None` if that cell is off the grid
    pub(super) fn aim(&mut self, grid: Grid) -> Option<Position> {
        self.direction = self.next_direction;
        self.direction.advance(self.head(), grid)
    }

    /// Move the head into `head`.  Unless `grow` is set, the tail is dropped
    /// so that the length stays the same.
    pub(super) fn advance(&mut self, head: Position, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }
}

/// What a snake ran into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The edge of the grid
    Wall,
    OwnBody,
    Player,
    Npc,
}
