use super::grid::Grid;
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;

/// Pick a random cell for which `is_free` returns `true`.
///
/// Cells are drawn uniformly until one is free, but only up to
/// [`MAX_PLACEMENT_ATTEMPTS`][consts::MAX_PLACEMENT_ATTEMPTS] times; after
/// that, the choice is made uniformly among all free cells.  Returns `None`
/// if there are no free cells.
pub(crate) fn pick_free_cell<R, F>(grid: Grid, rng: &mut R, mut is_free: F) -> Option<Position>
where
    R: Rng + ?Sized,
    F: FnMut(Position) -> bool,
{
    if grid.area() == 0 {
        return None;
    }
    for _ in 0..consts::MAX_PLACEMENT_ATTEMPTS {
        let pos = grid.random_cell(rng);
        if is_free(pos) {
            return Some(pos);
        }
    }
    tracing::warn!(
        attempts = consts::MAX_PLACEMENT_ATTEMPTS,
        "random placement failed; scanning for free cells"
    );
    grid.positions().filter(|&p| is_free(p)).choose(rng)
}

/// Choose a new food cell not on the player or on any live NPC.  Returns
/// `None` if the grid is full.
pub(crate) fn generate<R: Rng + ?Sized>(
    grid: Grid,
    player: &Snake,
    npcs: &[Snake],
    rng: &mut R,
) -> Option<Position> {
    let food = pick_free_cell(grid, rng, |p| {
        !player.occupies(p) && !npcs.iter().any(|npc| npc.is_alive() && npc.occupies(p))
    });
    tracing::debug!(?food, "placed food");
    food
}
