//! Computer-controlled snakes
use super::direction::Direction;
use super::food::pick_free_cell;
use super::grid::{manhattan, Grid};
use super::snake::{Collision, Snake};
use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use rand::{seq::IndexedRandom, Rng};
use ratatui::layout::Position;

/// Create up to `count` one-segment NPCs on distinct cells not covered by
/// `player`.  Each gets the next color from the palette and a random initial
/// direction.  Fewer NPCs are returned if the grid runs out of room.
pub(crate) fn spawn<R: Rng + ?Sized>(
    grid: Grid,
    count: usize,
    player: &Snake,
    rng: &mut R,
) -> Vec<Snake> {
    let mut npcs: Vec<Snake> = Vec::with_capacity(count);
    for i in 0..count {
        let Some(pos) = pick_free_cell(grid, rng, |p| {
            !player.occupies(p) && !npcs.iter().any(|npc| npc.head() == p)
        }) else {
            tracing::warn!(spawned = i, requested = count, "no room left for NPCs");
            break;
        };
        let direction = Direction::from_usize(rng.random_range(0..Direction::LENGTH));
        let color = consts::NPC_PALETTE[i % consts::NPC_PALETTE.len()];
        tracing::debug!(npc = i, ?pos, ?direction, "spawned NPC");
        npcs.push(Snake::new(pos, direction, color));
    }
    npcs
}

/// What happened to an NPC on a tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NpcMove {
    /// The NPC moved; `ate` is true if its new head is on the food.
    Moved { ate: bool },
    Died(Collision),
}

/// Move the NPC at `index` one cell in its buffered direction.
///
/// The NPC dies if it would leave the grid or run into itself, `player`, or
/// any other live NPC.  Other NPCs are checked where they currently are, so
/// NPCs earlier in `npcs` have already made this tick's move and later ones
/// have not.
pub(crate) fn advance(
    npcs: &mut [Snake],
    index: usize,
    player: &Snake,
    food: Option<Position>,
    grid: Grid,
) -> NpcMove {
    let target = match npcs[index].aim(grid) {
        None => Err(Collision::Wall),
        Some(p) if npcs[index].occupies(p) => Err(Collision::OwnBody),
        Some(p) if player.occupies(p) => Err(Collision::Player),
        Some(p)
            if npcs
                .iter()
                .enumerate()
                .any(|(j, other)| j != index && other.is_alive() && other.occupies(p)) =>
        {
            Err(Collision::Npc)
        }
        Some(p) => Ok(p),
    };
    let npc = &mut npcs[index];
    match target {
        Ok(head) => {
            let ate = food == Some(head);
            npc.advance(head, ate);
            NpcMove::Moved { ate }
        }
        Err(collision) => {
            npc.alive = false;
            NpcMove::Died(collision)
        }
    }
}

/// Choose the direction `npc` should take on the next tick.
///
/// Candidate directions are those whose next cell is on the grid and not on
/// the NPC's own body; other snakes are not considered.  Candidates are
/// visited in order, and for each one:
///
/// - with probability [`GREEDY_PROBABILITY`][consts::GREEDY_PROBABILITY], it
///   becomes the choice if it is strictly closer to `food` than the current
///   choice;
///
/// - independently, with probability
///   [`RANDOM_OVERRIDE_PROBABILITY`][consts::RANDOM_OVERRIDE_PROBABILITY], the
///   choice is replaced by a candidate picked uniformly at random.
///
/// The choice starts out as the NPC's current direction, which is also what
/// is returned when there are no candidates.
pub(crate) fn decide<R: Rng + ?Sized>(
    npc: &Snake,
    food: Position,
    grid: Grid,
    rng: &mut R,
) -> Direction {
    let candidates = Direction::iter()
        .filter_map(|d| {
            let pos = d.advance(npc.head(), grid)?;
            (!npc.occupies(pos)).then_some((d, manhattan(pos, food)))
        })
        .collect::<Vec<_>>();
    let mut best = npc.direction();
    let mut best_distance = u32::MAX;
    for &(direction, distance) in &candidates {
        if rng.random_bool(consts::GREEDY_PROBABILITY) && distance < best_distance {
            best = direction;
            best_distance = distance;
        }
        if rng.random_bool(consts::RANDOM_OVERRIDE_PROBABILITY) {
            if let Some(&(direction, distance)) = candidates.choose(rng) {
                best = direction;
                best_distance = distance;
            }
        }
    }
    best
}
