use crate::consts;
use crate::game::Grid;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Gameplay settings, fixed for the lifetime of a session
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    /// Width of the playing field in cells
    pub(crate) width: u16,

    /// Height of the playing field in cells
    pub(crate) height: u16,

    /// Number of NPC snakes spawned at the start of each game
    pub(crate) npcs: usize,

    /// Milliseconds between simulation ticks
    pub(crate) tick_ms: u64,
}

impl Options {
    pub(crate) fn grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Check that a game can be played with these options and drawn on the
    /// screen
    pub(crate) fn validate(&self) -> Result<(), OptionsError> {
        if self.width == 0
            || self.height == 0
            || self.width > consts::MAX_GRID_SIZE.width
            || self.height > consts::MAX_GRID_SIZE.height
        {
            return Err(OptionsError::GridSize {
                width: self.width,
                height: self.height,
            });
        }
        // Leave room for the player and the food
        let cells = self.grid().area();
        if self.npcs.saturating_add(2) > cells {
            return Err(OptionsError::TooManyNpcs {
                npcs: self.npcs,
                cells,
            });
        }
        if self.tick_ms == 0 {
            return Err(OptionsError::ZeroTick);
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Options {
        Options {
            width: consts::GRID_SIZE.width,
            height: consts::GRID_SIZE.height,
            npcs: consts::NPC_COUNT,
            tick_ms: u64::try_from(consts::TICK_PERIOD.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum OptionsError {
    #[error(
        "grid size {width}x{height} is not between 1x1 and {}x{}",
        consts::MAX_GRID_SIZE.width,
        consts::MAX_GRID_SIZE.height
    )]
    GridSize { width: u16, height: u16 },
    #[error("{npcs} NPCs do not fit on a grid of {cells} cells")]
    TooManyNpcs { npcs: usize, cells: usize },
    #[error("tick period must be nonzero")]
    ZeroTick,
}
