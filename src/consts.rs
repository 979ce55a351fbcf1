//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Default time between simulation ticks
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(120);

/// Default width & height of the playing field, in cells
pub(crate) const GRID_SIZE: Size = Size {
    width: 20,
    height: 20,
};

/// Largest playing field that fits in [`DISPLAY_SIZE`] along with its border,
/// the score bar & the message line
pub(crate) const MAX_GRID_SIZE: Size = Size {
    width: 78,
    height: 20,
};

/// Default number of NPC snakes spawned at the start of each session
pub(crate) const NPC_COUNT: usize = 3;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Probability that an NPC adopts a strictly closer candidate direction
pub(crate) const GREEDY_PROBABILITY: f64 = 0.7;

/// Probability that an NPC replaces its current choice with a random
/// candidate direction
pub(crate) const RANDOM_OVERRIDE_PROBABILITY: f64 = 0.3;

/// Number of random draws to attempt when placing food or an NPC before
/// falling back to choosing among the free cells directly
pub(crate) const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// Colors assigned to NPC snakes, in spawn order.  Wraps around if there are
/// more NPCs than colors.
pub(crate) const NPC_PALETTE: [Color; 6] = [
    Color::LightBlue,
    Color::Magenta,
    Color::Yellow,
    Color::Cyan,
    Color::LightMagenta,
    Color::White,
];

/// Glyph for the player's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the player's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the player's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the player's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of a snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for an NPC's head
pub(crate) const NPC_HEAD_SYMBOL: char = '◆';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the player's head when it's collided with a wall or snake
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Color of the player's snake
pub(crate) const PLAYER_COLOR: Color = Color::Green;

/// Style for the player's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(PLAYER_COLOR).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
