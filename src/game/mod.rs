mod clock;
mod direction;
mod food;
mod frame;
mod grid;
mod npc;
mod snake;
pub(crate) use self::clock::Clock;
pub(crate) use self::direction::Direction;
pub(crate) use self::frame::{FrameState, NpcFrame};
pub(crate) use self::grid::Grid;
use self::npc::NpcMove;
use self::snake::{Collision, Snake};
use crate::consts;
use crate::options::Options;
use rand::Rng;
use ratatui::layout::Position;

/// One game of Snake: the player, the NPCs, the food & the score.
///
/// All state changes go through [`Session::start()`], [`Session::step()`],
/// and the pause/input methods; the renderer only ever sees
/// [`FrameState`] snapshots taken between ticks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session<R> {
    rng: R,
    grid: Grid,
    npc_count: usize,
    player: Snake,
    npcs: Vec<Snake>,
    /// `None` only once the board has filled up and the game is over
    food: Option<Position>,
    score: u32,
    phase: Phase,
}

impl<R: Rng> Session<R> {
    /// Create a session that has not yet started.  The board is laid out as
    /// it will be for a first game so that there is something to draw.
    pub(crate) fn new(options: &Options, rng: R) -> Session<R> {
        let grid = options.grid();
        let mut session = Session {
            rng,
            grid,
            npc_count: options.npcs,
            player: Snake::new(grid.center(), Direction::Right, consts::PLAYER_COLOR),
            npcs: Vec::new(),
            food: None,
            score: 0,
            phase: Phase::NotStarted,
        };
        session.reset();
        session
    }

    /// Start a new game if none is in progress, or resume a paused one
    pub(crate) fn start(&mut self) {
        match self.phase {
            Phase::NotStarted | Phase::Over => {
                self.reset();
                self.phase = Phase::Running;
                tracing::info!(npcs = self.npcs.len(), "game started");
                if self.food.is_none() {
                    self.game_over("board is full");
                }
            }
            Phase::Paused => self.resume(),
            Phase::Running => (),
        }
    }

    /// Pause a running game
    pub(crate) fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            tracing::info!(score = self.score, "game paused");
        }
    }

    /// Resume a paused game
    pub(crate) fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
            tracing::info!(score = self.score, "game resumed");
        }
    }

    /// Pause a running game or resume a paused one.  Otherwise a no-op.
    pub(crate) fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::NotStarted | Phase::Over => (),
        }
    }

    /// Apply a command from the player.  A direction key starts (or resumes)
    /// the game if it is not running and not over.
    pub(crate) fn handle_input(&mut self, input: Input) {
        match input {
            Input::Direction(direction) => {
                if matches!(self.phase, Phase::NotStarted | Phase::Paused) {
                    self.start();
                }
                if self.phase == Phase::Running {
                    self.player.turn(direction);
                }
            }
            Input::ToggleStartRestart => self.start(),
            Input::TogglePause => self.toggle_pause(),
        }
    }

    /// Advance the game by one tick.  Does nothing and returns `false` if the
    /// game is not running.
    pub(crate) fn step(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let head = match self.player.aim(self.grid) {
            None => Err(Collision::Wall),
            Some(p) if self.player.occupies(p) => Err(Collision::OwnBody),
            Some(p) if self.npcs.iter().any(|npc| npc.is_alive() && npc.occupies(p)) => {
                Err(Collision::Npc)
            }
            Some(p) => Ok(p),
        };
        let head = match head {
            Ok(head) => head,
            Err(collision) => {
                tracing::debug!(?collision, "player crashed");
                self.game_over("player crashed");
                return true;
            }
        };
        let ate = self.food == Some(head);
        self.player.advance(head, ate);
        if ate {
            self.score += 1;
            if !self.replace_food() {
                return true;
            }
        }
        for i in 0..self.npcs.len() {
            if !self.npcs[i].is_alive() {
                continue;
            }
            match npc::advance(&mut self.npcs, i, &self.player, self.food, self.grid) {
                NpcMove::Died(collision) => {
                    let length = self.npcs[i].len();
                    tracing::debug!(npc = i, length, ?collision, "NPC died");
                    continue;
                }
                NpcMove::Moved { ate: true } => {
                    if !self.replace_food() {
                        return true;
                    }
                }
                NpcMove::Moved { ate: false } => (),
            }
            if let Some(food) = self.food {
                let next = npc::decide(&self.npcs[i], food, self.grid, &mut self.rng);
                self.npcs[i].next_direction = next;
            }
        }
        true
    }

    /// Lay out the board for a new game: the player at the center heading
    /// right, fresh NPCs, new food, and a zero score
    fn reset(&mut self) {
        self.player = Snake::new(self.grid.center(), Direction::Right, consts::PLAYER_COLOR);
        self.score = 0;
        self.food = food::generate(self.grid, &self.player, &[], &mut self.rng);
        self.npcs = npc::spawn(self.grid, self.npc_count, &self.player, &mut self.rng);
        if self
            .food
            .is_none_or(|f| self.npcs.iter().any(|npc| npc.occupies(f)))
        {
            self.food = food::generate(self.grid, &self.player, &self.npcs, &mut self.rng);
        }
    }

    /// Place new food after the old one was eaten.  If there is nowhere to
    /// put it, the game ends and `false` is returned.
    fn replace_food(&mut self) -> bool {
        self.food = food::generate(self.grid, &self.player, &self.npcs, &mut self.rng);
        if self.food.is_none() {
            self.game_over("board is full");
            false
        } else {
            true
        }
    }
}

impl<R> Session<R> {
    /// The current phase of the session
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Food eaten by the player in the current game
    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    /// Take a snapshot of everything the renderer needs
    pub(crate) fn frame(&self) -> FrameState {
        FrameState {
            grid: self.grid,
            player: self.player.body().iter().copied().collect(),
            player_color: self.player.color(),
            direction: self.player.direction(),
            npcs: self
                .npcs
                .iter()
                .map(|npc| NpcFrame {
                    body: npc.body().iter().copied().collect(),
                    alive: npc.is_alive(),
                    color: npc.color(),
                })
                .collect(),
            food: self.food,
            score: self.score,
            phase: self.phase,
        }
    }

    fn game_over(&mut self, reason: &str) {
        self.phase = Phase::Over;
        tracing::info!(score = self.score, reason, "game over");
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    NotStarted,
    Running,
    Paused,
    Over,
}

/// Commands the session accepts from the player
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Input {
    Direction(Direction),
    ToggleStartRestart,
    TogglePause,
}

#[cfg(test)]
mod tests {
    use super::*;
    use enum_map::Enum;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::style::Color;
    use std::collections::{HashSet, VecDeque};

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn session() -> Session<ChaCha12Rng> {
        Session::new(&Options::default(), ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    /// A running session with no NPCs, the player at (10, 10) heading right,
    /// and the food out of the way at (0, 0)
    fn running_alone() -> Session<ChaCha12Rng> {
        let mut game = session();
        game.start();
        game.npcs.clear();
        game.food = Some(Position::new(0, 0));
        game
    }

    fn npc(body: &[(u16, u16)], direction: Direction) -> Snake {
        let mut snake = Snake::new(Position::ORIGIN, direction, Color::Blue);
        snake.body = body.iter().map(|&(x, y)| Position::new(x, y)).collect();
        snake
    }

    fn cells(body: &[(u16, u16)]) -> VecDeque<Position> {
        body.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn new_session() {
        let game = session();
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.score(), 0);
        assert_eq!(game.player.body, cells(&[(10, 10)]));
        assert_eq!(game.player.direction(), Direction::Right);
        assert_eq!(game.npcs.len(), 3);
        let food = game.food.unwrap();
        assert!(game.grid.in_bounds(food));
        assert!(!game.player.occupies(food));
        assert!(game.npcs.iter().all(|npc| !npc.occupies(food)));
    }

    #[test]
    fn step_does_nothing_unless_running() {
        let mut game = session();
        let before = game.clone();
        assert!(!game.step());
        assert_eq!(game, before);

        game.start();
        game.pause();
        assert_eq!(game.phase(), Phase::Paused);
        let before = game.clone();
        assert!(!game.step());
        assert_eq!(game, before);

        game.phase = Phase::Over;
        let before = game.clone();
        assert!(!game.step());
        assert_eq!(game, before);
    }

    #[test]
    fn step_moves_head() {
        let mut game = running_alone();
        assert!(game.step());
        assert_eq!(game.player.body, cells(&[(11, 10)]));
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), Phase::Running);
    }

    #[test]
    fn step_into_wall() {
        let mut game = running_alone();
        game.player.body = cells(&[(19, 10)]);
        game.score = 4;
        assert!(game.step());
        assert_eq!(game.phase(), Phase::Over);
        assert_eq!(game.score(), 4);
        assert_eq!(game.player.body, cells(&[(19, 10)]));
        let before = game.clone();
        assert!(!game.step());
        assert_eq!(game, before);
    }

    #[test]
    fn step_onto_food() {
        let mut game = running_alone();
        game.food = Some(Position::new(11, 10));
        assert!(game.step());
        assert_eq!(game.score(), 1);
        assert_eq!(game.player.body, cells(&[(11, 10), (10, 10)]));
        let food = game.food.unwrap();
        assert!(!game.player.occupies(food));
        assert!(game.grid.in_bounds(food));
        game.food = Some(Position::new(0, 0));
        assert!(game.step());
        assert_eq!(game.player.body, cells(&[(12, 10), (11, 10)]));
    }

    #[test]
    fn step_into_own_body() {
        let mut game = running_alone();
        game.player.body = cells(&[(10, 10), (11, 10), (11, 11), (10, 11), (9, 11)]);
        game.player.direction = Direction::Left;
        game.player.next_direction = Direction::Left;
        game.player.turn(Direction::Down);
        assert!(game.step());
        assert_eq!(game.phase(), Phase::Over);
        assert_eq!(
            game.player.body,
            cells(&[(10, 10), (11, 10), (11, 11), (10, 11), (9, 11)])
        );
    }

    #[test]
    fn step_into_npc() {
        let mut game = running_alone();
        game.npcs.push(npc(&[(11, 9), (11, 10)], Direction::Up));
        assert!(game.step());
        assert_eq!(game.phase(), Phase::Over);
        assert_eq!(game.player.body, cells(&[(10, 10)]));
    }

    #[test]
    fn dead_npcs_are_harmless() {
        let mut game = running_alone();
        let mut corpse = npc(&[(11, 9), (11, 10)], Direction::Up);
        corpse.alive = false;
        game.npcs.push(corpse);
        assert!(game.step());
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.player.body, cells(&[(11, 10)]));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut game = running_alone();
        game.handle_input(Input::Direction(Direction::Left));
        assert!(game.step());
        assert_eq!(game.player.body, cells(&[(11, 10)]));
        assert_eq!(game.player.direction(), Direction::Right);
    }

    #[test]
    fn latest_turn_wins() {
        let mut game = running_alone();
        game.handle_input(Input::Direction(Direction::Up));
        game.handle_input(Input::Direction(Direction::Down));
        assert!(game.step());
        assert_eq!(game.player.body, cells(&[(10, 11)]));
    }

    #[test]
    fn direction_starts_game() {
        let mut game = session();
        game.handle_input(Input::Direction(Direction::Up));
        assert_eq!(game.phase(), Phase::Running);
        game.npcs.clear();
        game.food = Some(Position::new(0, 0));
        assert!(game.step());
        assert_eq!(game.player.body, cells(&[(10, 9)]));
    }

    #[test]
    fn direction_resumes_paused_game() {
        let mut game = running_alone();
        game.handle_input(Input::TogglePause);
        assert_eq!(game.phase(), Phase::Paused);
        game.handle_input(Input::Direction(Direction::Down));
        assert_eq!(game.phase(), Phase::Running);
        assert!(game.step());
        assert_eq!(game.player.body, cells(&[(10, 11)]));
    }

    #[test]
    fn direction_ignored_when_over() {
        let mut game = running_alone();
        game.phase = Phase::Over;
        let before = game.clone();
        game.handle_input(Input::Direction(Direction::Up));
        assert_eq!(game, before);
    }

    #[test]
    fn pause_toggling() {
        let mut game = session();
        game.handle_input(Input::TogglePause);
        assert_eq!(game.phase(), Phase::NotStarted);
        game.handle_input(Input::ToggleStartRestart);
        assert_eq!(game.phase(), Phase::Running);
        game.handle_input(Input::TogglePause);
        assert_eq!(game.phase(), Phase::Paused);
        game.handle_input(Input::TogglePause);
        assert_eq!(game.phase(), Phase::Running);
        game.phase = Phase::Over;
        game.handle_input(Input::TogglePause);
        assert_eq!(game.phase(), Phase::Over);
        game.resume();
        assert_eq!(game.phase(), Phase::Over);
    }

    #[test]
    fn start_is_idempotent_while_running() {
        let mut game = running_alone();
        game.step();
        let before = game.clone();
        game.start();
        assert_eq!(game, before);
    }

    #[test]
    fn start_resumes_without_reset() {
        let mut game = running_alone();
        game.food = Some(Position::new(11, 10));
        game.step();
        game.pause();
        game.start();
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.score(), 1);
        assert_eq!(game.player.len(), 2);
    }

    #[test]
    fn restart_after_game_over() {
        let mut game = running_alone();
        game.food = Some(Position::new(11, 10));
        game.step();
        game.player.body = cells(&[(19, 3), (18, 3)]);
        game.step();
        assert_eq!(game.phase(), Phase::Over);
        assert_eq!(game.score(), 1);
        game.handle_input(Input::ToggleStartRestart);
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.player.body, cells(&[(10, 10)]));
        assert_eq!(game.player.direction(), Direction::Right);
        assert_eq!(game.npcs.len(), 3);
        assert!(game.npcs.iter().all(Snake::is_alive));
    }

    #[test]
    fn npc_moves_after_player() {
        let mut game = running_alone();
        // The NPC heads for the cell the player has just moved into
        game.npcs.push(npc(&[(12, 10)], Direction::Left));
        assert!(game.step());
        assert_eq!(game.phase(), Phase::Running);
        assert!(!game.npcs[0].is_alive());
        assert_eq!(game.npcs[0].body, cells(&[(12, 10)]));
        for _ in 0..3 {
            game.step();
            assert!(!game.npcs[0].is_alive());
        }
    }

    #[test]
    fn npc_eats_food() {
        let mut game = running_alone();
        game.npcs.push(npc(&[(5, 5)], Direction::Right));
        game.food = Some(Position::new(6, 5));
        assert!(game.step());
        assert_eq!(game.npcs[0].body, cells(&[(6, 5), (5, 5)]));
        assert_eq!(game.score(), 0);
        let food = game.food.unwrap();
        assert_ne!(food, Position::new(6, 5));
        assert!(!game.npcs[0].occupies(food));
        assert!(!game.player.occupies(food));
    }

    #[test]
    fn boxed_in_npc_dies() {
        let mut game = running_alone();
        game.npcs.push(npc(
            &[(1, 0), (2, 0), (2, 1), (1, 1), (0, 1), (0, 2)],
            Direction::Left,
        ));
        game.food = Some(Position::new(5, 5));
        // Moves to (0, 0), where every neighbor is a wall or its own body
        assert!(game.step());
        assert!(game.npcs[0].is_alive());
        assert_eq!(game.npcs[0].head(), Position::new(0, 0));
        assert_eq!(game.npcs[0].next_direction, Direction::Left);
        assert!(game.step());
        assert!(!game.npcs[0].is_alive());
        assert!(game.step());
        assert!(!game.npcs[0].is_alive());
    }

    #[test]
    fn npc_collisions_follow_update_order() {
        // The leading NPC vacates (6, 5) this tick.  If it moves first, the
        // trailing NPC can follow into the vacated cell; if it moves second,
        // the trailing NPC still sees it there.
        let lead = npc(&[(7, 5), (6, 5)], Direction::Right);
        let trail = npc(&[(5, 5)], Direction::Right);

        let mut game = running_alone();
        game.npcs = vec![lead.clone(), trail.clone()];
        game.step();
        assert!(game.npcs[0].is_alive());
        assert!(game.npcs[1].is_alive());
        assert_eq!(game.npcs[1].head(), Position::new(6, 5));

        let mut game = running_alone();
        game.npcs = vec![trail, lead];
        game.step();
        assert!(!game.npcs[0].is_alive());
        assert!(game.npcs[1].is_alive());
    }

    #[test]
    fn full_board_ends_game() {
        let options = Options {
            width: 3,
            height: 1,
            npcs: 0,
            tick_ms: 120,
        };
        let mut game = Session::new(&options, ChaCha12Rng::seed_from_u64(RNG_SEED));
        game.start();
        game.player.body = cells(&[(1, 0), (0, 0)]);
        game.food = Some(Position::new(2, 0));
        assert!(game.step());
        assert_eq!(game.score(), 1);
        assert_eq!(game.food, None);
        assert_eq!(game.phase(), Phase::Over);
    }

    #[test]
    fn food_never_starts_under_an_npc() {
        let options = Options {
            width: 3,
            height: 2,
            npcs: 3,
            tick_ms: 120,
        };
        for seed in 0..500 {
            let mut game = Session::new(&options, ChaCha12Rng::seed_from_u64(seed));
            for _ in 0..2 {
                let food = game.food.unwrap();
                assert_eq!(game.npcs.len(), 3);
                assert!(!game.player.occupies(food), "seed {seed}: food under player");
                assert!(
                    game.npcs.iter().all(|npc| !npc.occupies(food)),
                    "seed {seed}: food under an NPC"
                );
                game.phase = Phase::Over;
                game.start();
                assert_eq!(game.phase(), Phase::Running);
            }
        }
    }

    #[test]
    fn frame_carries_player_color() {
        let game = session();
        let frame = game.frame();
        assert_eq!(frame.player_color, consts::PLAYER_COLOR);
        assert_eq!(frame.player, vec![Position::new(10, 10)]);
        assert_eq!(frame.npcs.len(), 3);
    }

    #[test]
    fn invariants_hold_over_many_ticks() {
        let mut game = session();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED ^ 0xFFFF);
        let mut games = 0;
        for _ in 0..5000 {
            if game.phase() == Phase::Over {
                games += 1;
            }
            if game.phase() != Phase::Running {
                game.start();
            }
            let d = Direction::from_usize(rng.random_range(0..4));
            if rng.random_bool(0.2) {
                game.handle_input(Input::Direction(d));
            }
            let before_len = game.player.len();
            let before_score = game.score();
            game.step();
            if game.phase() == Phase::Running {
                assert!(game.score() >= before_score);
                assert_eq!(
                    game.player.len(),
                    before_len + usize::try_from(game.score() - before_score).unwrap()
                );
                assert_eq!(game.player.len(), usize::try_from(game.score()).unwrap() + 1);
                let food = game.food.unwrap();
                assert!(game.grid.in_bounds(food));
                assert!(!game.player.occupies(food));
                assert!(game
                    .npcs
                    .iter()
                    .all(|npc| !npc.is_alive() || !npc.occupies(food)));
            }
            for snake in std::iter::once(&game.player).chain(&game.npcs) {
                let distinct = snake.body().iter().collect::<HashSet<_>>();
                assert_eq!(distinct.len(), snake.len(), "snake overlaps itself");
                assert!(snake.body().iter().all(|&p| game.grid.in_bounds(p)));
            }
        }
        assert!(games > 0, "no game ever ended");
    }
}
