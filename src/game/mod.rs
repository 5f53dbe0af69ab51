mod direction;
mod food;
mod grid;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::{Cell, Grid};
pub(crate) use self::snake::Snake;
use crate::consts;
use crate::highscore::HighScore;
use crate::store::Store;
use crate::util::error_chain;
use rand::Rng;
use std::fmt;

/// The game engine: owns the state of one game of Snake and advances it one
/// tick at a time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Engine<S, R = rand::rngs::ThreadRng> {
    rng: R,
    grid: Grid,
    snake: Snake,
    food: Option<Cell>,
    /// The direction the snake moved in on the most recent tick
    direction: Direction,
    /// The direction the snake will move in on the next tick
    pending: Direction,
    score: u32,
    high_score: HighScore<S>,
    phase: Phase,
}

impl<S: Store, R: Rng> Engine<S, R> {
    /// Create an idle engine.  Call [`Engine::start()`] to begin playing.
    pub(crate) fn new(grid: Grid, high_score: HighScore<S>, rng: R) -> Engine<S, R> {
        let mut engine = Engine {
            rng,
            grid,
            snake: starting_snake(),
            food: None,
            direction: consts::START_DIRECTION,
            pending: consts::START_DIRECTION,
            score: 0,
            high_score,
            phase: Phase::Idle,
        };
        engine.init();
        engine
    }

    fn init(&mut self) {
        self.snake = starting_snake();
        self.direction = consts::START_DIRECTION;
        self.pending = consts::START_DIRECTION;
        self.score = 0;
        self.food = food::place(self.grid, &self.snake, &mut self.rng);
    }

    /// Begin a new game.  Has no effect (and returns `false`) if a game is
    /// already running.
    pub(crate) fn start(&mut self) -> bool {
        if self.running() {
            log::debug!("Ignoring start request; game is already running");
            return false;
        }
        self.init();
        self.phase = Phase::Running;
        log::info!(
            "Started new game on {}x{} grid; high score is {}",
            self.grid.width(),
            self.grid.height(),
            self.high_score.get()
        );
        true
    }

    /// Abandon the current game, if any, and start a fresh one
    pub(crate) fn restart(&mut self) {
        if self.running() {
            log::info!("Abandoning game with score {}", self.score);
        }
        self.phase = Phase::Idle;
        self.start();
    }

    /// Request that the snake move in `direction` on the next tick.
    ///
    /// The request is rejected (and `false` returned) if it would reverse the
    /// direction the snake last moved in or if no game is running.  Of
    /// several accepted requests between two ticks, the last one wins.
    pub(crate) fn steer(&mut self, direction: Direction) -> bool {
        if !self.running() {
            return false;
        }
        if direction == self.direction.opposite() {
            log::debug!(
                "Rejected turn {direction}: snake is moving {}",
                self.direction
            );
            return false;
        }
        self.pending = direction;
        true
    }

    /// Advance the game by one move
    pub(crate) fn tick(&mut self) -> TickOutcome {
        if !self.running() {
            return TickOutcome::Stopped;
        }
        self.direction = self.pending;
        let head = self.direction.advance(self.snake.head());
        if !self.grid.contains(head) {
            return self.end(Ending::Wall);
        }
        if self.snake.contains(head) {
            return self.end(Ending::Body);
        }
        self.snake.push_head(head);
        if self.food == Some(head) {
            self.score = self.score.saturating_add(consts::FOOD_REWARD);
            self.record_score();
            self.food = food::place(self.grid, &self.snake, &mut self.rng);
            if self.food.is_none() {
                return self.end(Ending::BoardFull);
            }
            log::debug!("Ate food at ({}, {}); score is {}", head.x, head.y, self.score);
            TickOutcome::Ate
        } else {
            let _ = self.snake.drop_tail();
            TickOutcome::Moved
        }
    }

    fn end(&mut self, ending: Ending) -> TickOutcome {
        self.phase = Phase::Over(ending);
        log::info!("Game over ({ending}); final score {}", self.score);
        TickOutcome::Ended(ending)
    }

    fn record_score(&mut self) {
        match self.high_score.record(self.score) {
            Ok(true) => log::info!("New high score: {}", self.score),
            Ok(false) => (),
            Err(e) => log::warn!("Could not persist high score: {}", error_chain(&e)),
        }
    }
}

impl<S, R> Engine<S, R> {
    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Cell> {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score.get()
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn running(&self) -> bool {
        self.phase == Phase::Running
    }
}

fn starting_snake() -> Snake {
    Snake::from_cells(consts::SNAKE_START).expect("SNAKE_START should not be empty")
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// No game has been started yet
    Idle,
    Running,
    /// The game has ended and is waiting to be restarted
    Over(Ending),
}

/// How a game came to an end
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    /// The snake ran into the edge of the grid
    Wall,
    /// The snake ran into itself
    Body,
    /// The snake has filled the grid and there is nowhere left to place food
    BoardFull,
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Ending::Wall => "hit a wall",
            Ending::Body => "hit itself",
            Ending::BoardFull => "board full",
        };
        f.write_str(s)
    }
}

/// What happened during a call to [`Engine::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// No game is running, so nothing happened
    Stopped,
    /// The snake moved without eating
    Moved,
    /// The snake moved onto the food and grew
    Ate,
    /// The game ended on this tick
    Ended(Ending),
}
