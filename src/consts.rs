//! Assorted constants & hard-coded configuration
use crate::game::{Cell, Direction};
use crate::render::Scale;
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(150);

/// Width of the drawing canvas in pixels
pub(crate) const CANVAS_WIDTH: u32 = 400;

/// Height of the drawing canvas in pixels
pub(crate) const CANVAS_HEIGHT: u32 = 400;

/// Width & height of a grid cell in pixels
pub(crate) const CELL_SIZE: u32 = 20;

/// Pixels per terminal column & row.  A grid cell is drawn as two columns by
/// one row so that it appears roughly square.
pub(crate) const TERMINAL_SCALE: Scale = Scale { x: 10, y: 20 };

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// The snake's cells at the start of a game, head first
pub(crate) const SNAKE_START: [Cell; 3] = [Cell::new(5, 10), Cell::new(4, 10), Cell::new(3, 10)];

/// The direction the snake faces at the start of a game
pub(crate) const START_DIRECTION: Direction = Direction::Right;

/// Points awarded for each piece of food eaten
pub(crate) const FOOD_REWARD: u32 = 10;

/// Number of random draws made when placing food before falling back to
/// choosing among the free cells directly
pub(crate) const MAX_FOOD_ATTEMPTS: usize = 64;

/// Key under which the high score is persisted
pub(crate) const HIGH_SCORE_KEY: &str = "highScore";

/// Color of the snake's head
pub(crate) const SNAKE_HEAD_COLOR: Color = Color::Green;

/// Color of the rest of the snake
pub(crate) const SNAKE_BODY_COLOR: Color = Color::LightGreen;

/// Color of the food
pub(crate) const FOOD_COLOR: Color = Color::LightRed;

/// Color of messages drawn on the canvas
pub(crate) const TEXT_COLOR: Color = Color::White;

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for controls that currently have no effect
pub(crate) const DISABLED_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::DIM);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
