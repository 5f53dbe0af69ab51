use crate::command::Command;
use crate::consts;
use crate::game::{Engine, Grid, Phase, TickOutcome};
use crate::render::{Renderer, TermSurface};
use crate::store::Store;
use crate::ticker::Ticker;
use crate::util::{center_rect, get_display_area};
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Terminal,
};
use std::io;
use std::time::Instant;

/// The interactive front end: owns the engine along with the clock that
/// drives it, and translates key presses into engine operations
#[derive(Clone, Debug)]
pub(crate) struct App<S, R = rand::rngs::ThreadRng> {
    engine: Engine<S, R>,
    ticker: Ticker,
    renderer: Renderer,
    warning: Option<Warning>,
    quitting: bool,
}

impl<S: Store, R: Rng> App<S, R> {
    pub(crate) fn new(engine: Engine<S, R>) -> App<S, R> {
        App {
            engine,
            ticker: Ticker::new(consts::TICK_PERIOD),
            renderer: Renderer::new(consts::CELL_SIZE),
            warning: None,
            quitting: false,
        }
    }

    /// Show `warning` in a pop-up on top of the game until it is dismissed
    pub(crate) fn with_warning(mut self, warning: Warning) -> App<S, R> {
        self.warning = Some(warning);
        self
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        log::info!("Entering main loop");
        while !self.quitting {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.process_input()?;
        }
        log::info!("Leaving main loop");
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        if let Some(wait) = self.ticker.timeout(Instant::now()) {
            if wait.is_zero() || !poll(wait)? {
                self.tick(Instant::now());
                return Ok(());
            }
        }
        let event = read()?;
        self.handle_event(&event, Instant::now());
        Ok(())
    }

    fn tick(&mut self, now: Instant) {
        if !self.ticker.poll(now) {
            return;
        }
        match self.engine.tick() {
            TickOutcome::Moved | TickOutcome::Ate => (),
            TickOutcome::Stopped | TickOutcome::Ended(_) => {
                log::debug!("Stopping ticker");
                self.ticker.cancel();
            }
        }
    }

    fn handle_event(&mut self, event: &Event, now: Instant) {
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return;
        };
        if let Some(ref warning) = self.warning {
            match warning.handle_command(cmd) {
                Some(WarningOutcome::Dismissed) => self.warning = None,
                Some(WarningOutcome::Quit) => self.quitting = true,
                None => (),
            }
            return;
        }
        match cmd {
            Command::Quit | Command::Q => self.quitting = true,
            Command::Confirm => {
                if self.engine.start() {
                    self.ticker.start(now);
                }
            }
            Command::Restart => {
                self.ticker.cancel();
                self.engine.restart();
                self.ticker.start(now);
            }
            Command::Up | Command::Down | Command::Left | Command::Right => {
                if let Some(d) = cmd.direction() {
                    self.engine.steer(d);
                }
            }
        }
    }
}

impl<S, R> Widget for &App<S, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);

        Line::styled(
            format!(" Score: {}", self.engine.score()),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);
        Line::styled(
            format!("High Score: {} ", self.engine.high_score()),
            consts::SCORE_BAR_STYLE,
        )
        .right_aligned()
        .render(score_area, buf);

        let canvas = canvas_size(self.engine.grid());
        let block_area = center_rect(
            board_area,
            Size {
                width: canvas.width.saturating_add(2),
                height: canvas.height.saturating_add(2),
            },
        );
        Block::bordered().render(block_area, buf);
        let mut surface = TermSurface::new(
            block_area.inner(Margin::new(1, 1)),
            buf,
            consts::TERMINAL_SCALE,
        );
        self.renderer.draw(&self.engine, &mut surface);

        let start_style = if self.engine.phase() == Phase::Running {
            consts::DISABLED_STYLE
        } else {
            Style::new()
        };
        Line::from_iter([
            Span::raw(" "),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::styled(" Start", start_style),
            Span::raw("   "),
            Span::styled("R", consts::KEY_STYLE),
            Span::raw(" Restart   "),
            Span::styled("Q", consts::KEY_STYLE),
            Span::raw(" Quit"),
        ])
        .render(hint_area, buf);

        if let Some(ref warning) = self.warning {
            warning.render(display, buf);
        }
    }
}

/// Return the number of terminal columns & rows needed to show the whole
/// grid at [`consts::TERMINAL_SCALE`]
fn canvas_size(grid: Grid) -> Size {
    let scale = consts::TERMINAL_SCALE;
    let cells = |n: u16, scale: u32| {
        let px = u32::from(n).saturating_mul(consts::CELL_SIZE);
        u16::try_from(px.div_ceil(scale.max(1))).unwrap_or(u16::MAX)
    };
    Size {
        width: cells(grid.width(), scale.x),
        height: cells(grid.height(), scale.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Ending};
    use crate::highscore::HighScore;
    use crate::store::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::style::Color;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    type TestApp = App<MemoryStore, ChaCha12Rng>;

    fn app() -> TestApp {
        App::new(Engine::new(
            Grid::from_canvas(consts::CANVAS_WIDTH, consts::CANVAS_HEIGHT, consts::CELL_SIZE),
            HighScore::new(MemoryStore::default()),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        ))
    }

    fn press(app: &mut TestApp, code: KeyCode, now: Instant) {
        app.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), now);
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_owned()
    }

    fn render(app: &TestApp) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    #[test]
    fn enter_starts_ticking() {
        let now = Instant::now();
        let mut app = app();
        assert!(!app.ticker.is_armed());
        press(&mut app, KeyCode::Enter, now);
        assert!(app.engine.running());
        assert_eq!(app.ticker.timeout(now), Some(consts::TICK_PERIOD));
        let head = app.engine.snake().head();
        app.tick(now + Duration::from_millis(100));
        assert_eq!(app.engine.snake().head(), head);
        app.tick(now + consts::TICK_PERIOD);
        assert_eq!(app.engine.snake().head().x, head.x + 1);
    }

    #[test]
    fn second_enter_keeps_schedule() {
        let now = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Enter, now);
        press(&mut app, KeyCode::Enter, now + Duration::from_millis(100));
        assert_eq!(
            app.ticker.timeout(now + Duration::from_millis(100)),
            Some(Duration::from_millis(50))
        );
    }

    #[test]
    fn arrows_steer() {
        let now = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Enter, now);
        press(&mut app, KeyCode::Char('w'), now);
        app.tick(now + consts::TICK_PERIOD);
        let head = app.engine.snake().head();
        assert_eq!((head.x, head.y), (5, 9));
        press(&mut app, KeyCode::Down, now);
        app.tick(now + consts::TICK_PERIOD * 2);
        assert_eq!(app.engine.snake().head().y, 8);
    }

    #[test]
    fn ticker_stops_at_game_over() {
        let now = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Enter, now);
        press(&mut app, KeyCode::Up, now);
        let mut t = now;
        for _ in 0..30 {
            t += consts::TICK_PERIOD;
            app.tick(t);
        }
        assert!(matches!(app.engine.phase(), Phase::Over(Ending::Wall)));
        assert!(!app.ticker.is_armed());
    }

    #[test]
    fn restart_resets_and_rearms() {
        let now = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Enter, now);
        press(&mut app, KeyCode::Up, now);
        let mut t = now;
        while app.engine.running() {
            t += consts::TICK_PERIOD;
            app.tick(t);
        }
        press(&mut app, KeyCode::Char('r'), t);
        assert!(app.engine.running());
        assert_eq!(app.engine.score(), 0);
        assert_eq!(app.engine.snake().len(), 3);
        assert_eq!(app.ticker.timeout(t), Some(consts::TICK_PERIOD));
        app.engine.steer(Direction::Down);
        app.tick(t + consts::TICK_PERIOD);
        assert_eq!(app.engine.snake().head().y, 11);
    }

    #[test]
    fn quit_keys() {
        let now = Instant::now();
        let mut by_q = app();
        press(&mut by_q, KeyCode::Char('q'), now);
        assert!(by_q.quitting);
        let mut by_ctrl_c = app();
        by_ctrl_c.handle_event(
            &Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            now,
        );
        assert!(by_ctrl_c.quitting);
    }

    #[test]
    fn warning_swallows_keys_until_dismissed() {
        let now = Instant::now();
        let mut app = app().with_warning(Warning::from(io::Error::other("disk on fire")));
        press(&mut app, KeyCode::Char('r'), now);
        assert_eq!(app.engine.phase(), Phase::Idle);
        press(&mut app, KeyCode::Enter, now);
        assert!(app.warning.is_none());
        assert_eq!(app.engine.phase(), Phase::Idle);
        press(&mut app, KeyCode::Enter, now);
        assert!(app.engine.running());
    }

    #[test]
    fn canvas_fits_display() {
        let grid = Grid::from_canvas(consts::CANVAS_WIDTH, consts::CANVAS_HEIGHT, consts::CELL_SIZE);
        assert_eq!(canvas_size(grid), Size::new(40, 20));
    }

    #[test]
    fn render_idle() {
        let buffer = render(&app());
        assert_eq!(
            row(&buffer, 0),
            format!(" Score: 0{}High Score: 0", " ".repeat(57))
        );
        assert_eq!(
            row(&buffer, 1),
            format!("{}┌{}┐", " ".repeat(19), "─".repeat(40))
        );
        assert_eq!(
            row(&buffer, 12),
            format!(
                "{}│{}Press Enter to start{}│",
                " ".repeat(19),
                " ".repeat(10),
                " ".repeat(10)
            )
        );
        assert_eq!(
            row(&buffer, 22),
            format!("{}└{}┘", " ".repeat(19), "─".repeat(40))
        );
        assert_eq!(row(&buffer, 23), " Enter Start   R Restart   Q Quit");
        assert_eq!(buffer[(7, 23)].fg, Color::Reset);
    }

    #[test]
    fn render_running() {
        let now = Instant::now();
        let mut app = app();
        press(&mut app, KeyCode::Enter, now);
        let buffer = render(&app);
        // Each snake cell covers two columns
        let inner_x = 20;
        for x in 6..12 {
            assert_eq!(buffer[(inner_x + x, 12)].symbol(), "█");
        }
        assert_eq!(buffer[(inner_x + 10, 12)].fg, consts::SNAKE_HEAD_COLOR);
        assert_eq!(buffer[(inner_x + 6, 12)].fg, consts::SNAKE_BODY_COLOR);
        assert_eq!(buffer[(7, 23)].fg, Color::DarkGray);
    }
}
