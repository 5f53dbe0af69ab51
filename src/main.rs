mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod render;
mod store;
mod ticker;
mod util;
mod warning;
use crate::app::App;
use crate::config::{Config, ConfigError};
use crate::game::{Engine, Grid};
use crate::highscore::HighScore;
use crate::store::MemoryStore;
use crate::util::error_chain;
use crate::warning::Warning;
use lexopt::{Arg, Parser};
use log::LevelFilter;
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: gridsnake [<options>]\n",
    "\n",
    "Play Snake in the terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <file>   Read configuration from <file>\n",
    "      --log-file <file> Write log messages to <file>\n",
    "  -h, --help            Display this help message and exit\n",
    "  -V, --version         Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run {
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run { config, log_file })
    }
}

fn main() -> ExitCode {
    let (config_path, log_file) = match Cli::from_parser(Parser::from_env()) {
        Ok(Cli::Run { config, log_file }) => (config, log_file),
        Ok(Cli::Help) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(Cli::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            return ExitCode::from(2);
        }
    };
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("gridsnake: {}", error_chain(&e));
            return ExitCode::from(2);
        }
    };
    if let Some(path) = log_file.as_deref().or(config.logging.file.as_deref()) {
        if let Err(e) = init_logging(path, config.logging.level) {
            eprintln!("gridsnake: failed to set up logging: {e}");
            return ExitCode::from(2);
        }
    }
    log::info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let mut warning = None;
    let store = config.open_store().unwrap_or_else(|e| {
        log::warn!("{}; high score will not be saved", error_chain(&e));
        warning = Some(Warning::from(e));
        Box::new(MemoryStore::default())
    });
    let mut high_score = HighScore::new(store);
    if let Err(e) = high_score.load() {
        log::warn!("{}; starting from zero", error_chain(&e));
        warning = Some(Warning::from(e));
    }
    let grid = Grid::from_canvas(consts::CANVAS_WIDTH, consts::CANVAS_HEIGHT, consts::CELL_SIZE);
    let mut app = App::new(Engine::new(grid, high_score, rand::rng()));
    if let Some(w) = warning {
        app = app.with_warning(w);
    }

    let terminal = ratatui::init();
    let r = app.run(terminal);
    ratatui::restore();
    io_exit(r)
}

/// Load the configuration file given on the command line or, if there was
/// none, the default configuration file (which need not exist)
fn load_config(path: Option<PathBuf>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => Config::load(&p, false),
        None => Config::load(&Config::default_path()?, true),
    }
}

fn init_logging(path: &Path, level: LevelFilter) -> io::Result<()> {
    let fp = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    WriteLogger::init(level, simplelog::Config::default(), fp).map_err(io::Error::other)
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("gridsnake: {e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], Cli::Run { config: None, log_file: None })]
    #[case(&["-c", "snake.toml"], Cli::Run { config: Some(PathBuf::from("snake.toml")), log_file: None })]
    #[case(&["--config=snake.toml", "--log-file", "snake.log"], Cli::Run { config: Some(PathBuf::from("snake.toml")), log_file: Some(PathBuf::from("snake.log")) })]
    #[case(&["--help"], Cli::Help)]
    #[case(&["-c", "snake.toml", "-V"], Cli::Version)]
    fn parse_args(#[case] args: &[&str], #[case] cli: Cli) {
        let parser = Parser::from_iter(std::iter::once("gridsnake").chain(args.iter().copied()));
        assert_eq!(Cli::from_parser(parser).unwrap(), cli);
    }

    #[rstest]
    #[case(&["--lives", "3"])]
    #[case(&["extra"])]
    #[case(&["--config"])]
    fn bad_args(#[case] args: &[&str]) {
        let parser = Parser::from_iter(std::iter::once("gridsnake").chain(args.iter().copied()));
        assert!(Cli::from_parser(parser).is_err());
    }
}
