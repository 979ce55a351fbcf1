mod app;
mod command;
mod config;
mod consts;
mod game;
mod options;
mod util;
use crate::app::App;
use crate::config::{Config, LogConfig};
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use crossterm::execute;
use lexopt::{Arg, Parser, ValueExt};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("npcsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let Some(args) = Arguments::from_parser(Parser::from_env())? else {
        return Ok(());
    };
    let config = match args.config {
        Some(ref path) => Config::load(path, false)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load(&path, true)
                .with_context(|| format!("failed to load {}", path.display()))?,
            Err(_) => Config::default(),
        },
    };
    init_logging(&config.log)?;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    tracing::info!(options = ?config.game, seed = ?args.seed, "starting");
    let terminal = ratatui::init();
    let r = set_focus_reporting(&mut io::stdout(), true)
        .and_then(|()| App::new(&config.game, rng).run(terminal));
    if let Err(e) = set_focus_reporting(&mut io::stdout(), false) {
        tracing::warn!(error = %e, "failed to disable focus reporting");
    }
    ratatui::restore();
    io_exit(r)
}

fn io_exit(r: io::Result<()>) -> anyhow::Result<()> {
    match r {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Turn terminal focus reporting on or off.  While it is on, the terminal
/// sends `FocusGained` & `FocusLost` events.
fn set_focus_reporting<W: Write>(out: &mut W, enabled: bool) -> io::Result<()> {
    if enabled {
        execute!(out, EnableFocusChange)
    } else {
        execute!(out, DisableFocusChange)
    }
}

/// Send `tracing` output to the configured log file.  The terminal belongs to
/// the game, so without a log file nothing is logged.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let Some(ref path) = log.file else {
        return Ok(());
    };
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log.level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    seed: Option<u64>,
}

impl Arguments {
    /// Parse command-line arguments.  Returns `None` if `--help` or
    /// `--version` was given and handled.
    fn from_parser(mut parser: Parser) -> Result<Option<Arguments>, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => {
                    println!("Usage: npcsnake [-c|--config <PATH>] [--seed <INT>]");
                    println!();
                    println!("Snake in the terminal, with company.");
                    println!();
                    println!("Options:");
                    println!("  -c, --config <PATH>  Read configuration from the given file");
                    println!("      --seed <INT>     Seed the random number generator");
                    println!("  -h, --help           Display this help message and exit");
                    println!("  -V, --version        Show the program version and exit");
                    return Ok(None);
                }
                Arg::Short('V') | Arg::Long("version") => {
                    println!("npcsnake {}", env!("CARGO_PKG_VERSION"));
                    return Ok(None);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Some(args))
    }
}
