use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use forest_hunt::{
    app::{App, KeyAction},
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore},
    difficulty::Difficulty,
    logging,
    runtime::{
        Clock, CrosstermEventSource, FixedTicker, HuntEvent, HuntEventSource, MonotonicClock,
        Runner, Ticker,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::info;

const TICK_RATE_MS: u64 = 50;

/// timed reaction game: click the critters before they vanish
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed reaction game for the terminal. Critters pop up around the forest; click them with the mouse before they vanish and before the clock runs out."
)]
pub struct Cli {
    /// difficulty preset (defaults to the last one you picked)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// seed for target placement, for reproducible rounds
    #[clap(long)]
    seed: Option<u64>,

    /// write logs to a file (default location if no path is given)
    #[clap(long, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    /// do not remember difficulty changes between runs
    #[clap(long)]
    no_save: bool,
}

impl Cli {
    fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_ref()
            .map(|p| p.clone().unwrap_or_else(AppDirs::default_log_path))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_path() {
        logging::init_file_logging(&path)?;
    }

    let store = FileConfigStore::new();
    let difficulty = cli.difficulty.unwrap_or_else(|| store.load().difficulty);
    let mut app = App::new(difficulty, cli.seed, (!cli.no_save).then_some(store));
    info!(%difficulty, "forest hunt loaded");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = start_tui(&mut terminal, &mut app, &runner, &MonotonicClock::new());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: HuntEventSource, T: Ticker, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
    clock: &C,
) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            HuntEvent::Tick => app.on_tick(clock.now_ms()),
            HuntEvent::Resize(width, height) => app.resize(width, height),
            HuntEvent::Mouse(mouse) => {
                let now = clock.now_ms();
                // Timers that came due first must fire before the click resolves
                app.on_tick(now);
                app.on_mouse(mouse, now);
            }
            HuntEvent::Key(key) => {
                let now = clock.now_ms();
                app.on_tick(now);
                if app.on_key(key, now) == KeyAction::Quit {
                    break;
                }
            }
        }
    }

    info!(score = app.session.score(), "forest hunt closed");
    Ok(())
}
