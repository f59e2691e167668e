mod map_draw;
mod state;
mod ui;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use indicator_atlas::{Atlas, AtlasConfig, CsvDirectory};
use ratatui::{Terminal, backend::CrosstermBackend};
use state::AppState;
use tracing_subscriber::EnvFilter;

/// Terminal dashboard for GDP and internet usage by country.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON config file; defaults apply when it does not exist.
    #[arg(long, default_value = "atlas.json")]
    config: PathBuf,
    /// Overrides `data_dir` from the config file.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Log file (the terminal belongs to the dashboard).
    #[arg(long, default_value = "indicator_atlas.log")]
    log: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(File::create(&args.log)?))
        .with_ansi(false)
        .init();

    let mut config = AtlasConfig::load_or_default(&args.config)?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    let source = CsvDirectory::from_config(&config.data_dir, &config);
    let atlas = Atlas::load(&source, &config)?;
    let mut state = AppState::new(atlas, config.domain);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| ui::draw(f, &state))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = event::read()? {
                if state.handle_input(code) {
                    break;
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
