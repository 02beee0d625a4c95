use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    fs::OpenOptions,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};
use time_bullet_config::{Config, FileConfigStore};
use time_bullet_engine::{TimeBullets, io};

mod app;
mod ui;

use app::{App, Control};

/// Log to a file next to the config: stderr belongs to the TUI.
fn init_logging() {
    let log_path = Config::config_path().with_file_name("time-bullet.log");
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(log::LevelFilter::Info);

    if let Some(parent) = log_path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        eprintln!("Warning: cannot create log directory {}: {e}", parent.display());
    }
    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Warning: cannot open log file {}: {e}", log_path.display()),
    }

    builder.init();
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <markdown-file>", args[0]);
        process::exit(1);
    }
    let path = PathBuf::from(&args[1]);

    init_logging();
    log::info!("time-bullet starting up, editing {}", path.display());

    let document = match io::read_document(&path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: cannot open '{}': {e}", path.display());
            process::exit(1);
        }
    };

    let store = FileConfigStore::default();
    log::info!("Config path: {}", store.path().display());
    let bullets = TimeBullets::load(Box::new(store));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(path, document, bullets);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{err:?}");
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key) == Control::Quit
        {
            if app.is_dirty() {
                log::warn!("Quitting with unsaved changes in {}", app.path.display());
            }
            return Ok(());
        }
    }
}
