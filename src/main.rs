mod app;
mod cli;
mod config;
mod domain;
mod images;
mod input;
mod logging;
mod notifications;
mod persistence;
mod store;
mod ticker;
mod timer;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::Parser;
use cli::Commands;
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use images::{HttpImageValidator, ImageValidator, OfflineImageValidator};
use notifications::{DesktopNotifier, Notifier, SilentNotifier};
use persistence::{
    config_file, ensure_taskitto_dir, init_local_dir, load_metadata, log_file, session_file, tasks_file,
    JsonFileRepository, MemoryRepository, StoreError, TaskRepository, UserScope,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use store::TaskStore;
use timer::{SystemClock, TimerQueue};

#[derive(Parser)]
#[command(name = "taskitto")]
#[command(about = "Eisenhower-style task matrix with a NOW slot and a Pomodoro timer", long_about = None)]
struct Cli {
    /// Config file to use instead of <data dir>/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep tasks in memory only; nothing is read or written
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let dir = init_local_dir()?;
        println!("Initialized taskitto directory: {}", dir.display());
        println!();
        println!("Taskitto will now use this local directory for task storage.");
        println!("Run 'taskitto' to open the matrix.");
        return Ok(());
    }

    let data_dir = ensure_taskitto_dir()?;
    logging::init(&log_file(&data_dir))?;

    let config_path = cli.config.clone().unwrap_or_else(|| config_file(&data_dir));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?;
    tracing::info!(dir = %data_dir.display(), user = %config.user, ephemeral = cli.ephemeral, "starting");

    let repo: Box<dyn TaskRepository> = if cli.ephemeral {
        Box::new(MemoryRepository::new())
    } else {
        Box::new(JsonFileRepository::new(tasks_file(&data_dir)))
    };
    let mut store = TaskStore::new(repo, UserScope::new(config.user.clone()));
    // A broken task file is reported, not fatal; mutations keep failing until it is fixed
    let load_error = store.load().err();
    if let Some(e) = &load_error {
        tracing::warn!(error = %e, "failed to load tasks, starting empty");
    }

    let images: Box<dyn ImageValidator> = if config.validate_images {
        Box::new(HttpImageValidator::new(Duration::from_secs(config.image_timeout_secs)))
    } else {
        Box::new(OfflineImageValidator)
    };

    match cli.command {
        Some(command) => {
            if let Some(e) = &load_error {
                eprintln!("Warning: could not load tasks: {}", e);
            }
            let mut stdout = io::stdout().lock();
            cli::execute(command, &mut store, images.as_ref(), config.sunday_policy, &mut stdout)
        }
        None => {
            let session_path = (!cli.ephemeral).then(|| session_file(&data_dir));
            run_tui(store, load_error, images, &config, session_path, &data_dir)
        }
    }
}

fn run_tui(
    store: TaskStore,
    load_error: Option<StoreError>,
    images: Box<dyn ImageValidator>,
    config: &Config,
    session_path: Option<PathBuf>,
    data_dir: &Path,
) -> Result<()> {
    let notifier: Box<dyn Notifier> = if config.notifications {
        Box::new(DesktopNotifier)
    } else {
        Box::new(SilentNotifier)
    };
    let timers = TimerQueue::new(Box::new(SystemClock::new()));
    let mut app = AppState::new(store, timers, notifier, images, config);
    if let Some(e) = load_error {
        app.report_store_error("load tasks", e);
    }

    if let Some(path) = session_path {
        match load_metadata(&path) {
            Ok(metadata) => app.restore_session(&metadata),
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable session file"),
        }
        app.session_path = Some(path);
    }

    eprintln!("Using taskitto directory: {}", data_dir.display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, config.tick_ms);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = app.save() {
        eprintln!("Error saving session: {}", e);
    }
    tracing::info!("stopped");

    if let Err(err) = result {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick_ms: u64,
) -> Result<()> {
    let tick_rate = ticker::tick_duration(tick_ms);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // The form already shows its checking state; validate the image now
        if app.finish_pending_submit() {
            continue;
        }

        // Wake up for input or the next due timer, whichever comes first
        let timeout = ticker::poll_timeout(tick_rate, app.next_timer_in());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.pump_timers();

        // Autosave if needed
        if app.needs_save {
            if let Err(e) = app.save() {
                tracing::warn!(error = %e, "failed to save session");
                app.needs_save = false;
            }
        }
    }
}
