//! tickview: view and export historical stock prices in the terminal.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use tickview_core::{ViewController, ViewerConfig, YahooProvider};
use tickview_tui::app::{AppState, ErrorCategory};
use tickview_tui::{input, logging, ui};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let config_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tickview")
        .join("config.toml");
    let (config, config_error) = match ViewerConfig::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (ViewerConfig::default(), Some(e)),
    };

    logging::init(&config)?;
    info!(config = %config_path.display(), "starting tickview");

    let provider = YahooProvider::with_settings(&config.base_url, &config.user_agent)
        .context("failed to build HTTP client")?;
    let controller = ViewController::new(Box::new(provider));
    let today = chrono::Local::now().date_naive();
    let mut app = AppState::new(controller, &config, today);

    if let Some(e) = config_error {
        warn!(error = %e, "using default configuration");
        app.push_error(
            ErrorCategory::Config,
            format!("{e}; using defaults"),
            config_path.display().to_string(),
        );
    }

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting tickview");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. A submission drawn as "Fetching" above runs now, blocking the loop.
        if app.pending.is_some() {
            app.run_pending_fetch();
            continue;
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
