//! Running the calculator: scripted key presses and the interactive terminal

use std::io::{self, Write};

use calcpad::config::CalculatorConfig;
use calcpad::key::Key;
use calcpad::theme::{SchemeSignal, ThemeOption};
use calcpad::tui::{render, CalculatorApp, InputHandler, Palette, TextGrid};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event},
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

/// Installs the stderr subscriber; `RUST_LOG` wins over `fallback`
pub fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    // a second install (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Builds the app and applies a startup theme, if any
pub fn build_app(
    config: &CalculatorConfig,
    signal: SchemeSignal,
    theme: Option<ThemeOption>,
) -> CalculatorApp {
    let mut app = CalculatorApp::from_config(config, signal);
    if let Some(choice) = theme {
        app.set_theme(choice);
        if let Some(status) = app.status() {
            warn!(%status, "startup theme not persisted");
        }
    }
    info!(theme = %app.applied_theme(), "calculator ready");
    app
}

/// Presses whitespace-separated key tokens and returns the final display
pub fn run_keys(app: &mut CalculatorApp, keys: &str) -> CliResult<String> {
    for token in keys.split_whitespace() {
        let key: Key = token
            .parse()
            .map_err(|err| CliError::invalid_argument(format!("{err}")))?;
        app.press(key);
    }
    debug!(display = %app.display(), "scripted keys done");
    Ok(app.display())
}

/// Restores the terminal on drop, including on early return
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> CliResult<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Runs the interactive terminal calculator until the user quits
pub fn run_interactive(app: &mut CalculatorApp) -> CliResult<()> {
    let _guard = TerminalGuard::enter()?;
    let input = InputHandler::new();
    let mut stdout = io::stdout();

    while !app.should_quit() {
        draw(&mut stdout, app)?;
        if let Event::Key(key) = event::read()? {
            app.handle_action(input.handle_key(key));
        }
    }
    Ok(())
}

fn draw(out: &mut impl Write, app: &CalculatorApp) -> CliResult<()> {
    let (width, height) = terminal::size()?;
    let mut grid = TextGrid::new(width, height);
    render(app, &mut grid);

    let palette = Palette::for_theme(app.applied_theme());
    queue!(
        out,
        SetBackgroundColor(palette.background),
        SetForegroundColor(palette.foreground),
        Clear(ClearType::All)
    )?;
    let lines = grid.to_lines();
    for (row, line) in lines.iter().enumerate() {
        let Ok(row) = u16::try_from(row) else {
            break;
        };
        queue!(out, MoveTo(0, row), Print(line))?;
    }
    // the display line is drawn again in the accent color
    queue!(
        out,
        MoveTo(0, 2),
        SetForegroundColor(palette.accent),
        Print(lines.get(2).map_or("", String::as_str)),
        SetForegroundColor(palette.foreground)
    )?;
    out.flush()?;
    Ok(())
}
