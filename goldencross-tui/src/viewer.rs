//! Terminal lifecycle and the event loop.

use std::io::{self, stdout, Stdout};
use std::sync::Once;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;

use goldencross_runner::BacktestResult;

use crate::app::App;
use crate::navigation::handle_key_event;
use crate::ui;

static PANIC_HOOK: Once = Once::new();

/// Chain a terminal-restoring panic hook in front of the current one.
/// Only the first call installs it; returns whether this call did.
fn install_panic_hook() -> bool {
    let mut installed = false;
    PANIC_HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stderr(), LeaveAlternateScreen);
            default_hook(info);
        }));
        installed = true;
    });
    installed
}

/// Enter raw mode and the alternate screen. Raw mode is undone if the rest fails.
fn open_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let setup = || -> Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(terminal)
    };
    setup().map_err(|err| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        err
    })
}

/// Open the viewer on a finished run and block until the user quits.
pub fn run_viewer(result: &BacktestResult) -> Result<()> {
    install_panic_hook();

    let mut app = App::new(result);
    let mut terminal = open_terminal()?;

    let outcome = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms poll keeps resize handling responsive
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports both press and release
                if key.kind == KeyEventKind::Press {
                    handle_key_event(app, key);
                }
            }
        }
    }
    Ok(())
}
