// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Terminal setup and teardown.

use crate::app::Tui;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the alternate screen is currently active.
static ALTERNATE: AtomicBool = AtomicBool::new(false);

/// Enter raw mode, and the alternate screen when `fullscreen`.
pub fn init(fullscreen: bool) -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if fullscreen {
        execute!(stdout, EnterAlternateScreen)?;
        ALTERNATE.store(true, Ordering::SeqCst);
    }
    install_panic_hook();

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Switch between the alternate screen and inline drawing.
pub fn set_fullscreen(terminal: &mut Tui, fullscreen: bool) -> io::Result<()> {
    if ALTERNATE.load(Ordering::SeqCst) == fullscreen {
        return Ok(());
    }
    if fullscreen {
        execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    ALTERNATE.store(fullscreen, Ordering::SeqCst);
    terminal.clear()
}

/// Undo [`init`] for whichever mode is active. Inline mode leaves the last
/// frame on screen.
pub fn restore(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    if ALTERNATE.swap(false, Ordering::SeqCst) {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;
    Ok(())
}

/// A panic must not leave the shell in raw mode.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        if ALTERNATE.swap(false, Ordering::SeqCst) {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
        previous(info);
    }));
}
