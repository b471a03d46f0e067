//! Terminal lifecycle management.
//!
//! Setup, restore, and panic hooks for the full-screen selection overlays.
//! Terminal state is restored on normal exit and on panic.
//!
//! Input routing is single-owner: `spawn_key_reader` is the one place
//! crossterm events are read, and whichever component's `run` future holds
//! the receiver is the only component that sees keystrokes. Handing the
//! receiver to the next component is an explicit move, never a shared
//! subscription.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Sets up the terminal for the selection UI.
///
/// - Enables raw mode
/// - Enters alternate screen
/// - Creates the terminal instance
///
/// Call `install_panic_hook()` before this to ensure restore on panic.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores terminal state. Idempotent and safe to call multiple times.
pub fn restore_terminal() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the
/// panic. Call BEFORE `setup_terminal()`.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

/// Spawns the blocking crossterm read loop and returns the key stream.
///
/// Only key-press events are forwarded (release/repeat from enhanced
/// keyboard protocols would double every keystroke). The reader thread ends
/// when the receiver is dropped.
pub fn spawn_key_reader() -> UnboundedReceiver<KeyEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        while let Ok(event) = crossterm::event::read() {
            if let Event::Key(key) = event {
                if key.kind == KeyEventKind::Press && tx.send(key).is_err() {
                    break;
                }
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    // Terminal setup/restore needs a real TTY and is exercised manually.
    // The components are tested against ratatui's TestBackend instead; the
    // key invariant (exclusive receiver ownership) is enforced by the type
    // system: `run` takes `&mut UnboundedReceiver`.
}
