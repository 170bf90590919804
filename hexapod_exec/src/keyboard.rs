//! # Keyboard Intent Source
//!
//! Reads arrow keys from the terminal. The terminal is only put into raw mode while waiting for a
//! key, so log output during a gait cycle is printed normally.
//!
//! Outside raw mode the terminal still echoes input, so an arrow key pressed while a cycle runs
//! shows up as an escape sequence such as `^[[A` between the log lines. The key itself is
//! discarded before the next read and never starts a cycle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal,
};
use log::trace;
use std::time::Duration;

use crate::cmd_loop::{Intent, IntentError, IntentSource};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Intent source reading the arrow keys of the controlling terminal.
#[derive(Debug, Default)]
pub struct KeyboardSource;

/// Keeps the terminal in raw mode until dropped.
struct RawMode;

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl KeyboardSource {
    pub fn new() -> Self {
        Self
    }

    /// Block until any key is pressed.
    pub fn wait_any_key(&mut self) -> Result<(), IntentError> {
        let _raw = RawMode::enable()?;

        read_key_press().map(|_| ())
    }
}

impl IntentSource for KeyboardSource {
    fn next_intent(&mut self) -> Result<Intent, IntentError> {
        let _raw = RawMode::enable()?;

        // Discard keys pressed while the last cycle was running
        while event::poll(Duration::from_millis(0)).map_err(IntentError::Io)? {
            let stale = event::read().map_err(IntentError::Io)?;
            trace!("Discarding {:?}", stale);
        }

        read_key_press().map(|key| intent_from_key(&key))
    }
}

impl RawMode {
    fn enable() -> Result<Self, IntentError> {
        terminal::enable_raw_mode().map_err(IntentError::Io)?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Block until the next key press, ignoring releases and other terminal events.
fn read_key_press() -> Result<KeyEvent, IntentError> {
    loop {
        match event::read().map_err(IntentError::Io)? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
            _ => continue,
        }
    }
}

fn intent_from_key(key: &KeyEvent) -> Intent {
    match key.code {
        KeyCode::Up => Intent::Up,
        KeyCode::Down => Intent::Down,
        KeyCode::Left => Intent::Left,
        KeyCode::Right => Intent::Right,
        _ => Intent::Other,
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
