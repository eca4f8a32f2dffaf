//! Raw keyboard capture published through a single shared cell.
//!
//! The capture thread blocks on terminal events and only ever writes the
//! most recent printable key into an atomic byte; the simulation loop reads
//! and clears that byte once per tick. Neither side waits on the other: a
//! hesitating player produces idle ticks, and a burst of keystrokes keeps
//! only the latest one.

use std::{
    sync::{
        atomic::{AtomicU8, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use dungeon_chase_core::PlayerCommand;

const EMPTY: u8 = 0;
const QUIT_KEY: char = 'q';

/// Single-writer/single-reader cell holding the latest keystroke byte.
#[derive(Debug, Default)]
struct InputCell {
    latest: AtomicU8,
}

impl InputCell {
    fn publish(&self, key: char) {
        if key.is_ascii() && key != EMPTY as char {
            self.latest.store(key as u8, Ordering::Release);
        }
    }

    fn take(&self) -> Option<char> {
        match self.latest.swap(EMPTY, Ordering::AcqRel) {
            EMPTY => None,
            byte => Some(byte as char),
        }
    }
}

/// Handle pairing the shared keystroke cell with its capture thread.
pub(crate) struct InputBridge {
    cell: Arc<InputCell>,
    handle: JoinHandle<()>,
}

impl InputBridge {
    /// Spawns the capture thread.
    ///
    /// The thread exits on its own after publishing the quit key, so the
    /// simulation loop and the capture thread observe the same terminal
    /// keystroke without signalling each other.
    pub(crate) fn spawn() -> Self {
        let cell = Arc::new(InputCell::default());
        let shared = Arc::clone(&cell);
        let handle = thread::spawn(move || capture_keys(&shared));
        Self { cell, handle }
    }

    /// Takes and decodes the most recent keystroke, leaving the cell empty.
    pub(crate) fn take_command(&self) -> Option<PlayerCommand> {
        self.cell.take().and_then(PlayerCommand::from_key)
    }

    /// Waits for the capture thread to observe the quit key and exit.
    pub(crate) fn join(self) {
        let _ = self.handle.join();
    }
}

fn capture_keys(cell: &InputCell) {
    loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(_) => {
                // A dead input stream ends the experience like a quit key.
                cell.publish(QUIT_KEY);
                break;
            }
        };

        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let KeyCode::Char(ch) = key.code {
                cell.publish(ch);
                if ch == QUIT_KEY {
                    break;
                }
            }
        }
    }
}
