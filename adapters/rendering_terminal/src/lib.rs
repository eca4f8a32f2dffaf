#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Crossterm-backed terminal renderer for Dungeon Chase.
//!
//! The backend owns the terminal for its whole lifetime: raw mode and the
//! alternate screen are entered on construction and restored on drop, so a
//! panicking simulation still hands the user their shell back. Frames are
//! queued into a buffered writer and flushed once, which keeps a full-grid
//! redraw flicker-free at the simulation's tick rate.

use std::io::{self, BufWriter, Stdout, Write};

use anyhow::{Context, Result as AnyResult};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use dungeon_chase_rendering::{RenderingBackend, Scene, Tint};

/// Terminal renderer presenting scenes as colored glyph rows.
#[derive(Debug)]
pub struct TerminalBackend {
    out: BufWriter<Stdout>,
}

impl TerminalBackend {
    /// Claims the terminal: raw mode, alternate screen, hidden cursor.
    pub fn new() -> AnyResult<Self> {
        terminal::enable_raw_mode().context("failed to enable raw terminal mode")?;
        let mut out = BufWriter::new(io::stdout());
        execute!(out, EnterAlternateScreen, Hide)
            .context("failed to enter the alternate screen")?;
        Ok(Self { out })
    }
}

impl RenderingBackend for TerminalBackend {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;

        let mut row_index = 0u16;
        for row in scene.rows() {
            queue!(self.out, MoveTo(0, row_index))?;
            for glyph in row {
                queue!(
                    self.out,
                    SetForegroundColor(foreground_for(glyph.tint)),
                    Print(glyph.symbol)
                )?;
            }
            row_index = row_index.saturating_add(1);
        }

        queue!(
            self.out,
            ResetColor,
            MoveTo(0, row_index.saturating_add(1)),
            Print(format!("keys: {}  gold: {}", scene.keys(), scene.gold()))
        )?;

        self.out
            .flush()
            .context("failed to flush the frame to the terminal")?;
        Ok(())
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Foreground color for each presentation class.
///
/// Transcribed from the ANSI scheme of the original experience: a yellow
/// player hunted by red enemies through white walls and green trees.
const fn foreground_for(tint: Tint) -> Color {
    match tint {
        Tint::Player => Color::Yellow,
        Tint::Enemy => Color::Red,
        Tint::Floor => Color::DarkGrey,
        Tint::Wall => Color::White,
        Tint::Tree => Color::Green,
        Tint::Door => Color::Magenta,
        Tint::Key => Color::Cyan,
        Tint::Gold => Color::DarkYellow,
    }
}
