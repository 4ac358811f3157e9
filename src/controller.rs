//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - Viewport and scroll bookkeeping
//! - Rendering

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::event::{apply_action, handle_event, poll_event};
use crate::model::AppState;
use crate::ui::glyphs::Glyphs;
use crate::ui::{calculate_visible_dimensions, content_lines, render};

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Symbols used for rendering
    glyphs: Glyphs,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state.
    pub fn new(state: AppState, glyphs: Glyphs) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            glyphs,
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("starting interactive session");

        loop {
            // Panel size depends on the state (error box, tabs), so recompute each pass
            self.sync_viewport()?;

            self.terminal.draw(|frame| {
                render(frame, &self.state, &self.glyphs);
            })?;

            if let Some(event) = poll_event(self.tick_rate) {
                let action = handle_event(event, self.state.focus, self.state.show_help);
                tracing::trace!(?action, "key action");

                if !apply_action(&mut self.state, action) {
                    break;
                }
            }
        }

        tracing::info!("leaving interactive session");
        Ok(())
    }

    /// Updates the viewport size and content height from the terminal.
    fn sync_viewport(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let (visible_rows, visible_cols) = calculate_visible_dimensions(area, &self.state);
        self.state.update_viewport_size(visible_rows, visible_cols);
        let lines = content_lines(&self.state, &self.glyphs);
        self.state.set_content_lines(lines);
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Convenience function to run the interactive viewer.
///
/// When the state already holds input (given on the command line) it is
/// generated before the first frame.
pub fn run_app(mut state: AppState, glyphs: Glyphs) -> Result<()> {
    if !state.input.is_empty() {
        state.generate();
    }
    let mut app = App::new(state, glyphs)?;
    app.run()
}
