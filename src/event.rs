//! Keyboard event handling.
//!
//! Keys are interpreted according to the current focus.
//!
//! Input focus (default):
//! - any printable character: edit N
//! - `Backspace`: delete last character
//! - `Ctrl+U`: clear the field
//! - `Enter`: generate
//! - `Esc`: switch to browse focus
//!
//! Browse focus:
//! - `g`/`1`, `l`/`2`, `s`/`3`: grid, list, statistics
//! - `j`/`k` or arrows: scroll one line
//! - `PageUp`/`PageDown`, `Home`/`End`: scroll by page / to the ends
//! - `i` or `/`: back to the N field
//! - `Enter`: generate again
//! - `?`: help
//! - `q`: quit
//!
//! Everywhere: `Tab`/`Shift+Tab` cycle views, `F1`-`F3` select a view,
//! `Ctrl+C` quits.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::model::{AppState, DisplayMode, Focus};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Add character to the N field
    InputChar(char),
    /// Backspace in the N field
    InputBackspace,
    /// Clear the N field
    ClearInput,
    /// Validate the N field and generate
    Generate,
    /// Select a display mode
    SetDisplayMode(DisplayMode),
    /// Next display mode (Tab)
    NextDisplayMode,
    /// Previous display mode (Shift+Tab)
    PreviousDisplayMode,
    /// Give focus to the N field
    FocusInput,
    /// Give focus to view navigation
    FocusBrowse,
    /// Scroll one line up
    ScrollUp,
    /// Scroll one line down
    ScrollDown,
    /// Scroll one page up
    PageUp,
    /// Scroll one page down
    PageDown,
    /// Jump to the top of the view
    ScrollTop,
    /// Jump to the bottom of the view
    ScrollBottom,
    /// Show the help overlay
    ShowHelp,
    /// Dismiss the help overlay
    DismissHelp,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for terminal events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on current focus.
pub fn handle_event(event: Event, focus: Focus, show_help: bool) -> Action {
    match event {
        // Ignore key release events (Windows reports both)
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            handle_key_event(key_event, focus, show_help)
        }
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event based on the current focus.
fn handle_key_event(key: KeyEvent, focus: Focus, show_help: bool) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // If help is shown, any key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    match key.code {
        KeyCode::Tab => return Action::NextDisplayMode,
        KeyCode::BackTab => return Action::PreviousDisplayMode,
        KeyCode::F(1) => return Action::SetDisplayMode(DisplayMode::Grid),
        KeyCode::F(2) => return Action::SetDisplayMode(DisplayMode::List),
        KeyCode::F(3) => return Action::SetDisplayMode(DisplayMode::Statistics),
        _ => {}
    }

    match focus {
        Focus::Input => handle_input_focus(key),
        Focus::Browse => handle_browse_focus(key),
    }
}

/// Handles key events while the N field has focus.
fn handle_input_focus(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('u') => Action::ClearInput,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Enter => Action::Generate,
        KeyCode::Esc => Action::FocusBrowse,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Char(c) => Action::InputChar(c),
        // Let the arrows scroll the result even while typing
        KeyCode::Up => Action::ScrollUp,
        KeyCode::Down => Action::ScrollDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        _ => Action::None,
    }
}

/// Handles key events while browsing the result.
fn handle_browse_focus(key: KeyEvent) -> Action {
    match key.code {
        // View selection
        KeyCode::Char('g') | KeyCode::Char('1') => Action::SetDisplayMode(DisplayMode::Grid),
        KeyCode::Char('l') | KeyCode::Char('2') => Action::SetDisplayMode(DisplayMode::List),
        KeyCode::Char('s') | KeyCode::Char('3') => {
            Action::SetDisplayMode(DisplayMode::Statistics)
        }

        // Vim-style scrolling
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home => Action::ScrollTop,
        KeyCode::End | KeyCode::Char('G') => Action::ScrollBottom,

        // Back to editing
        KeyCode::Char('i') | KeyCode::Char('/') => Action::FocusInput,
        KeyCode::Enter => Action::Generate,

        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char('q') => Action::Quit,

        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::InputChar(c) => {
            state.input_char(c);
        }
        Action::InputBackspace => {
            state.input_backspace();
        }
        Action::ClearInput => {
            state.clear_input();
        }
        Action::Generate => {
            state.generate();
        }
        Action::SetDisplayMode(mode) => {
            state.set_display_mode(mode);
        }
        Action::NextDisplayMode => {
            state.cycle_display_mode();
        }
        Action::PreviousDisplayMode => {
            state.cycle_display_mode_back();
        }
        Action::FocusInput => {
            state.focus_input();
        }
        Action::FocusBrowse => {
            state.focus_browse();
        }
        Action::ScrollUp => {
            state.scroll_up();
        }
        Action::ScrollDown => {
            state.scroll_down();
        }
        Action::PageUp => {
            state.page_up();
        }
        Action::PageDown => {
            state.page_down();
        }
        Action::ScrollTop => {
            state.scroll_to_top();
        }
        Action::ScrollBottom => {
            state.scroll_to_bottom();
        }
        Action::ShowHelp => {
            state.open_help();
        }
        Action::DismissHelp => {
            state.dismiss_help();
        }
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }

    !state.should_quit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_input_focus_typing() {
        let focus = Focus::Input;
        assert_eq!(handle_key_event(key(KeyCode::Char('4')), focus, false), Action::InputChar('4'));
        // Letters are text while typing, not view shortcuts
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), focus, false), Action::InputChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), focus, false), Action::InputChar('g'));
        assert_eq!(handle_key_event(key(KeyCode::Backspace), focus, false), Action::InputBackspace);
        assert_eq!(handle_key_event(key(KeyCode::Enter), focus, false), Action::Generate);
        assert_eq!(handle_key_event(key(KeyCode::Esc), focus, false), Action::FocusBrowse);

        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_u, focus, false), Action::ClearInput);
    }

    #[test]
    fn test_browse_focus_keys() {
        let focus = Focus::Browse;
        assert_eq!(
            handle_key_event(key(KeyCode::Char('g')), focus, false),
            Action::SetDisplayMode(DisplayMode::Grid)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('2')), focus, false),
            Action::SetDisplayMode(DisplayMode::List)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('s')), focus, false),
            Action::SetDisplayMode(DisplayMode::Statistics)
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), focus, false), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('k')), focus, false), Action::ScrollUp);
        assert_eq!(handle_key_event(key(KeyCode::Home), focus, false), Action::ScrollTop);
        assert_eq!(handle_key_event(key(KeyCode::End), focus, false), Action::ScrollBottom);
        assert_eq!(handle_key_event(key(KeyCode::Char('i')), focus, false), Action::FocusInput);
        assert_eq!(handle_key_event(key(KeyCode::Char('?')), focus, false), Action::ShowHelp);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), focus, false), Action::Quit);
    }

    #[test]
    fn test_global_keys() {
        for focus in [Focus::Input, Focus::Browse] {
            assert_eq!(handle_key_event(key(KeyCode::Tab), focus, false), Action::NextDisplayMode);
            assert_eq!(
                handle_key_event(key(KeyCode::BackTab), focus, false),
                Action::PreviousDisplayMode
            );
            assert_eq!(
                handle_key_event(key(KeyCode::F(3)), focus, false),
                Action::SetDisplayMode(DisplayMode::Statistics)
            );
        }
    }

    #[test]
    fn test_ctrl_c_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key, Focus::Input, false), Action::Quit);
        assert_eq!(handle_key_event(key, Focus::Browse, true), Action::Quit);
    }

    #[test]
    fn test_dismiss_help() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('x')), Focus::Browse, true),
            Action::DismissHelp
        );
        assert_eq!(handle_key_event(key(KeyCode::Esc), Focus::Input, true), Action::DismissHelp);
    }

    #[test]
    fn test_typing_then_enter_generates() {
        let mut state = AppState::new();
        for code in [KeyCode::Char('1'), KeyCode::Char('2'), KeyCode::Enter] {
            let action = handle_key_event(key(code), state.focus, false);
            apply_action(&mut state, action);
        }
        assert_eq!(state.numbers.len(), 12);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_apply_quit() {
        let mut state = AppState::new();
        assert!(apply_action(&mut state, Action::None));
        assert!(!apply_action(&mut state, Action::Quit));
        assert!(state.should_quit);
    }

    #[test]
    fn test_apply_display_mode_and_focus() {
        let mut state = AppState::new();
        apply_action(&mut state, Action::FocusBrowse);
        assert_eq!(state.focus, Focus::Browse);
        apply_action(&mut state, Action::SetDisplayMode(DisplayMode::List));
        assert_eq!(state.display_mode, DisplayMode::List);
        apply_action(&mut state, Action::NextDisplayMode);
        assert_eq!(state.display_mode, DisplayMode::Statistics);
        apply_action(&mut state, Action::ShowHelp);
        assert!(state.show_help);
        apply_action(&mut state, Action::DismissHelp);
        assert!(!state.show_help);
    }
}
