//! Application state for the natural numbers viewer.
//!
//! This module contains:
//! - The display mode selector
//! - Input focus (editing the bound vs. browsing the result)
//! - Viewport and scroll state
//! - The complete application state and its transitions

use crate::generator::{self, GenerateError, NaturalNumbers, Statistics};

/// How the generated sequence is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Colored cells, one per number
    #[default]
    Grid,
    /// Comma separated text
    List,
    /// Count, sum, average, last value and the sum formula
    Statistics,
}

impl DisplayMode {
    /// All modes, in tab order.
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::Grid,
        DisplayMode::List,
        DisplayMode::Statistics,
    ];

    /// Label used on the mode tabs.
    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Grid => "Grid View",
            DisplayMode::List => "List View",
            DisplayMode::Statistics => "Statistics",
        }
    }

    /// The next mode in tab order (wraps around).
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Grid => DisplayMode::List,
            DisplayMode::List => DisplayMode::Statistics,
            DisplayMode::Statistics => DisplayMode::Grid,
        }
    }

    /// The previous mode in tab order (wraps around).
    pub fn previous(self) -> Self {
        match self {
            DisplayMode::Grid => DisplayMode::Statistics,
            DisplayMode::List => DisplayMode::Grid,
            DisplayMode::Statistics => DisplayMode::List,
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Grid => write!(f, "grid"),
            DisplayMode::List => write!(f, "list"),
            DisplayMode::Statistics => write!(f, "statistics"),
        }
    }
}

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing edits the N field
    #[default]
    Input,
    /// Single keys switch views and scroll
    Browse,
}

/// Size of the result panel, in terminal cells (inside borders).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Number of visible text rows
    pub visible_rows: usize,
    /// Number of visible columns
    pub visible_cols: usize,
}

impl Viewport {
    /// Creates a new viewport with the given dimensions.
    pub fn new(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            visible_rows,
            visible_cols,
        }
    }
}

/// The complete application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Raw text of the N field
    pub input: String,
    /// Most recently generated sequence (empty until the first success)
    pub numbers: NaturalNumbers,
    /// Selected display mode
    pub display_mode: DisplayMode,
    /// Validation error of the last generation attempt
    pub error: Option<GenerateError>,
    /// Current input focus
    pub focus: Focus,
    /// First visible line of the result panel
    pub scroll: usize,
    /// Result panel size
    pub viewport: Viewport,
    /// Total number of lines the current view needs
    content_lines: usize,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Whether the application should quit
    pub should_quit: bool,
}

impl AppState {
    /// Creates an empty state: no input, no sequence, grid mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with the input pre-filled and the display mode set.
    pub fn with_input(input: impl Into<String>, display_mode: DisplayMode) -> Self {
        Self {
            input: input.into(),
            display_mode,
            ..Self::default()
        }
    }

    /// Appends a character to the N field.
    pub fn input_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Removes the last character of the N field.
    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Clears the N field.
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Validates the current input and regenerates the sequence.
    ///
    /// The previous sequence and error are dropped first, so a failure
    /// always leaves an empty sequence.
    pub fn generate(&mut self) {
        self.error = None;
        self.numbers.clear();
        self.scroll = 0;

        match generator::generate(&self.input) {
            Ok(numbers) => {
                tracing::info!(count = numbers.len(), "generated sequence");
                self.numbers = numbers;
            }
            Err(err) => {
                tracing::warn!(input = %self.input, error = %err, "rejected input");
                self.error = Some(err);
            }
        }
    }

    /// Selects how the sequence is displayed.
    ///
    /// Leaves the sequence and the error untouched.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if self.display_mode != mode {
            tracing::debug!(from = %self.display_mode, to = %mode, "display mode changed");
            self.display_mode = mode;
            self.scroll = 0;
        }
    }

    /// Switches to the next display mode.
    pub fn cycle_display_mode(&mut self) {
        self.set_display_mode(self.display_mode.next());
    }

    /// Switches to the previous display mode.
    pub fn cycle_display_mode_back(&mut self) {
        self.set_display_mode(self.display_mode.previous());
    }

    /// Statistics of the current sequence, if one has been generated.
    pub fn statistics(&self) -> Option<Statistics> {
        Statistics::from_sequence(&self.numbers)
    }

    /// Whether the mode tabs and the result panel are shown.
    pub fn has_results(&self) -> bool {
        !self.numbers.is_empty()
    }

    /// Moves keystrokes to the N field.
    pub fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    /// Moves keystrokes to view navigation.
    pub fn focus_browse(&mut self) {
        self.focus = Focus::Browse;
    }

    /// Shows the help overlay.
    pub fn open_help(&mut self) {
        self.show_help = true;
    }

    /// Hides the help overlay.
    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }

    /// Updates the result panel size.
    pub fn update_viewport_size(&mut self, rows: usize, cols: usize) {
        self.viewport = Viewport::new(rows, cols);
        self.clamp_scroll();
    }

    /// Records how many lines the current view needs and re-clamps scroll.
    pub fn set_content_lines(&mut self, lines: usize) {
        self.content_lines = lines;
        self.clamp_scroll();
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> usize {
        self.content_lines.saturating_sub(self.viewport.visible_rows)
    }

    /// Scrolls up by one line.
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Scrolls down by one line.
    pub fn scroll_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll());
    }

    /// Scrolls up by one page.
    pub fn page_up(&mut self) {
        let page = self.viewport.visible_rows.max(1);
        self.scroll = self.scroll.saturating_sub(page);
    }

    /// Scrolls down by one page.
    pub fn page_down(&mut self) {
        let page = self.viewport.visible_rows.max(1);
        self.scroll = (self.scroll + page).min(self.max_scroll());
    }

    /// Jumps to the first line.
    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Jumps to the last page.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(input: &str) -> AppState {
        let mut state = AppState::with_input(input, DisplayMode::Grid);
        state.generate();
        state
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert!(state.numbers.is_empty());
        assert_eq!(state.display_mode, DisplayMode::Grid);
        assert_eq!(state.focus, Focus::Input);
        assert!(state.error.is_none());
        assert!(state.statistics().is_none());
        assert!(!state.has_results());
    }

    #[test]
    fn test_generate_success() {
        let state = state_with("5");
        assert_eq!(state.numbers.as_slice(), &[1, 2, 3, 4, 5]);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_failure_clears_sequence() {
        let mut state = state_with("5");
        state.input = "abc".to_string();
        state.generate();
        assert!(state.numbers.is_empty());
        assert_eq!(state.error, Some(GenerateError::NotANumber));
        assert!(state.statistics().is_none());
    }

    #[test]
    fn test_success_clears_error() {
        let mut state = state_with("1001");
        assert_eq!(state.error, Some(GenerateError::TooLarge));
        state.input = "2".to_string();
        state.generate();
        assert!(state.error.is_none());
        assert_eq!(state.numbers.len(), 2);
    }

    #[test]
    fn test_regenerate_replaces_sequence() {
        let mut state = state_with("10");
        state.input = "3".to_string();
        state.generate();
        assert_eq!(state.numbers.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_set_display_mode_keeps_data() {
        for input in ["", "7", "-1"] {
            let mut state = AppState::with_input(input, DisplayMode::Grid);
            if !input.is_empty() {
                state.generate();
            }
            let numbers = state.numbers.clone();
            let error = state.error;

            for mode in DisplayMode::ALL {
                state.set_display_mode(mode);
                state.set_display_mode(mode);
                assert_eq!(state.display_mode, mode);
                assert_eq!(state.numbers, numbers);
                assert_eq!(state.error, error);
            }
        }
    }

    #[test]
    fn test_cycle_display_mode() {
        let mut state = AppState::new();
        state.cycle_display_mode();
        assert_eq!(state.display_mode, DisplayMode::List);
        state.cycle_display_mode();
        assert_eq!(state.display_mode, DisplayMode::Statistics);
        state.cycle_display_mode();
        assert_eq!(state.display_mode, DisplayMode::Grid);
        state.cycle_display_mode_back();
        assert_eq!(state.display_mode, DisplayMode::Statistics);
    }

    #[test]
    fn test_input_editing() {
        let mut state = AppState::new();
        state.input_char('4');
        state.input_char('2');
        assert_eq!(state.input, "42");
        state.input_backspace();
        assert_eq!(state.input, "4");
        state.clear_input();
        assert!(state.input.is_empty());
        state.input_backspace();
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_scroll_clamping() {
        let mut state = state_with("1000");
        state.update_viewport_size(10, 60);
        state.set_content_lines(25);
        assert_eq!(state.max_scroll(), 15);

        state.scroll_up();
        assert_eq!(state.scroll, 0);

        state.page_down();
        assert_eq!(state.scroll, 10);
        state.page_down();
        assert_eq!(state.scroll, 15);
        state.scroll_down();
        assert_eq!(state.scroll, 15);

        state.set_content_lines(12);
        assert_eq!(state.scroll, 2);

        state.scroll_to_top();
        assert_eq!(state.scroll, 0);
        state.scroll_to_bottom();
        assert_eq!(state.scroll, 2);
    }

    #[test]
    fn test_generate_resets_scroll() {
        let mut state = state_with("1000");
        state.update_viewport_size(5, 60);
        state.set_content_lines(100);
        state.page_down();
        assert!(state.scroll > 0);
        state.generate();
        assert_eq!(state.scroll, 0);
    }
}
