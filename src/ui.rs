//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Title, N field and validation error
//! - Display mode tabs
//! - Grid, list and statistics views of the sequence
//! - Status bar with focus and key hints
//! - Help overlay
//!
//! Views are built as plain `Line`s so that the controller can measure
//! their height (for scroll clamping) with the same code that draws them.

pub mod glyphs;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::generator::{cell_color_index, format_list, NaturalNumbers, Statistics, PALETTE_SIZE};
use crate::model::{AppState, DisplayMode, Focus};
use glyphs::Glyphs;

/// Height of the title block (title + subtitle).
const TITLE_HEIGHT: u16 = 2;
/// Height of the bordered N field.
const INPUT_HEIGHT: u16 = 3;
/// Height of the bordered error box.
const ERROR_HEIGHT: u16 = 3;
/// Height of the mode tabs.
const TABS_HEIGHT: u16 = 1;
/// Height of the footnote under the result panel.
const FOOTNOTE_HEIGHT: u16 = 1;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;
/// Width of a grid cell label (fits "1000" with padding).
const CELL_LABEL_WIDTH: usize = 5;
/// Width of a grid cell including the gap after it.
pub const CELL_WIDTH: usize = CELL_LABEL_WIDTH + 1;
/// Width of a statistics card (label + value, with padding).
const STAT_CARD_WIDTH: usize = 25;

const ACCENT: Color = Color::Rgb(0x66, 0x7e, 0xea);

/// Grid cell colors, indexed by `n % 12`.
const PALETTE: [Color; PALETTE_SIZE] = [
    Color::Rgb(0x66, 0x7e, 0xea),
    Color::Rgb(0x76, 0x4b, 0xa2),
    Color::Rgb(0xf0, 0x93, 0xfb),
    Color::Rgb(0xf5, 0x57, 0x6c),
    Color::Rgb(0x4f, 0xac, 0xfe),
    Color::Rgb(0x00, 0xf2, 0xfe),
    Color::Rgb(0x43, 0xe9, 0x7b),
    Color::Rgb(0x38, 0xf9, 0xd7),
    Color::Rgb(0xfa, 0x70, 0x9a),
    Color::Rgb(0xfe, 0xe1, 0x40),
    Color::Rgb(0xa8, 0xed, 0xea),
    Color::Rgb(0xfe, 0xd6, 0xe3),
];

/// Background color of the grid cell for `n`.
pub fn cell_color(n: u32) -> Color {
    PALETTE[cell_color_index(n)]
}

/// Screen regions for the current state.
struct Regions {
    title: Rect,
    input: Rect,
    error: Option<Rect>,
    tabs: Option<Rect>,
    result: Option<Rect>,
    footnote: Option<Rect>,
    status: Rect,
}

fn split_regions(area: Rect, state: &AppState) -> Regions {
    let has_error = state.error.is_some();
    let has_results = state.has_results();

    let mut constraints = vec![
        Constraint::Length(TITLE_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
    ];
    if has_error {
        constraints.push(Constraint::Length(ERROR_HEIGHT));
    }
    if has_results {
        constraints.push(Constraint::Length(TABS_HEIGHT));
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(FOOTNOTE_HEIGHT));
    } else {
        constraints.push(Constraint::Min(0));
    }
    constraints.push(Constraint::Length(STATUS_BAR_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 2;
    let error = has_error.then(|| {
        next += 1;
        chunks[next - 1]
    });
    let (tabs, result, footnote) = if has_results {
        next += 3;
        (
            Some(chunks[next - 3]),
            Some(chunks[next - 2]),
            Some(chunks[next - 1]),
        )
    } else {
        (None, None, None)
    };

    Regions {
        title: chunks[0],
        input: chunks[1],
        error,
        tabs,
        result,
        footnote,
        status: chunks[chunks.len() - 1],
    }
}

/// Inner size (rows, cols) of the result panel, or `(0, 0)` when hidden.
pub fn calculate_visible_dimensions(area: Rect, state: &AppState) -> (usize, usize) {
    match split_regions(area, state).result {
        Some(result) => (
            result.height.saturating_sub(2) as usize,
            result.width.saturating_sub(2) as usize,
        ),
        None => (0, 0),
    }
}

/// Number of lines the current view needs at the current viewport width.
pub fn content_lines(state: &AppState, glyphs: &Glyphs) -> usize {
    view_lines(state, state.viewport.visible_cols, glyphs).len()
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState, glyphs: &Glyphs) {
    let regions = split_regions(frame.area(), state);

    render_title(frame, regions.title);
    render_input(frame, state, glyphs, regions.input);
    if let Some(area) = regions.error {
        render_error(frame, state, area);
    }
    if let Some(area) = regions.tabs {
        render_tabs(frame, state, area);
    }
    if let Some(area) = regions.result {
        render_result_panel(frame, state, glyphs, area);
    }
    if let Some(area) = regions.footnote {
        render_footnote(frame, area);
    }
    render_status_bar(frame, state, regions.status);

    if state.show_help {
        render_help(frame, glyphs);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Natural Numbers Generator",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Display the first N natural numbers",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_input(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let focused = state.focus == Focus::Input;
    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = Vec::new();
    if state.input.is_empty() && !focused {
        spans.push(Span::styled(
            "Enter N (max 1000)",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(state.input.clone()));
    }
    if focused {
        spans.push(Span::styled(glyphs.cursor, Style::default().fg(ACCENT)));
        if state.input.is_empty() {
            spans.push(Span::styled(
                " Enter N (max 1000)",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" N  [Enter: Generate] ");
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_error(frame: &mut Frame, state: &AppState, area: Rect) {
    let message = state.error.map(|e| e.to_string()).unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, state: &AppState, area: Rect) {
    let titles: Vec<Line> = DisplayMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| Line::from(format!(" {} {} ", i + 1, mode.label())))
        .collect();
    let selected = DisplayMode::ALL
        .iter()
        .position(|mode| *mode == state.display_mode)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(ACCENT))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_result_panel(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let width = area.width.saturating_sub(2) as usize;
    let lines = view_lines(state, width, glyphs);

    let mut title = format!(" {} ", state.display_mode.label());
    let max_scroll = state.max_scroll();
    if max_scroll > 0 {
        let up = if state.scroll > 0 { glyphs.arrow_up } else { " " };
        let down = if state.scroll < max_scroll { glyphs.arrow_down } else { " " };
        title.push_str(&format!("[{}{} {}/{}] ", up, down, state.scroll + 1, max_scroll + 1));
    }

    let block = Block::default().borders(Borders::ALL).title(title);
    let scroll = u16::try_from(state.scroll).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Builds the lines of the selected view for a panel `width` columns wide.
pub fn view_lines(state: &AppState, width: usize, glyphs: &Glyphs) -> Vec<Line<'static>> {
    match state.display_mode {
        DisplayMode::Grid => grid_lines(&state.numbers, width),
        DisplayMode::List => list_lines(&state.numbers, width),
        DisplayMode::Statistics => match state.statistics() {
            Some(stats) => statistics_lines(&stats, glyphs),
            None => Vec::new(),
        },
    }
}

fn heading(text: String) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
}

fn grid_lines(numbers: &NaturalNumbers, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading(format!("First {} Natural Numbers:", numbers.len())),
        Line::default(),
    ];

    let per_row = (width / CELL_WIDTH).max(1);
    for row in numbers.as_slice().chunks(per_row) {
        let mut spans = Vec::with_capacity(row.len() * 2);
        for &n in row {
            spans.push(Span::styled(
                format!("{:^width$}", n, width = CELL_LABEL_WIDTH),
                Style::default()
                    .fg(Color::White)
                    .bg(cell_color(n))
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn list_lines(numbers: &NaturalNumbers, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![heading("List Format:".to_string()), Line::default()];
    let text = format_list(numbers);
    lines.extend(
        textwrap::wrap(&text, width.max(1))
            .into_iter()
            .map(|part| Line::from(part.into_owned())),
    );
    lines
}

fn statistics_lines(stats: &Statistics, glyphs: &Glyphs) -> Vec<Line<'static>> {
    let card = |label: &str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(
                format!(" {:<12}", label),
                Style::default().fg(Color::White).bg(color),
            ),
            Span::styled(
                format!(" {:>10} ", value),
                Style::default()
                    .fg(Color::White)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    };

    let mut lines = vec![
        heading("Statistics:".to_string()),
        Line::default(),
        card("Count", stats.count.to_string(), PALETTE[0]),
        card("Sum", stats.sum.to_string(), PALETTE[3]),
        card("Average", stats.average_display(), PALETTE[4]),
        card("Last Number", stats.last.to_string(), PALETTE[6]),
        Line::from(Span::styled(
            glyphs.h_separator.repeat(STAT_CARD_WIDTH),
            Style::default().fg(Color::DarkGray),
        )),
        heading("Formula for Sum:".to_string()),
    ];
    lines.extend(
        stats
            .formula_lines(glyphs.times)
            .into_iter()
            .map(|text| Line::from(format!("  {text}"))),
    );
    lines
}

fn render_footnote(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("Natural Numbers: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("Positive integers starting from 1, 2, 3, 4, 5, ..."),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (focus_str, hints) = match state.focus {
        Focus::Input => ("INPUT", "Enter: generate | Esc: browse | Tab: view | Ctrl+C: quit"),
        Focus::Browse => ("BROWSE", "g/l/s: view | j/k: scroll | i: edit | ?: help | q: quit"),
    };

    let left_content = format!(" {} | {} ", focus_str, hints);
    let right_content = if state.has_results() {
        format!("N = {} ", state.numbers.len())
    } else {
        String::new()
    };

    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(left_content, Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + right_content.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            right_content,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

fn render_help(frame: &mut Frame, glyphs: &Glyphs) {
    let entries = [
        ("Enter", "Generate 1..N from the N field"),
        ("Esc", "Leave the N field (browse)"),
        ("i or /", "Back to the N field"),
        ("Ctrl+U", "Clear the N field"),
        ("Tab / S-Tab", "Next / previous view"),
        ("g l s, F1-F3", "Grid, list, statistics"),
        ("j k, arrows", "Scroll one line"),
        ("PgUp PgDn", "Scroll one page"),
        ("Home End", "Top / bottom"),
        ("q, Ctrl+C", "Quit"),
    ];

    let mut lines = vec![Line::default()];
    lines.extend(entries.iter().map(|(keys, text)| {
        Line::from(vec![
            Span::raw(format!(" {} ", glyphs.bullet)),
            Span::styled(
                format!("{:<14}", keys),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw(*text),
        ])
    }));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        " Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));

    let height = lines.len() as u16 + 2;
    let area = centered_rect(50, height, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(ACCENT));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// A rectangle of the given size centered in `area` (clipped to it).
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::generator::GenerateError;

    fn draw(state: &AppState, width: u16, height: u16) -> String {
        let glyphs = glyphs::select(false);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state, &glyphs)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn generated(input: &str, mode: DisplayMode) -> AppState {
        let mut state = AppState::with_input(input, mode);
        state.generate();
        state
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(cell_color(1), Color::Rgb(0x76, 0x4b, 0xa2));
        assert_eq!(cell_color(12), cell_color(24));
    }

    #[test]
    fn test_grid_lines_wrap_at_width() {
        let numbers = NaturalNumbers::up_to(10).unwrap();
        // 4 cells per row at width 24
        let lines = grid_lines(&numbers, 24);
        assert_eq!(lines.len(), 2 + 3);
        // Narrow panels still show one cell per row
        let lines = grid_lines(&numbers, 3);
        assert_eq!(lines.len(), 2 + 10);
    }

    #[test]
    fn test_list_lines_wrap() {
        let numbers = NaturalNumbers::up_to(20).unwrap();
        let lines = list_lines(&numbers, 20);
        assert!(lines.len() > 3);
        let joined: String = lines[2..]
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        assert!(joined.starts_with("1, 2, 3"));
        assert!(joined.ends_with("19, 20"));
    }

    #[test]
    fn test_statistics_view_empty_without_sequence() {
        let state = AppState::with_input("", DisplayMode::Statistics);
        assert!(view_lines(&state, 40, &glyphs::select(false)).is_empty());
    }

    #[test]
    fn test_render_statistics() {
        let state = generated("3", DisplayMode::Statistics);
        let screen = draw(&state, 80, 30);
        assert!(screen.contains("Natural Numbers Generator"));
        assert!(screen.contains("Count"));
        assert!(screen.contains("2.00"));
        assert!(screen.contains("Sum = n x (n + 1) / 2"));
        assert!(screen.contains("Sum = 3 x 4 / 2 = 6"));
    }

    #[test]
    fn test_statistics_rule_uses_glyphs() {
        let stats = Statistics::from_sequence(&NaturalNumbers::up_to(4).unwrap()).unwrap();

        let ascii = statistics_lines(&stats, &glyphs::select(false));
        let rule = ascii[6].to_string();
        assert_eq!(rule, "-".repeat(STAT_CARD_WIDTH));
        assert_eq!(ascii[2].to_string().chars().count(), STAT_CARD_WIDTH);

        let fancy = statistics_lines(&stats, &glyphs::select(true));
        assert_eq!(fancy[6].to_string(), "─".repeat(STAT_CARD_WIDTH));
    }

    #[test]
    fn test_render_grid_and_list() {
        let state = generated("5", DisplayMode::Grid);
        let screen = draw(&state, 80, 30);
        assert!(screen.contains("First 5 Natural Numbers:"));

        let state = generated("5", DisplayMode::List);
        let screen = draw(&state, 80, 30);
        assert!(screen.contains("1, 2, 3, 4, 5"));
    }

    #[test]
    fn test_render_error_hides_views() {
        let state = generated("0", DisplayMode::Grid);
        assert_eq!(state.error, Some(GenerateError::NonPositive));
        let screen = draw(&state, 80, 30);
        assert!(screen.contains("Please enter a positive number"));
        assert!(!screen.contains("Grid View"));
    }

    #[test]
    fn test_render_help_overlay() {
        let mut state = AppState::new();
        state.open_help();
        let screen = draw(&state, 80, 30);
        assert!(screen.contains("Press any key to close"));
    }

    #[test]
    fn test_visible_dimensions() {
        let area = Rect::new(0, 0, 80, 30);
        assert_eq!(calculate_visible_dimensions(area, &AppState::new()), (0, 0));

        let state = generated("10", DisplayMode::Grid);
        // 30 - title(2) - input(3) - tabs(1) - footnote(1) - status(1) = 22, minus borders
        assert_eq!(calculate_visible_dimensions(area, &state), (20, 78));
    }
}
