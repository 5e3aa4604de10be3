use super::app::App;
use super::helpers::{highlight_functions, wrap_text};
use crate::render_help::render_help;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use shuntcalc::calc_engine::{format_number, format_with_spaces};
use shuntcalc::history::Calculation;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const TICK: Duration = Duration::from_millis(50);
const WHEEL_STEP: isize = 3;
const DETAIL_INDENT: &str = "    ";

const KEY_HINTS: [(&str, &str); 5] = [
    ("Enter", "calculate"),
    ("↑/↓", "recall"),
    ("PgUp/PgDn", "page"),
    ("F1", "help"),
    ("Ctrl+C", "quit"),
];

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| draw(frame, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.handle_key(key.code, key.modifiers)
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => app.scroll_by(-WHEEL_STEP),
                MouseEventKind::ScrollDown => app.scroll_by(WHEEL_STEP),
                _ => {}
            },
            _ => {}
        }
    }
    Ok(())
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn draw(frame: &mut Frame, app: &mut App) {
    if app.show_help {
        render_help(frame, app);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(frame.size());

    input_panel(frame, app, rows[0]);
    status_bar(frame, app, rows[1]);
    history_panel(frame, app, rows[2]);
}

fn input_panel(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(dim())
        .title(" Expression ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // prompt plus one spare column for the cursor at end of line
    let width = (inner.width as usize).saturating_sub(3);
    app.adjust_input_scroll(width);

    let visible: String = app.input.chars().skip(app.input_scroll).take(width).collect();
    let prompt = if app.input_scroll > 0 { "< " } else { "> " };
    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::Green)),
        Span::raw(visible.clone()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);

    let before_cursor: String = visible
        .chars()
        .take(app.cursor_position.saturating_sub(app.input_scroll))
        .collect();
    frame.set_cursor(inner.x + (prompt.len() + before_cursor.width()) as u16, inner.y);
}

fn status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(
            KEY_HINTS
                .iter()
                .flat_map(|(key, action)| {
                    [
                        Span::styled(*key, Style::default().fg(Color::Yellow)),
                        Span::styled(format!(" {}  ", action), dim()),
                    ]
                })
                .collect::<Vec<_>>(),
        ),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Lines shown for one history entry: the numbered expression with its
/// value or error, then RPN, steps and timing for detailed entries.
fn calculation_lines(entry: &Calculation, width: usize, selected: bool) -> Vec<Line<'static>> {
    let expression_style = Style::default().fg(if selected { Color::Yellow } else { Color::Cyan });
    let label = format!("#{} ", entry.id);

    let mut chunks = wrap_text(
        &format_with_spaces(&entry.expression),
        width.saturating_sub(label.len()),
    );
    if chunks.is_empty() {
        chunks.push(String::new());
    }

    let mut lines: Vec<Line<'static>> = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let lead = if i == 0 {
                Span::styled(label.clone(), dim())
            } else {
                Span::raw(" ".repeat(label.len()))
            };
            let mut spans = vec![lead];
            spans.extend(highlight_functions(chunk, expression_style));
            Line::from(spans)
        })
        .collect();

    let outcome = match &entry.result {
        Ok(value) => Span::styled(
            format_number(*value),
            Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
        ),
        Err(e) => Span::styled(
            format!("Error: {}", e),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };
    if let Some(last) = lines.last_mut() {
        last.spans.push(Span::styled(" = ", Style::default().fg(Color::Gray)));
        last.spans.push(outcome);
    }

    if !entry.detailed_mode {
        return lines;
    }

    let mut details = Vec::new();
    if let Some(postfix) = &entry.postfix {
        details.push((format!("RPN: {}", postfix), Color::Blue));
    }
    for (n, step) in entry.detailed_steps.iter().enumerate() {
        details.push((
            format!("Step {}: {} = {}", n + 1, step.operation, format_number(step.result)),
            Color::DarkGray,
        ));
    }
    details.push((
        format!("Time: {:.6} ms", entry.duration.as_secs_f64() * 1000.0),
        Color::Magenta,
    ));

    for (text, color) in details {
        for chunk in wrap_text(&text, width.saturating_sub(DETAIL_INDENT.len())) {
            lines.push(Line::from(Span::styled(
                format!("{}{}", DETAIL_INDENT, chunk),
                Style::default().fg(color),
            )));
        }
    }
    lines
}

fn history_panel(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(dim())
        .title(format!(" History ({}) ", app.history.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.list_height = inner.height as usize;

    if app.history.is_empty() {
        let hint = Paragraph::new("Type an expression and press Enter. Results appear here.")
            .style(dim())
            .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return;
    }

    let width = inner.width as usize;
    let mut items = Vec::new();
    app.item_start_indices.clear();

    for (i, entry) in app.history.entries().iter().enumerate() {
        if i > 0 {
            items.push(ListItem::new(Line::from(Span::styled("─".repeat(width), dim()))));
        }
        app.item_start_indices.push(items.len());
        items.extend(
            calculation_lines(entry, width, i == app.cursor_history)
                .into_iter()
                .map(ListItem::new),
        );
    }

    if app.scroll_to_bottom {
        app.history_scroll = items.len().saturating_sub(app.list_height);
        app.scroll_to_bottom = false;
    }
    app.history_scroll = app.history_scroll.min(items.len().saturating_sub(1));

    let mut state = ListState::default()
        .with_selected(app.item_start_indices.get(app.cursor_history).copied())
        .with_offset(app.history_scroll);
    let list = List::new(items).highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, inner, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shuntcalc::history::History;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn plain_entry_is_one_line() {
        let mut history = History::new();
        let entry = history.record("2*(3+4)", false);
        assert_eq!(text(&calculation_lines(entry, 40, false)), vec!["#1 2 * (3 + 4) = 14"]);
    }

    #[test]
    fn detailed_entry_lists_rpn_and_steps() {
        let mut history = History::new();
        let entry = history.record("2 ^ 3 ^ 2", true);
        let lines = text(&calculation_lines(entry, 40, false));

        assert_eq!(
            lines[..4].to_vec(),
            vec![
                "#1 2 ^ 3 ^ 2 = 512",
                "    RPN: 2 3 2 ^ ^",
                "    Step 1: 3 ^ 2 = 9",
                "    Step 2: 2 ^ 9 = 512",
            ]
        );
        assert_eq!(lines.len(), 5);
        assert!(lines[4].starts_with("    Time: "));
    }

    #[test]
    fn failed_entry_shows_error_once() {
        let mut history = History::new();
        for detailed in [false, true] {
            let entry = history.record("5 / 0", detailed);
            let lines = text(&calculation_lines(entry, 60, false));
            let mentions = lines
                .iter()
                .filter(|line| line.contains("Division by zero is not allowed"))
                .count();
            assert_eq!(mentions, 1);
            assert!(lines[0].ends_with("= Error: Division by zero is not allowed"));
        }
    }

    #[test]
    fn long_expressions_wrap_under_the_label() {
        let mut history = History::new();
        let entry = history.record("1 + 2 + 3 + 4", false);
        assert_eq!(
            text(&calculation_lines(entry, 9, false)),
            vec!["#1 1 + 2", "   + 3 +", "   4 = 10"]
        );
    }
}
