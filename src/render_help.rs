use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui_mode::app::App;

fn heading(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn render_help(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" ShuntCalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let help_text = vec![
        Line::from(Span::styled("ShuntCalc - Terminal Expression Calculator", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
        Line::from(""),
        heading("Operators (highest precedence last):"),
        Line::from("  + : Addition        (e.g., 5 + 3 = 8)"),
        Line::from("  - : Subtraction     (e.g., 10 - 4 = 6)"),
        Line::from("  * : Multiplication  (e.g., 6 * 7 = 42)"),
        Line::from("  / : Division        (e.g., 15 / 3 = 5)"),
        Line::from("  ^ : Exponentiation  (e.g., 2 ^ 3 ^ 2 = 512, groups right to left)"),
        Line::from(""),
        heading("Numbers:"),
        Line::from("  Decimal literals: 42, 2.5, .5"),
        Line::from("  Negative literals after an operator or '(': 2 * -3, 5 * (-2)"),
        Line::from(""),
        heading("Functions:"),
        Line::from("  sqrt(x) : Square root (x >= 0)"),
        Line::from(""),
        heading("Commands:"),
        Line::from("  details <expression> : Show postfix form, steps and time"),
        Line::from("  delete <id>          : Remove one calculation from history"),
        Line::from("  clear                : Clear calculation history"),
        Line::from("  help                 : Show this help screen"),
        Line::from("  quit                 : Exit the calculator"),
        Line::from("  Ctrl+U               : Clear current input"),
        Line::from("  Ctrl+C               : Exit without typing quit"),
        Line::from(""),
        heading("Navigation:"),
        Line::from("  ← → : Move cursor left/right"),
        Line::from("  Ctrl+←/→ : Move cursor by words"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  ↑ ↓ : Navigate calculation history"),
        Line::from("  PgUp/PgDn : Page through history"),
        Line::from("  Mouse wheel : Scroll through history"),
        Line::from(""),
        heading("Examples:"),
        Line::from("  2 + 4 * 6"),
        Line::from("  sqrt(9 + 16)"),
        Line::from("  details sqrt((((9*9)/12)+(13-4))*2)^2"),
        Line::from("  1 + 2 + 3 + 4 * 5 * 6 - 7 - 8 / 9"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
