use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use shuntcalc::calc_engine::{Function, Operator};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec!["".to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            let mut remaining = word;
            while !remaining.is_empty() {
                let mut chunk = String::new();
                let mut chunk_width = 0;
                let mut chunk_byte_len = 0;

                for c in remaining.chars() {
                    let char_width = UnicodeWidthChar::width_cjk(c).unwrap_or(1);
                    if chunk_width + char_width > width {
                        break;
                    }
                    chunk.push(c);
                    chunk_width += char_width;
                    chunk_byte_len += c.len_utf8();
                }

                if !current_line.is_empty() {
                    lines.push(current_line.trim().to_string());
                    current_line.clear();
                    current_width = 0;
                }

                lines.push(chunk);
                remaining = &remaining[chunk_byte_len..];
            }
            continue;
        }

        if current_width + word_width + 1 > width && !current_line.is_empty() {
            lines.push(current_line.trim().to_string());
            current_line.clear();
            current_width = 0;
        }

        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }

        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        lines.push(current_line.trim().to_string());
    }

    lines
}

#[derive(Clone, Copy, PartialEq)]
enum Run {
    None,
    Word,
    Number,
}

fn flush(spans: &mut Vec<Span<'static>>, current: &mut String, run: Run, base_style: Style) {
    if current.is_empty() {
        return;
    }
    let style = match run {
        Run::Word if Function::from_name(current).is_some() => Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD),
        Run::Number => Style::default().fg(Color::LightGreen),
        _ => base_style,
    };
    spans.push(Span::styled(std::mem::take(current), style));
}

/// Colours function names, numbers and operators of an already formatted
/// expression line.
pub fn highlight_functions(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut run = Run::None;

    for c in expr.chars() {
        let next_run = if c.is_ascii_alphabetic() {
            Run::Word
        } else if c.is_ascii_digit() || c == '.' {
            Run::Number
        } else {
            Run::None
        };

        if next_run != run {
            flush(&mut spans, &mut current, run, base_style);
            run = next_run;
        }

        if run != Run::None {
            current.push(c);
            continue;
        }

        if Operator::is_symbol(c) {
            spans.push(Span::styled(c.to_string(), operator_style));
        } else if c == ' ' {
            spans.push(Span::raw(" "));
        } else {
            spans.push(Span::styled(c.to_string(), base_style));
        }
    }
    flush(&mut spans, &mut current, run, base_style);

    spans
}
