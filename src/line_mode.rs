use crate::commands::{parse_command, Command};
use anyhow::{Context, Result};
use shuntcalc::calc_engine::{format_number, format_with_spaces};
use shuntcalc::history::{Calculation, History};
use std::io::{stdin, stdout, Write};
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
};

const PROMPT: &str = "Expression: ";

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

fn summary_line(entry: &Calculation) -> String {
    let expression = format_with_spaces(&entry.expression);
    match &entry.result {
        Ok(value) => format!("#{} {} = {}", entry.id, expression, format_number(*value)),
        Err(e) => format!("#{} {} = Error: {}", entry.id, expression, e),
    }
}

fn print_calculation(out: &mut impl Write, entry: &Calculation) -> Result<()> {
    write!(out, "\r\n  {}\r\n", summary_line(entry))?;

    if entry.detailed_mode {
        if let Some(postfix) = &entry.postfix {
            write!(out, "\r\n  RPN: {}\r\n", postfix)?;
        }
        if !entry.detailed_steps.is_empty() {
            write!(out, "\r\n  Step-by-step evaluation:\r\n")?;
            for (i, step) in entry.detailed_steps.iter().enumerate() {
                write!(out, "\r  Step {}: {} = {}\r\n", i + 1, step.operation, format_number(step.result))?;
            }
        }
        write!(out, "\r  Time: {:.6} ms\r\n", entry.duration.as_secs_f64() * 1000.0)?;
    }
    write!(out, "\r\n")?;
    out.flush()?;
    Ok(())
}

fn read_expression(
    stdout: &mut impl Write,
    history: &History,
    history_index: &mut usize,
) -> Result<Option<String>> {
    let mut expression = String::new();
    let mut cursor_pos = 0;  // позиция курсора в символах
    let (_, initial_y) = stdout.cursor_pos().context("failed to query cursor position")?;

    let stdin = stdin();
    let mut keys = stdin.keys();

    loop {
        write!(stdout, "{}{}{}{}", Goto(1, initial_y), ClearLine, PROMPT, expression)?;

        let cursor_x = PROMPT.len() + cursor_pos + 1;
        write!(stdout, "{}", Goto(cursor_x as u16, initial_y))?;
        stdout.flush()?;

        let key = match keys.next() {
            Some(key) => key?,
            None => return Ok(None),
        };

        match key {
            Key::Char('\n') => return Ok(Some(expression)),
            Key::Ctrl('c') | Key::Ctrl('d') => return Ok(None),
            Key::Char(c) => {
                let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                expression.insert(byte_idx, c);
                cursor_pos += 1;
            }
            Key::Backspace if cursor_pos > 0 => {
                cursor_pos -= 1;
                let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                if let Some(c) = expression[byte_idx..].chars().next() {
                    expression.drain(byte_idx..byte_idx + c.len_utf8());
                }
            }
            Key::Delete if cursor_pos < expression.chars().count() => {
                let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                if let Some(c) = expression[byte_idx..].chars().next() {
                    expression.drain(byte_idx..byte_idx + c.len_utf8());
                }
            }
            Key::Left if cursor_pos > 0 => cursor_pos -= 1,
            Key::Right if cursor_pos < expression.chars().count() => cursor_pos += 1,
            Key::Home => cursor_pos = 0,
            Key::End => cursor_pos = expression.chars().count(),
            Key::Up => {
                if *history_index > 0 {
                    *history_index -= 1;
                    expression = history.entries()[*history_index].expression.clone();
                    cursor_pos = expression.chars().count();
                }
            }
            Key::Down => {
                if *history_index + 1 < history.len() {
                    *history_index += 1;
                    expression = history.entries()[*history_index].expression.clone();
                    cursor_pos = expression.chars().count();
                } else {
                    *history_index = history.len();
                    expression.clear();
                    cursor_pos = 0;
                }
            }
            _ => {}
        }
    }
}

/// Executes one parsed command, writing its output. Returns `false` once the session should end.
fn handle_command(out: &mut impl Write, history: &mut History, command: Command) -> Result<bool> {
    match command {
        Command::Quit => return Ok(false),
        Command::Clear => {
            history.clear();
            write!(out, "\r\nHistory cleared\r\n\r\n")?;
        }
        Command::Help => {
            write!(out, "\r\n  Operators: + - * / ^   Functions: sqrt(x)\r\n")?;
            write!(out, "\r  Commands: details <expr>, history, delete <id>, clear, quit\r\n\r\n")?;
        }
        Command::History => {
            write!(out, "\r\n")?;
            if history.is_empty() {
                write!(out, "\r  No calculations yet\r\n")?;
            }
            for entry in history.latest() {
                write!(out, "\r  {}\r\n", summary_line(entry))?;
            }
            write!(out, "\r\n")?;
        }
        Command::Delete(id) => match history.remove(id) {
            Some(removed) => write!(out, "\r\nDeleted #{} ({})\r\n\r\n", id, removed.expression)?,
            None => write!(out, "\r\nNo calculation #{}\r\n\r\n", id)?,
        },
        Command::Invalid(message) => write!(out, "\r\n{}\r\n\r\n", message)?,
        Command::Evaluate { expression, detailed } => {
            let entry = history.record(expression, detailed);
            print_calculation(out, entry)?;
        }
    }
    out.flush()?;
    Ok(true)
}

pub fn run_line() -> Result<()> {
    println!("ShuntCalc Console Calculator");
    println!("Supports: +, -, *, /, ^ (right associative), parentheses, sqrt(x)");
    println!("Navigation: ←/→, Backspace/Delete, Home/End, ↑/↓ for history");
    println!("Special commands: 'quit' to exit, 'clear' to reset history,");
    println!("  'history' to list past results, 'delete <id>' to drop one");
    println!("Add 'details' before expression for step-by-step evaluation\n");

    let mut stdout = stdout().into_raw_mode().context("failed to enter raw mode")?;
    let mut history = History::new();
    let mut history_index = 0;

    loop {
        write!(stdout, "{}{}", ClearLine, PROMPT)?;
        stdout.flush()?;

        let expression = match read_expression(&mut stdout, &history, &mut history_index)? {
            Some(expression) => expression,
            None => break,
        };

        let input = expression.trim();
        if input.is_empty() {
            write!(stdout, "\r\n")?;
            continue;
        }

        if !handle_command(&mut stdout, &mut history, parse_command(input))? {
            break;
        }
        history_index = history.len();
    }

    write!(stdout, "\r\nGoodbye!\r\n")?;
    stdout.flush()?;
    log::info!("session ended after {} calculations", history.len());
    Ok(())
}
