use crate::commands::{parse_command, Command};
use crossterm::event::{KeyCode, KeyModifiers};
use shuntcalc::history::History;

const PAGE: isize = 10;

pub struct App {
    pub input: String,
    pub cursor_position: usize,
    pub input_scroll: usize,
    pub history: History,
    pub cursor_history: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub item_start_indices: Vec<usize>,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
}

impl App {
    pub fn new() -> Self {
        App {
            input: String::new(),
            cursor_position: 0,
            input_scroll: 0,
            history: History::new(),
            cursor_history: 0,
            status_message: None,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            list_height: 5,
            item_start_indices: Vec::new(),
            history_scroll: 0,
            scroll_to_bottom: false,
        }
    }

    /// Maps one key press onto the editor, history list or help screen.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        if self.show_help {
            match code {
                KeyCode::Up => self.scroll_by(-1),
                KeyCode::Down => self.scroll_by(1),
                KeyCode::PageUp => self.scroll_by(-PAGE),
                KeyCode::PageDown => self.scroll_by(PAGE),
                KeyCode::Esc | KeyCode::F(1) => self.close_help(),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('u') if ctrl => self.clear_input(),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.delete_backward(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left if ctrl => self.move_cursor_by_words(-1),
            KeyCode::Right if ctrl => self.move_cursor_by_words(1),
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            KeyCode::Up => self.navigate_history(-1),
            KeyCode::Down => self.navigate_history(1),
            KeyCode::PageUp => self.scroll_history(-1),
            KeyCode::PageDown => self.scroll_history(1),
            KeyCode::Enter => self.submit(),
            KeyCode::F(1) => self.open_help(),
            KeyCode::Esc => self.status_message = None,
            _ => {}
        }
    }

    /// Scrolls whichever view is showing, help or history.
    pub fn scroll_by(&mut self, delta: isize) {
        let offset = if self.show_help {
            &mut self.help_scroll
        } else {
            &mut self.history_scroll
        };
        *offset = offset.saturating_add_signed(delta);
    }

    pub fn open_help(&mut self) {
        self.show_help = true;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
        self.help_scroll = 0;
    }

    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total_chars = self.input.chars().count();
        let cursor_pos = self.cursor_position;

        if cursor_pos < self.input_scroll {
            self.input_scroll = cursor_pos;
        } else if cursor_pos >= self.input_scroll + visible_width {
            self.input_scroll = cursor_pos + 1 - visible_width.max(1);
        }

        self.input_scroll = self.input_scroll.min(total_chars.saturating_sub(visible_width));
    }

    pub fn submit(&mut self) {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            return;
        }
        self.status_message = None;

        match parse_command(&input) {
            Command::Quit => {
                self.should_quit = true;
                return;
            }
            Command::Clear => {
                self.history.clear();
                self.cursor_history = 0;
                self.history_scroll = 0;
            }
            Command::Help => self.open_help(),
            Command::History => {
                self.scroll_to_bottom = true;
            }
            Command::Delete(id) => {
                self.status_message = Some(match self.history.remove(id) {
                    Some(removed) => format!("Deleted #{} ({})", id, removed.expression),
                    None => format!("No calculation #{}", id),
                });
                self.cursor_history = self.cursor_history.min(self.history.len().saturating_sub(1));
            }
            Command::Invalid(message) => {
                self.status_message = Some(message);
            }
            Command::Evaluate { expression, detailed } => {
                self.history.record(expression, detailed);
                self.cursor_history = self.history.len().saturating_sub(1);
                self.scroll_to_bottom = true;
            }
        }

        self.clear_input();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map_or(self.input.len(), |(i, _)| i)
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor_position);
        self.input.insert(at, c);
        self.cursor_position += 1;
    }

    pub fn delete_backward(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        self.delete_forward();
    }

    pub fn delete_forward(&mut self) {
        let at = self.byte_index(self.cursor_position);
        if at < self.input.len() {
            self.input.remove(at);
        }
    }

    pub fn move_cursor(&mut self, direction: i32) {
        match direction {
            -1 => self.cursor_position = self.cursor_position.saturating_sub(1),
            1 => self.cursor_position = (self.cursor_position + 1).min(self.input.chars().count()),
            _ => {}
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_position = 0;
        self.input_scroll = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_position = self.input.chars().count();
    }

    pub fn move_cursor_by_words(&mut self, direction: i32) {
        let input_chars: Vec<char> = self.input.chars().collect();
        let mut pos = self.cursor_position;

        if direction < 0 {
            while pos > 0 && input_chars[pos - 1].is_whitespace() {
                pos -= 1;
            }
            while pos > 0 && !input_chars[pos - 1].is_whitespace() {
                pos -= 1;
            }
        } else {
            let len = input_chars.len();
            while pos < len && !input_chars[pos].is_whitespace() {
                pos += 1;
            }
            while pos < len && input_chars[pos].is_whitespace() {
                pos += 1;
            }
        }

        self.cursor_position = pos;
    }

    pub fn navigate_history(&mut self, direction: i32) {
        if direction < 0 && self.cursor_history > 0 {
            self.cursor_history -= 1;
        } else if direction > 0 && self.cursor_history < self.history.len().saturating_sub(1) {
            self.cursor_history += 1;
        }

        self.load_selected();
        self.scroll_to_bottom = false;
    }

    pub fn scroll_history(&mut self, direction: i32) {
        let step = self.list_height.saturating_sub(1);
        if direction < 0 {
            self.cursor_history = self.cursor_history.saturating_sub(step);
        } else {
            self.cursor_history = self.cursor_history.saturating_add(step)
                .min(self.history.len().saturating_sub(1));
        }

        self.load_selected();
        self.scroll_to_bottom = false;
    }

    fn load_selected(&mut self) {
        match self.history.entries().get(self.cursor_history) {
            Some(entry) => self.input = entry.expression.clone(),
            None => self.input.clear(),
        }
        self.cursor_position = self.input.chars().count();
        self.input_scroll = 0;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn submit(app: &mut App, input: &str) {
        app.input = input.to_string();
        app.submit();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(code, KeyModifiers::NONE);
    }

    #[test]
    fn submit_records_and_clears_input() {
        let mut app = App::new();
        submit(&mut app, "2 * (3 + 4)");
        submit(&mut app, "details sqrt(16)");

        let entries = app.history.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].result, Ok(14.0));
        assert!(entries[1].detailed_mode);
        assert_eq!(entries[1].expression, "sqrt(16)");
        assert_eq!(app.input, "");
        assert_eq!(app.cursor_history, 1);
    }

    #[test]
    fn delete_and_clear_commands() {
        let mut app = App::new();
        submit(&mut app, "1 + 1");
        submit(&mut app, "2 + 2");
        submit(&mut app, "delete 1");

        assert_eq!(app.history.len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Deleted #1 (1 + 1)"));

        submit(&mut app, "delete 1");
        assert_eq!(app.status_message.as_deref(), Some("No calculation #1"));

        submit(&mut app, "clear");
        assert!(app.history.is_empty());
        assert_eq!(app.cursor_history, 0);
    }

    #[test]
    fn history_navigation_recalls_expressions() {
        let mut app = App::new();
        submit(&mut app, "1 + 1");
        submit(&mut app, "5 / 0");

        app.navigate_history(-1);
        assert_eq!(app.input, "1 + 1");
        app.navigate_history(1);
        assert_eq!(app.input, "5 / 0");
        assert_eq!(app.cursor_position, 5);
    }

    #[test]
    fn editing_in_the_middle_of_the_line() {
        let mut app = App::new();
        type_text(&mut app, "2+4");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "*");
        assert_eq!(app.input, "2*4");
        assert_eq!(app.cursor_position, 2);

        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.input, "*4");
        assert_eq!(app.cursor_position, 0);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "*4");

        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.input, "*4");
        assert_eq!(app.cursor_position, 2);
    }

    #[test]
    fn editing_respects_multibyte_characters() {
        let mut app = App::new();
        type_text(&mut app, "√9");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "sqrt");
        assert_eq!(app.input, "sqrt9");
    }

    #[test]
    fn word_jumps() {
        let mut app = App::new();
        type_text(&mut app, "12 + 34");
        app.handle_key(KeyCode::Left, KeyModifiers::CONTROL);
        assert_eq!(app.cursor_position, 5);
        app.handle_key(KeyCode::Left, KeyModifiers::CONTROL);
        assert_eq!(app.cursor_position, 3);
        app.handle_key(KeyCode::Right, KeyModifiers::CONTROL);
        assert_eq!(app.cursor_position, 5);
    }

    #[test]
    fn control_keys_do_not_insert_text() {
        let mut app = App::new();
        type_text(&mut app, "1 + 1");
        app.handle_key(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(app.input, "1 + 1");

        app.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(app.input, "");
        assert_eq!(app.cursor_position, 0);

        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn enter_submits_typed_expression() {
        let mut app = App::new();
        type_text(&mut app, "details 2^3^2");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.history.entries()[0].result, Ok(512.0));
        assert_eq!(app.input, "");
    }

    #[test]
    fn help_screen_takes_over_navigation_keys() {
        let mut app = App::new();
        type_text(&mut app, "1");
        press(&mut app, KeyCode::F(1));
        assert!(app.show_help);

        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, 9);
        type_text(&mut app, "2");
        assert_eq!(app.input, "1");

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert_eq!(app.help_scroll, 0);
    }

    #[test]
    fn scrolling_targets_the_visible_view() {
        let mut app = App::new();
        app.scroll_by(3);
        app.scroll_by(-5);
        assert_eq!(app.history_scroll, 0);
        app.scroll_by(3);
        assert_eq!(app.history_scroll, 3);

        app.open_help();
        app.scroll_by(3);
        assert_eq!(app.help_scroll, 3);
        assert_eq!(app.history_scroll, 3);
    }

    #[test]
    fn input_scroll_follows_cursor() {
        let mut app = App::new();
        type_text(&mut app, "1234567890");
        app.adjust_input_scroll(4);
        assert_eq!(app.input_scroll, 6);

        press(&mut app, KeyCode::Home);
        app.adjust_input_scroll(4);
        assert_eq!(app.input_scroll, 0);
    }
}
