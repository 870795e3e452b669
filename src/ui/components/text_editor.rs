//! Multi-line text editor component.
//!
//! Cursor columns count characters, not bytes, so non-ASCII text is safe to
//! edit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// A multi-line text editor.
#[derive(Debug, Clone)]
pub struct TextEditor {
    lines: Vec<String>,
    cursor_line: usize,
    /// Character index within the current line.
    cursor_col: usize,
    /// First visible line.
    scroll: usize,
}

impl TextEditor {
    /// Create an editor holding `content`, cursor at the end.
    pub fn new(content: &str) -> Self {
        let mut editor = Self {
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            scroll: 0,
        };
        editor.set_content(content);
        editor
    }

    /// Create an empty editor.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Replace the content and move the cursor to the end.
    pub fn set_content(&mut self, content: &str) {
        let mut lines: Vec<String> = content.split('\n').map(String::from).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        self.lines = lines;
        self.cursor_line = self.lines.len() - 1;
        self.cursor_col = char_len(&self.lines[self.cursor_line]);
        self.scroll = 0;
    }

    /// The current content.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Current cursor line.
    #[cfg(test)]
    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    /// Current cursor column in characters.
    #[cfg(test)]
    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    /// Handle a key. Returns true if the content changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                true
            }
            (KeyCode::Enter, KeyModifiers::NONE) => {
                self.insert_newline();
                true
            }
            (KeyCode::Backspace, _) => self.delete_backward(),
            (KeyCode::Delete, _) => self.delete_forward(),
            (KeyCode::Left, _) => {
                self.move_left();
                false
            }
            (KeyCode::Right, _) => {
                self.move_right();
                false
            }
            (KeyCode::Up, _) => {
                if self.cursor_line > 0 {
                    self.cursor_line -= 1;
                    self.clamp_cursor_col();
                }
                false
            }
            (KeyCode::Down, _) => {
                if self.cursor_line + 1 < self.lines.len() {
                    self.cursor_line += 1;
                    self.clamp_cursor_col();
                }
                false
            }
            (KeyCode::Home, _) => {
                self.cursor_col = 0;
                false
            }
            (KeyCode::End, _) => {
                self.cursor_col = char_len(self.current_line());
                false
            }
            _ => false,
        }
    }

    fn current_line(&self) -> &str {
        &self.lines[self.cursor_line]
    }

    /// Byte offset of the cursor within the current line.
    fn byte_offset(&self) -> usize {
        byte_index(self.current_line(), self.cursor_col)
    }

    fn clamp_cursor_col(&mut self) {
        self.cursor_col = self.cursor_col.min(char_len(self.current_line()));
    }

    fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset();
        self.lines[self.cursor_line].insert(offset, c);
        self.cursor_col += 1;
    }

    fn insert_newline(&mut self) {
        let offset = self.byte_offset();
        let rest = self.lines[self.cursor_line].split_off(offset);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    fn delete_backward(&mut self) -> bool {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let offset = self.byte_offset();
            self.lines[self.cursor_line].remove(offset);
            true
        } else if self.cursor_line > 0 {
            let line = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = char_len(self.current_line());
            self.lines[self.cursor_line].push_str(&line);
            true
        } else {
            false
        }
    }

    fn delete_forward(&mut self) -> bool {
        if self.cursor_col < char_len(self.current_line()) {
            let offset = self.byte_offset();
            self.lines[self.cursor_line].remove(offset);
            true
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
            true
        } else {
            false
        }
    }

    fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = char_len(self.current_line());
        }
    }

    fn move_right(&mut self) {
        if self.cursor_col < char_len(self.current_line()) {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    fn ensure_cursor_visible(&mut self, visible_height: usize) {
        self.scroll = self.scroll.min(self.cursor_line);
        if visible_height == 0 {
            return;
        }
        if self.cursor_line >= self.scroll + visible_height {
            self.scroll = self.cursor_line + 1 - visible_height;
        }
    }

    /// Render the editor inside a titled border.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool, title: &str) {
        let visible_height = area.height.saturating_sub(2) as usize;
        self.ensure_cursor_visible(visible_height);

        let lines: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll)
            .take(visible_height)
            .map(|l| Line::from(l.as_str()))
            .collect();

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border_style);
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if focused {
            // Cursor offsets inside the border; hidden when they fall outside.
            let col = u16::try_from(self.cursor_col).unwrap_or(u16::MAX);
            let row = u16::try_from(self.cursor_line.saturating_sub(self.scroll))
                .unwrap_or(u16::MAX);
            if col < area.width.saturating_sub(2) && row < area.height.saturating_sub(2) {
                frame.set_cursor_position(Position::new(area.x + 1 + col, area.y + 1 + row));
            }
        }
    }
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::empty()
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
