use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Draft};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left};

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let draft = &mut app.draft;
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => app.commit_draft(),
        (_, KeyCode::Esc) => app.cancel_draft(),
        (_, KeyCode::Tab) => draft.priority = draft.priority.next(),
        (_, KeyCode::BackTab) => draft.priority = draft.priority.next().next(),

        (KeyModifiers::CONTROL, KeyCode::Char('w')) | (KeyModifiers::ALT, KeyCode::Backspace) => {
            draft.delete_word_back()
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => draft.clear(),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => draft.cursor = 0,
        (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => {
            draft.cursor = draft.text.len()
        }
        (_, KeyCode::Left) => draft.move_left(),
        (_, KeyCode::Right) => draft.move_right(),
        (_, KeyCode::Backspace) => draft.backspace(),
        (_, KeyCode::Delete) => draft.delete_forward(),
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            draft.insert(c)
        }
        _ => {}
    }
}

impl Draft {
    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        // Task text is a single line
        let clean: String = s.chars().map(|c| if c.is_control() { ' ' } else { c }).collect();
        self.text.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn delete_word_back(&mut self) {
        let start = word_boundary_left(&self.text, self.cursor);
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}
