use ratatui::layout::Rect;

/// Editable text with a character-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub text: String,
    pub cursor: usize,
    pub multiline: bool,
}

impl TextField {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.cursor = char_count(&self.text);
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = char_count(&self.text);
    }

    pub fn insert(&mut self, ch: char) {
        if ch == '\n' && !self.multiline {
            return;
        }
        let idx = byte_index(&self.text, self.cursor);
        self.text.insert(idx, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            let ch = if ch == '\r' { '\n' } else { ch };
            self.insert(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = byte_index(&self.text, self.cursor - 1);
        let end = byte_index(&self.text, self.cursor);
        if start < end {
            self.text.replace_range(start..end, "");
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor >= char_count(&self.text) {
            return;
        }
        let start = byte_index(&self.text, self.cursor);
        let end = byte_index(&self.text, self.cursor + 1);
        if start < end {
            self.text.replace_range(start..end, "");
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < char_count(&self.text) {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        let line_lens = line_lengths(&self.text);
        let (line, col) = cursor_line_col(&line_lens, self.cursor);
        self.cursor = cursor_from_line_col(&line_lens, line.saturating_sub(1), col);
    }

    pub fn move_down(&mut self) {
        let line_lens = line_lengths(&self.text);
        let (line, col) = cursor_line_col(&line_lens, self.cursor);
        let target = (line + 1).min(line_lens.len().saturating_sub(1));
        self.cursor = cursor_from_line_col(&line_lens, target, col);
    }

    pub fn move_line_start(&mut self) {
        let line_lens = line_lengths(&self.text);
        let (line, _) = cursor_line_col(&line_lens, self.cursor);
        self.cursor = cursor_from_line_col(&line_lens, line, 0);
    }

    pub fn move_line_end(&mut self) {
        let line_lens = line_lengths(&self.text);
        let (line, _) = cursor_line_col(&line_lens, self.cursor);
        let line_len = line_lens.get(line).copied().unwrap_or(0);
        self.cursor = cursor_from_line_col(&line_lens, line, line_len);
    }

    /// Places the cursor under a mouse click inside the field's bordered area.
    /// `prefix_len` is the width of the prompt drawn before each line.
    pub fn set_cursor_from_click(&mut self, area: Rect, col: u16, row: u16, prefix_len: usize) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let row_in_area = row.saturating_sub(area.y) as usize;
        let col_in_area = col.saturating_sub(area.x) as usize;
        let lines: Vec<&str> = self.text.split('\n').collect();
        let line_idx = row_in_area.min(lines.len().saturating_sub(1));
        let line = lines.get(line_idx).copied().unwrap_or("");

        let target_col = col_in_area
            .saturating_sub(prefix_len)
            .min(line.chars().count());

        let line_lens = line_lengths(&self.text);
        self.cursor = cursor_from_line_col(&line_lens, line_idx, target_col);
    }
}

pub fn split_line_at_char(line: &str, idx: usize) -> (String, Option<char>, String) {
    let mut before = String::new();
    let mut current = None;
    let mut after = String::new();

    for (i, ch) in line.chars().enumerate() {
        if i < idx {
            before.push(ch);
        } else if i == idx {
            current = Some(ch);
        } else {
            after.push(ch);
        }
    }

    (before, current, after)
}

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

pub fn point_in_rect(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

fn byte_index(text: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    if let Some((idx, _)) = text.char_indices().nth(char_idx) {
        return idx;
    }
    text.len()
}

fn line_lengths(text: &str) -> Vec<usize> {
    text.split('\n').map(|line| line.chars().count()).collect()
}

fn cursor_line_col(line_lens: &[usize], cursor: usize) -> (usize, usize) {
    let mut remaining = cursor;
    for (i, len) in line_lens.iter().enumerate() {
        if remaining <= *len {
            return (i, remaining);
        }
        remaining = remaining.saturating_sub(len + 1);
    }
    let last = line_lens.len().saturating_sub(1);
    (last, line_lens.get(last).copied().unwrap_or(0))
}

fn cursor_from_line_col(line_lens: &[usize], line_idx: usize, col: usize) -> usize {
    let mut idx = 0usize;
    for i in 0..line_idx {
        idx = idx.saturating_add(line_lens.get(i).copied().unwrap_or(0) + 1);
    }
    let line_len = line_lens.get(line_idx).copied().unwrap_or(0);
    idx.saturating_add(col.min(line_len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_respect_multibyte_chars() {
        let mut field = TextField::multiline();
        field.insert_str("héllo");
        assert_eq!(field.cursor, 5);
        field.move_left();
        field.move_left();
        field.backspace();
        assert_eq!(field.text, "hélo");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn single_line_field_drops_newlines() {
        let mut field = TextField::single_line();
        field.insert_str("k1\nk2");
        assert_eq!(field.text, "k1k2");
    }

    #[test]
    fn vertical_moves_keep_column_when_possible() {
        let mut field = TextField::multiline().with_text("abcd\nxy\nlonger");
        field.move_up();
        assert_eq!(field.cursor, 7); // end of "xy"
        field.move_up();
        assert_eq!(field.cursor, 2);
        field.move_down();
        field.move_down();
        assert_eq!(field.cursor, 10);
    }

    #[test]
    fn line_start_and_end() {
        let mut field = TextField::multiline().with_text("abc\ndef");
        field.move_line_start();
        assert_eq!(field.cursor, 4);
        field.move_line_end();
        assert_eq!(field.cursor, 7);
    }

    #[test]
    fn delete_at_end_is_noop() {
        let mut field = TextField::single_line().with_text("key");
        field.delete();
        assert_eq!(field.text, "key");
    }

    #[test]
    fn click_places_cursor_on_line_and_column() {
        let mut field = TextField::multiline().with_text("first\nsecond");
        let area = Rect::new(10, 5, 30, 4);
        field.set_cursor_from_click(area, 10 + 3 + 2, 6, 3);
        assert_eq!(field.cursor, 6 + 2);
    }
}
