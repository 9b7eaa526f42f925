use unicode_segmentation::UnicodeSegmentation;

/// Editable single-line query text with a byte-offset cursor that always sits on
/// a grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
    cursor: usize,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole text, leaving the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    fn boundaries(&self) -> Vec<usize> {
        let mut boundaries: Vec<usize> = self.text.grapheme_indices(true).map(|(i, _)| i).collect();
        boundaries.push(self.text.len());
        boundaries
    }

    fn cursor_index(&self, boundaries: &[usize]) -> usize {
        match boundaries.binary_search(&self.cursor) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the grapheme before the cursor. Returns whether anything changed.
    pub fn backspace(&mut self) -> bool {
        let boundaries = self.boundaries();
        let idx = self.cursor_index(&boundaries);
        if idx == 0 {
            return false;
        }
        let prev = boundaries[idx - 1];
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Delete back to the start of the previous word. Returns whether anything changed.
    pub fn delete_word(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let before = &self.text[..self.cursor];
        let trimmed = before.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        self.text.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        self.text.clear();
        self.cursor = 0;
        true
    }

    pub fn cursor_left(&mut self) {
        let boundaries = self.boundaries();
        let idx = self.cursor_index(&boundaries);
        if idx > 0 {
            self.cursor = boundaries[idx - 1];
        }
    }

    pub fn cursor_right(&mut self) {
        let boundaries = self.boundaries();
        let idx = self.cursor_index(&boundaries);
        if idx + 1 < boundaries.len() {
            self.cursor = boundaries[idx + 1];
        }
    }

    pub fn cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.text.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(text: &str) -> QueryInput {
        let mut input = QueryInput::new();
        input.set(text);
        input
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut q = input("cts");
        q.cursor_left();
        q.cursor_left();
        q.insert_char('a');
        assert_eq!(q.text(), "cats");
        assert_eq!(q.cursor(), 2);
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut q = input("cafe\u{0301}");
        assert!(q.backspace());
        assert_eq!(q.text(), "caf");
        assert_eq!(q.cursor(), 3);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut q = input("a");
        q.cursor_start();
        assert!(!q.backspace());
        assert_eq!(q.text(), "a");
    }

    #[test]
    fn test_cursor_moves_over_emoji() {
        let mut q = input("a👩‍💻b");
        q.cursor_left();
        q.cursor_left();
        assert_eq!(q.cursor(), 1);
        q.cursor_right();
        assert_eq!(q.cursor(), "a👩‍💻".len());
    }

    #[test]
    fn test_delete_word() {
        let mut q = input("red fox  ");
        assert!(q.delete_word());
        assert_eq!(q.text(), "red ");
        assert!(q.delete_word());
        assert_eq!(q.text(), "");
        assert!(!q.delete_word());
    }

    #[test]
    fn test_clear() {
        let mut q = input("owls");
        assert!(q.clear());
        assert_eq!(q.text(), "");
        assert_eq!(q.cursor(), 0);
        assert!(!q.clear());
    }
}
