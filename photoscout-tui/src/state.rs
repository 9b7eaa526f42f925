use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use photoscout_core::{dismissal::Region, photo::PhotoRecord};
use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Results,
}

/// Where things landed on the last frame, for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameLayout {
    pub input: Option<Rect>,
    pub panel: Option<Rect>,
    pub list: Option<Rect>,
    /// Visible rows in the results list
    pub list_rows: usize,
    /// First result shown in the list
    pub list_offset: usize,
}

impl FrameLayout {
    pub fn input_region(&self) -> Option<Region> {
        self.input.map(crate::mouse::region)
    }

    pub fn panel_region(&self) -> Option<Region> {
        self.panel.map(crate::mouse::region)
    }
}

/// Presentation-only state: focus, selection and the preview overlay.
/// Everything about what is being shown lives in the query controller.
#[derive(Debug, Default)]
pub struct UiState {
    pub focus: Focus,
    pub selected: Option<usize>,
    pub suggestion_selected: Option<usize>,
    pub preview: Option<PhotoRecord>,
    pub layout: FrameLayout,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the selection inside a list of `len` results.
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = match (len, self.selected) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(sel)) => Some(sel.min(len - 1)),
        };
    }

    pub fn move_selection(&mut self, delta: i32, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0);
        let magnitude = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
        let next = if delta < 0 {
            current.saturating_sub(magnitude)
        } else {
            current.saturating_add(magnitude)
        };
        self.selected = Some(next.min(len - 1));
    }

    pub fn move_suggestion(&mut self, delta: i32, len: usize) {
        if len == 0 {
            self.suggestion_selected = None;
            return;
        }
        let len_i = i64::try_from(len).unwrap_or(i64::MAX);
        let next = match self.suggestion_selected {
            None if delta < 0 => len_i - 1,
            None => 0,
            Some(sel) => {
                let sel = i64::try_from(sel).unwrap_or(0);
                (sel + i64::from(delta)).rem_euclid(len_i)
            }
        };
        self.suggestion_selected = usize::try_from(next).ok();
    }

    /// Whether the selection is within `threshold` rows of the last result, or
    /// the whole list fits on screen.
    pub fn near_end(&self, len: usize, threshold: usize) -> bool {
        if len == 0 {
            return false;
        }
        if len <= self.layout.list_rows {
            return true;
        }
        let selected = self.selected.unwrap_or(0);
        selected.saturating_add(threshold) >= len - 1
    }
}

/// History entries matching `query` in their original order. An empty query matches everything.
pub fn filter_suggestions<'a>(
    matcher: &SkimMatcherV2,
    entries: &'a [String],
    query: &str,
) -> Vec<&'a str> {
    let query = query.trim();
    entries
        .iter()
        .filter(|entry| query.is_empty() || matcher.fuzzy_match(entry, query).is_some())
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_selection() {
        let mut ui = UiState::new();
        ui.clamp_selection(0);
        assert_eq!(ui.selected, None);
        ui.clamp_selection(5);
        assert_eq!(ui.selected, Some(0));
        ui.selected = Some(9);
        ui.clamp_selection(5);
        assert_eq!(ui.selected, Some(4));
    }

    #[test]
    fn test_move_selection_clamps() {
        let mut ui = UiState::new();
        ui.move_selection(3, 10);
        assert_eq!(ui.selected, Some(3));
        ui.move_selection(100, 10);
        assert_eq!(ui.selected, Some(9));
        ui.move_selection(-100, 10);
        assert_eq!(ui.selected, Some(0));
    }

    #[test]
    fn test_move_suggestion_wraps() {
        let mut ui = UiState::new();
        ui.move_suggestion(1, 3);
        assert_eq!(ui.suggestion_selected, Some(0));
        ui.move_suggestion(-1, 3);
        assert_eq!(ui.suggestion_selected, Some(2));
        ui.move_suggestion(1, 3);
        assert_eq!(ui.suggestion_selected, Some(0));

        let mut ui = UiState::new();
        ui.move_suggestion(-1, 3);
        assert_eq!(ui.suggestion_selected, Some(2));
    }

    #[test]
    fn test_near_end() {
        let mut ui = UiState::new();
        ui.layout.list_rows = 10;
        assert!(!ui.near_end(0, 3));
        // Everything fits on screen
        assert!(ui.near_end(8, 3));

        ui.selected = Some(5);
        assert!(!ui.near_end(20, 3));
        ui.selected = Some(16);
        assert!(ui.near_end(20, 3));
        ui.selected = Some(19);
        assert!(ui.near_end(20, 0));
    }

    #[test]
    fn test_filter_suggestions_keeps_order() {
        let matcher = SkimMatcherV2::default();
        let entries = vec!["cats".to_string(), "dogs".to_string(), "cat toys".to_string()];
        assert_eq!(
            filter_suggestions(&matcher, &entries, "cat"),
            vec!["cats", "cat toys"]
        );
        assert_eq!(filter_suggestions(&matcher, &entries, " ").len(), 3);
        assert!(filter_suggestions(&matcher, &entries, "zebra").is_empty());
    }
}
