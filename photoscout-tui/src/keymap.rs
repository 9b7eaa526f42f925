use crate::state::{Focus, UiState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use photoscout_core::action::Action;

/// Resolve a key event into an Action based on focus and overlays
pub fn resolve_action(key: KeyEvent, ui: &UiState, suggestions_visible: bool) -> Option<Action> {
    // Global quit
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    if ui.preview.is_some() {
        return resolve_preview_key(key.code);
    }

    match ui.focus {
        Focus::Input => resolve_input_key(key, ui, suggestions_visible),
        Focus::Results => resolve_results_key(key.code),
    }
}

fn resolve_preview_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::ClosePreview),
        KeyCode::Char('o') => Some(Action::OpenInBrowser),
        _ => None,
    }
}

fn resolve_input_key(key: KeyEvent, ui: &UiState, suggestions_visible: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') => Some(Action::QueryDeleteWord),
            KeyCode::Char('u') => Some(Action::QueryClear),
            KeyCode::Char('a') => Some(Action::CursorStart),
            KeyCode::Char('e') => Some(Action::CursorEnd),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc if suggestions_visible => Some(Action::DismissSuggestions),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter if suggestions_visible && ui.suggestion_selected.is_some() => {
            Some(Action::AcceptSuggestion)
        }
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Tab | KeyCode::Down if !suggestions_visible => Some(Action::FocusResults),
        KeyCode::Tab => Some(Action::ToggleFocus),
        KeyCode::Up => Some(Action::MoveSelection(-1)),
        KeyCode::Down => Some(Action::MoveSelection(1)),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorStart),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Backspace => Some(Action::QueryPop),
        KeyCode::Char(c) => Some(Action::QueryPush(c)),
        _ => None,
    }
}

fn resolve_results_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Enter => Some(Action::ActivatePhoto),
        KeyCode::Tab | KeyCode::Char('/') => Some(Action::FocusInput),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveSelection(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveSelection(1)),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::MoveTop),
        KeyCode::End | KeyCode::Char('G') => Some(Action::MoveBottom),
        KeyCode::Char('o') => Some(Action::OpenInBrowser),
        _ => None,
    }
}
