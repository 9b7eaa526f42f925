/// Every user interaction produces an Action. The UI never calls the gateway directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Query editing
    QueryPush(char),
    QueryPop,
    QueryDeleteWord,
    QueryClear,
    Submit,

    // Cursor movement (for the query input)
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,

    // Movement
    MoveSelection(i32),
    PageUp,
    PageDown,
    MoveTop,
    MoveBottom,

    // Focus
    FocusInput,
    FocusResults,
    ToggleFocus,

    // Suggestions
    AcceptSuggestion,
    DismissSuggestions,

    // Preview
    ActivatePhoto,
    OpenInBrowser,
    ClosePreview,
}
