mod spawn;

pub use spawn::ThreadDispatcher;

use crate::{
    components::{self, photo_list, search_bar, status_bar, suggestions},
    keymap,
    mouse::{self, MouseCapture},
    state::{Focus, UiState, filter_suggestions},
    theme::Theme,
};
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use photoscout_core::{
    Mode, QueryController,
    action::Action,
    dismissal::{DismissalWatcher, PointerHub},
    event::AppEvent,
    gateway::PhotoGateway,
    input::QueryInput,
    photo::{PhotoRecord, PhotoSize},
    suggestions::SuggestionStore,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use std::{
    cell::Cell,
    io,
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    time::{Duration, Instant},
};

/// Handle for dispatching background work
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
    cancel: Arc<AtomicBool>,
}

impl EventSender {
    /// Send an event from a background thread to the main loop
    pub fn send(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Rows moved per mouse wheel notch
const SCROLL_STEP: i32 = 3;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub debounce: Duration,
    pub scroll_threshold: usize,
}

type Opener = Box<dyn Fn(&str) -> io::Result<()>>;

/// Controller plus everything the terminal front end keeps next to it.
pub struct App {
    controller: QueryController,
    ui: UiState,
    matcher: SkimMatcherV2,
    scroll_threshold: usize,
    hub: PointerHub,
    watcher: DismissalWatcher,
    dismissed: Rc<Cell<bool>>,
    /// Error from the front end itself, shown until the next key press
    notice: Option<String>,
    opener: Opener,
}

impl App {
    pub fn new(controller: QueryController, scroll_threshold: usize) -> Self {
        let hub = PointerHub::default();
        let dismissed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&dismissed);
        let watcher = DismissalWatcher::attach(&hub, move || flag.set(true));
        Self {
            controller,
            ui: UiState::new(),
            matcher: SkimMatcherV2::default(),
            scroll_threshold,
            hub,
            watcher,
            dismissed,
            notice: None,
            opener: Box::new(|url: &str| open::that(url)),
        }
    }

    #[cfg(test)]
    fn with_opener(mut self, opener: impl Fn(&str) -> io::Result<()> + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    pub fn start(&mut self) {
        self.controller.start();
        self.controller.on_input_focused();
    }

    /// Issue any debounced search and fetch the next page when the selection nears the end.
    pub fn tick(&mut self, now: Instant) {
        self.controller.tick(now);
        let view = self.controller.view();
        let wants_more = view.mode == Mode::Searching
            && view.has_more
            && !view.is_loading
            && self.ui.near_end(view.items.len(), self.scroll_threshold);
        if wants_more {
            self.controller.on_scroll_near_end();
        }
    }

    /// Handle events from background tasks
    pub fn process_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FetchCompleted { request, result } => {
                self.controller.on_fetch_completed(&request, result);
            }
        }
        self.sync_selection();
    }

    /// Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        // Clear error on any keypress
        self.controller.clear_error();
        self.notice = None;

        let panel_open = !self.suggestion_entries().is_empty();
        match keymap::resolve_action(key, &self.ui, panel_open) {
            Some(action) => self.process_action(action, now),
            None => false,
        }
    }

    pub fn handle_mouse(&mut self, mouse_event: MouseEvent, now: Instant) {
        if let Some(pointer) = mouse::pointer_event(mouse_event) {
            self.hub.dispatch(&pointer);
        }
        if self.dismissed.replace(false) {
            self.dismiss_suggestions();
        }

        let (column, row) = (mouse_event.column, mouse_event.row);
        let layout = self.ui.layout;
        let contains = |rect: Option<ratatui::layout::Rect>| {
            rect.is_some_and(|r| mouse::region(r).contains(column, row))
        };

        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.ui.preview.is_some() {
                    self.ui.preview = None;
                } else if contains(layout.panel) {
                    let entries = self.suggestion_entries();
                    if let Some(panel) = layout.panel
                        && let Some(idx) = suggestions::entry_at(panel, row, entries.len())
                    {
                        self.accept_suggestion(&entries[idx]);
                    }
                } else if contains(layout.input) {
                    self.focus_input();
                } else if contains(layout.list) {
                    let len = self.controller.view().items.len();
                    if let Some(list) = layout.list
                        && let Some(idx) = photo_list::item_at(list, layout.list_offset, row, len)
                    {
                        self.ui.focus = Focus::Results;
                        self.ui.selected = Some(idx);
                    }
                }
            }
            MouseEventKind::ScrollDown if contains(layout.list) => {
                self.process_action(Action::MoveSelection(SCROLL_STEP), now);
            }
            MouseEventKind::ScrollUp if contains(layout.list) => {
                self.process_action(Action::MoveSelection(-SCROLL_STEP), now);
            }
            _ => {}
        }
    }

    /// Returns true when the app should exit.
    #[allow(clippy::too_many_lines)]
    pub fn process_action(&mut self, action: Action, now: Instant) -> bool {
        match action {
            Action::Quit => return true,

            Action::QueryPush(c) => self.edit_query(now, |input| input.insert_char(c)),
            Action::QueryPop => self.edit_query(now, |input| {
                input.backspace();
            }),
            Action::QueryDeleteWord => self.edit_query(now, |input| {
                input.delete_word();
            }),
            Action::QueryClear => self.edit_query(now, |input| {
                input.clear();
            }),
            Action::CursorLeft => self.controller.edit_query(now, QueryInput::cursor_left),
            Action::CursorRight => self.controller.edit_query(now, QueryInput::cursor_right),
            Action::CursorStart => self.controller.edit_query(now, QueryInput::cursor_start),
            Action::CursorEnd => self.controller.edit_query(now, QueryInput::cursor_end),
            Action::Submit => {
                let text = self.controller.query().to_string();
                self.controller.on_submit(&text);
                self.ui.selected = None;
                self.ui.suggestion_selected = None;
            }

            Action::MoveSelection(delta) => {
                let entries = self.suggestion_entries();
                if self.ui.focus == Focus::Input && !entries.is_empty() {
                    self.ui.move_suggestion(delta, entries.len());
                } else {
                    self.move_results(delta);
                }
            }
            Action::PageUp => self.move_results(-self.page_step()),
            Action::PageDown => self.move_results(self.page_step()),
            Action::MoveTop => {
                let len = self.controller.view().items.len();
                self.ui.selected = (len > 0).then_some(0);
            }
            Action::MoveBottom => {
                let len = self.controller.view().items.len();
                self.ui.selected = len.checked_sub(1);
            }

            Action::FocusInput => self.focus_input(),
            Action::FocusResults => self.focus_results(),
            Action::ToggleFocus => match self.ui.focus {
                Focus::Input => self.focus_results(),
                Focus::Results => self.focus_input(),
            },

            Action::AcceptSuggestion => {
                let entries = self.suggestion_entries();
                if let Some(entry) = self.ui.suggestion_selected.and_then(|i| entries.get(i)) {
                    self.accept_suggestion(entry);
                }
            }
            Action::DismissSuggestions => self.dismiss_suggestions(),

            Action::ActivatePhoto => self.ui.preview = self.selected_photo().cloned(),
            Action::ClosePreview => self.ui.preview = None,
            Action::OpenInBrowser => {
                let photo = self.ui.preview.as_ref().or_else(|| self.selected_photo());
                if let Some(url) = photo.map(|p| p.url(PhotoSize::Preview)) {
                    log::info!("Opening {url}");
                    if let Err(e) = (self.opener)(&url) {
                        log::warn!("Failed to open {url}: {e}");
                        self.notice = Some(format!("Failed to open {url}: {e}"));
                    }
                }
            }
        }
        self.sync_selection();
        false
    }

    fn edit_query(&mut self, now: Instant, edit: impl FnOnce(&mut QueryInput)) {
        let before = self.controller.query().to_string();
        self.controller.edit_query(now, edit);
        if self.controller.query() != before {
            self.ui.selected = None;
            self.ui.suggestion_selected = None;
        }
    }

    fn accept_suggestion(&mut self, entry: &str) {
        self.controller.on_suggestion_selected(entry);
        self.ui.selected = None;
        self.ui.suggestion_selected = None;
        self.ui.focus = Focus::Input;
    }

    fn dismiss_suggestions(&mut self) {
        self.controller.on_suggestions_dismissed();
        self.ui.suggestion_selected = None;
    }

    fn focus_input(&mut self) {
        self.ui.focus = Focus::Input;
        self.controller.on_input_focused();
    }

    fn focus_results(&mut self) {
        self.ui.focus = Focus::Results;
        self.dismiss_suggestions();
    }

    fn move_results(&mut self, delta: i32) {
        let len = self.controller.view().items.len();
        self.ui.move_selection(delta, len);
    }

    fn page_step(&self) -> i32 {
        i32::try_from(self.ui.layout.list_rows.max(1)).unwrap_or(i32::MAX)
    }

    fn selected_photo(&self) -> Option<&PhotoRecord> {
        let view = self.controller.view();
        let idx = self.ui.selected?;
        view.items.get(idx)
    }

    /// History entries currently offered in the panel, empty when it is hidden.
    fn suggestion_entries(&self) -> Vec<String> {
        let view = self.controller.view();
        if !view.suggestions_visible {
            return Vec::new();
        }
        filter_suggestions(
            &self.matcher,
            view.suggestions.as_slice(),
            self.controller.query(),
        )
        .into_iter()
        .map(ToString::to_string)
        .collect()
    }

    fn sync_selection(&mut self) {
        let len = self.controller.view().items.len();
        self.ui.clamp_selection(len);
        let entries = self.suggestion_entries().len();
        if self.ui.suggestion_selected.is_some_and(|sel| sel >= entries) {
            self.ui.suggestion_selected = None;
        }
    }

    /// Hand the regions drawn on the last frame to the dismissal watcher.
    fn track_layout(&self) {
        self.watcher
            .track(self.ui.layout.input_region(), self.ui.layout.panel_region());
    }

    pub fn draw(&mut self, f: &mut Frame, theme: &Theme, spinner: &str) {
        let area = f.area();
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
        let (input_area, list_area, status_area) = (chunks[0], chunks[1], chunks[2]);

        let entries = self.suggestion_entries();
        let view = self.controller.view();
        let input = self.controller.input();

        search_bar::draw(
            f,
            input_area,
            &search_bar::SearchBarProps {
                text: input.text(),
                cursor: input.cursor(),
                focused: self.ui.focus == Focus::Input && self.ui.preview.is_none(),
                spinner: view.is_loading.then_some(spinner),
            },
            theme,
        );

        let offset = photo_list::draw(
            f,
            list_area,
            &photo_list::PhotoListProps {
                view: &view,
                selected: self.ui.selected,
                offset: self.ui.layout.list_offset,
                focused: self.ui.focus == Focus::Results,
            },
            theme,
        );

        let error = self.notice.clone().or_else(|| view.error.clone());
        status_bar::draw(f, status_area, &view, error.as_deref(), theme);

        let panel = if entries.is_empty() {
            None
        } else {
            let bounds = ratatui::layout::Rect {
                height: area.height.saturating_sub(status_area.height),
                ..area
            };
            components::dropdown_rect(input_area, entries.len(), bounds)
        };
        if let Some(panel_area) = panel {
            let refs: Vec<&str> = entries.iter().map(String::as_str).collect();
            suggestions::draw(f, panel_area, &refs, self.ui.suggestion_selected, theme);
        }

        if let Some(photo) = &self.ui.preview {
            components::preview::draw(f, area, photo, theme);
        }

        self.ui.layout.input = Some(input_area);
        self.ui.layout.panel = panel;
        self.ui.layout.list = Some(list_area);
        self.ui.layout.list_rows = usize::from(list_area.height.saturating_sub(2));
        self.ui.layout.list_offset = offset;
        self.track_layout();
    }
}

fn spinner_frame(start: Instant) -> &'static str {
    let elapsed = usize::try_from(start.elapsed().as_millis()).unwrap_or(0);
    SPINNER_FRAMES[(elapsed / 80) % SPINNER_FRAMES.len()]
}

pub fn run(
    terminal: &mut DefaultTerminal,
    gateway: Arc<dyn PhotoGateway>,
    history: SuggestionStore,
    options: &RunOptions,
    theme: &Theme,
) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let cancel = Arc::new(AtomicBool::new(false));
    let event_sender = EventSender {
        tx,
        cancel: Arc::clone(&cancel),
    };
    let dispatcher = ThreadDispatcher::new(gateway, event_sender);
    let controller =
        QueryController::new(history, Box::new(dispatcher)).with_debounce(options.debounce);
    let mut app = App::new(controller, options.scroll_threshold);
    let _mouse = MouseCapture::enable()?;
    let spinner_start = Instant::now();

    app.start();

    loop {
        app.tick(Instant::now());
        terminal.draw(|f| app.draw(f, theme, spinner_frame(spinner_start)))?;

        // Check background channel (non-blocking)
        if let Ok(app_event) = rx.try_recv() {
            app.process_app_event(app_event);
            continue;
        }

        // Poll terminal events with a timeout so we can update spinner + check channel
        if event::poll(Duration::from_millis(80))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key, Instant::now()) {
                        // Signal cancellation to background threads
                        cancel.store(true, Ordering::Relaxed);
                        return Ok(());
                    }
                }
                Event::Mouse(mouse_event) => app.handle_mouse(mouse_event, Instant::now()),
                _ => {}
            }
        }
    }
}
