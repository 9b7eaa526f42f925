use crate::{
    dispatch::{FetchDispatcher, FetchRequest, FetchTarget},
    error::FetchError,
    input::QueryInput,
    photo::PhotoRecord,
    session::{Applied, Generation, SearchSession},
    suggestions::{SuggestionStore, Suggestions},
};
use std::time::{Duration, Instant};

/// What the gallery is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Default feed, no query text
    Browsing,
    /// Results for the current query text
    Searching,
}

/// The default feed: a single page, replaced wholesale on refresh.
#[derive(Debug, Default)]
struct Feed {
    generation: Generation,
    photos: Vec<PhotoRecord>,
    loading: bool,
    error: Option<FetchError>,
}

/// Everything presentation needs for one frame.
#[derive(Debug, Clone)]
pub struct ViewModel<'a> {
    pub mode: Mode,
    pub is_loading: bool,
    pub items: &'a [PhotoRecord],
    pub has_more: bool,
    pub suggestions: Suggestions,
    pub suggestions_visible: bool,
    /// The search finished without producing anything to show
    pub no_results: bool,
    pub error: Option<String>,
}

/// Single owner of "what is currently being shown".
///
/// Every fetch leaves through the [`FetchDispatcher`] tagged with a [`Generation`];
/// responses come back through [`QueryController::on_fetch_completed`] and are
/// applied only if their generation is still the active one.
pub struct QueryController {
    input: QueryInput,
    mode: Mode,
    session: Option<SearchSession>,
    feed: Feed,
    last_generation: Generation,
    /// Set while the page-1 fetch of a freshly typed query waits out the debounce
    pending_since: Option<Instant>,
    debounce: Duration,
    history: SuggestionStore,
    suggestions_visible: bool,
    error: Option<String>,
    dispatcher: Box<dyn FetchDispatcher>,
}

impl QueryController {
    pub fn new(history: SuggestionStore, dispatcher: Box<dyn FetchDispatcher>) -> Self {
        Self {
            input: QueryInput::new(),
            mode: Mode::Browsing,
            session: None,
            feed: Feed::default(),
            last_generation: Generation::default(),
            pending_since: None,
            debounce: Duration::ZERO,
            history,
            suggestions_visible: false,
            error: None,
            dispatcher,
        }
    }

    /// Delay between the last keystroke and the page-1 fetch. Zero fetches immediately.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Load the default feed.
    pub fn start(&mut self) {
        self.last_generation = self.last_generation.next();
        self.feed.generation = self.last_generation;
        self.feed.loading = true;
        self.feed.error = None;
        self.dispatcher.dispatch(FetchRequest {
            generation: self.feed.generation,
            target: FetchTarget::Default,
        });
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    pub fn query(&self) -> &str {
        self.input.text()
    }

    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn history(&self) -> &SuggestionStore {
        &self.history
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Replace the query text wholesale. Any change to the text restarts the search.
    pub fn on_query_text_changed(&mut self, text: &str, now: Instant) {
        if self.input.text() == text {
            return;
        }
        self.input.set(text);
        self.query_changed(now);
    }

    /// Apply an in-place edit; the search restarts only if the text changed.
    pub fn edit_query(&mut self, now: Instant, edit: impl FnOnce(&mut QueryInput)) {
        let before = self.input.text().to_string();
        edit(&mut self.input);
        if self.input.text() != before {
            self.query_changed(now);
        }
    }

    fn query_changed(&mut self, now: Instant) {
        let query = self.input.text().trim();
        if query.is_empty() {
            self.mode = Mode::Browsing;
            self.session = None;
            self.pending_since = None;
            return;
        }

        self.mode = Mode::Searching;
        let query = query.to_string();
        self.start_session(query);

        if self.debounce.is_zero() {
            self.pending_since = None;
            self.issue_page();
        } else {
            self.pending_since = Some(now);
        }
    }

    /// Issue the debounced page-1 fetch once the quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(since) = self.pending_since
            && now.saturating_duration_since(since) >= self.debounce
        {
            self.pending_since = None;
            self.issue_page();
        }
    }

    /// Persist the query and restart its search from page 1, even when it is
    /// already the active query.
    pub fn on_submit(&mut self, text: &str) {
        let query = text.trim();
        if query.is_empty() {
            return;
        }

        if let Err(e) = self.history.record_query(query) {
            log::warn!("Failed to save search history: {e:#}");
            self.error = Some(format!("Failed to save search history: {e}"));
        }

        if self.input.text().trim() != query {
            self.input.set(query);
        }
        self.mode = Mode::Searching;
        self.pending_since = None;
        self.start_session(query.to_string());
        self.issue_page();
    }

    /// Request the next page. Returns whether a fetch was issued.
    pub fn on_scroll_near_end(&mut self) -> bool {
        if self.mode != Mode::Searching || self.pending_since.is_some() {
            return false;
        }
        match &self.session {
            Some(session) if session.has_more() && !session.is_loading() => self.issue_page(),
            _ => false,
        }
    }

    pub fn on_suggestion_selected(&mut self, text: &str) {
        self.suggestions_visible = false;
        self.on_submit(text);
    }

    pub fn on_input_focused(&mut self) {
        self.suggestions_visible = true;
    }

    pub fn on_suggestions_dismissed(&mut self) {
        self.suggestions_visible = false;
    }

    /// Response boundary: offer a completed fetch to whichever state it targets.
    pub fn on_fetch_completed(
        &mut self,
        request: &FetchRequest,
        result: Result<Vec<PhotoRecord>, FetchError>,
    ) -> Applied {
        let applied = match &request.target {
            FetchTarget::Default => self.apply_feed(request.generation, result),
            FetchTarget::Search { page, .. } => match self.session.as_mut() {
                Some(session) => session.apply(request.generation, *page, result),
                None => Applied::Stale,
            },
        };

        match applied {
            Applied::Stale => log::debug!(
                "Dropping stale response {} for {:?}",
                request.generation,
                request.target
            ),
            Applied::Failed => log::warn!("Fetch failed for {:?}", request.target),
            Applied::Appended(count) => log::debug!(
                "Applied {count} records from {} for {:?}",
                request.generation,
                request.target
            ),
            Applied::Exhausted => log::debug!("No more results for {:?}", request.target),
        }
        applied
    }

    fn apply_feed(
        &mut self,
        generation: Generation,
        result: Result<Vec<PhotoRecord>, FetchError>,
    ) -> Applied {
        if generation != self.feed.generation || !self.feed.loading {
            return Applied::Stale;
        }
        self.feed.loading = false;
        match result {
            Ok(photos) if photos.is_empty() => {
                self.feed.photos.clear();
                Applied::Exhausted
            }
            Ok(photos) => {
                let count = photos.len();
                self.feed.photos = photos;
                Applied::Appended(count)
            }
            Err(error) => {
                self.feed.error = Some(error);
                Applied::Failed
            }
        }
    }

    fn start_session(&mut self, query: String) {
        self.last_generation = self.last_generation.next();
        log::info!("New search {} for {query:?}", self.last_generation);
        self.session = Some(SearchSession::new(query, self.last_generation));
    }

    fn issue_page(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(page) = session.begin_fetch() else {
            return false;
        };
        let request = FetchRequest {
            generation: session.generation(),
            target: FetchTarget::Search {
                query: session.query().to_string(),
                page,
            },
        };
        log::debug!("Dispatching {request:?}");
        self.dispatcher.dispatch(request);
        true
    }

    pub fn view(&self) -> ViewModel<'_> {
        let suggestions = self.history.list_suggestions();
        let suggestions_visible = self.suggestions_visible && !suggestions.as_slice().is_empty();

        match (self.mode, &self.session) {
            (Mode::Searching, Some(session)) => {
                let is_loading = self.pending_since.is_some() || session.is_loading();
                ViewModel {
                    mode: Mode::Searching,
                    is_loading,
                    items: session.results(),
                    has_more: session.has_more(),
                    suggestions,
                    suggestions_visible,
                    no_results: !is_loading && session.results().is_empty(),
                    error: session
                        .error()
                        .map(ToString::to_string)
                        .or_else(|| self.error.clone()),
                }
            }
            _ => ViewModel {
                mode: Mode::Browsing,
                is_loading: self.feed.loading,
                items: &self.feed.photos,
                has_more: false,
                suggestions,
                suggestions_visible,
                no_results: false,
                error: self
                    .feed
                    .error
                    .as_ref()
                    .map(ToString::to_string)
                    .or_else(|| self.error.clone()),
            },
        }
    }
}
