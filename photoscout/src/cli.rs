use photoscout_core::{
    config::HistoryConfig,
    gateway::PhotoGateway,
    photo::{PhotoRecord, PhotoSize},
    store::{FileKeyValueStore, MemoryKeyValueStore, file::default_store_file},
    suggestions::SuggestionStore,
};
use serde::Serialize;
use std::fmt::Write;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone)]
pub struct CliError {
    message: String,
    code: i32,
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 1,
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 2,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(value: anyhow::Error) -> Self {
        Self::system(format!("{value:#}"))
    }
}

impl From<photoscout_core::FetchError> for CliError {
    fn from(value: photoscout_core::FetchError) -> Self {
        Self::system(value.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct SearchArgs {
    pub query: String,
    pub page: u32,
    pub json: bool,
    pub no_history: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct PhotoOutput {
    id: String,
    title: String,
    thumbnail_url: String,
    preview_url: String,
}

impl From<&PhotoRecord> for PhotoOutput {
    fn from(photo: &PhotoRecord) -> Self {
        Self {
            id: photo.id.clone(),
            title: photo.title.clone(),
            thumbnail_url: photo.url(PhotoSize::Thumbnail),
            preview_url: photo.url(PhotoSize::Preview),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct SearchOutput {
    query: String,
    page: u32,
    photos: Vec<PhotoOutput>,
}

/// File-backed history when enabled, a throwaway in-memory one otherwise.
pub fn open_history(config: &HistoryConfig) -> SuggestionStore {
    let store = if config.enabled {
        let path = config.resolved_file().unwrap_or_else(default_store_file);
        log::debug!("History store at {}", path.display());
        SuggestionStore::open(Box::new(FileKeyValueStore::new(path)))
    } else {
        SuggestionStore::open(Box::new(MemoryKeyValueStore::new()))
    };
    store.with_max_entries(config.max_entries)
}

pub fn cmd_search(
    gateway: &dyn PhotoGateway,
    history: &mut SuggestionStore,
    args: &SearchArgs,
) -> CliResult<()> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(CliError::user("search query must not be empty"));
    }
    if args.page == 0 {
        return Err(CliError::user("--page must be at least 1"));
    }

    if !args.no_history
        && let Err(e) = history.record_query(query)
    {
        log::warn!("Failed to save search history: {e:#}");
        eprintln!("Warning: failed to save search history: {e:#}");
    }

    let photos = gateway.fetch_search(query, args.page)?;
    let output = SearchOutput {
        query: query.to_string(),
        page: args.page,
        photos: photos.iter().map(PhotoOutput::from).collect(),
    };

    if args.json {
        print_json(&output)?;
    } else if output.photos.is_empty() {
        println!("No results for '{query}' (page {}).", args.page);
    } else {
        print!("{}", format_photo_table(&output.photos));
    }
    Ok(())
}

pub fn cmd_recent(gateway: &dyn PhotoGateway, json: bool) -> CliResult<()> {
    let photos: Vec<PhotoOutput> = gateway
        .fetch_default()?
        .iter()
        .map(PhotoOutput::from)
        .collect();

    if json {
        print_json(&photos)?;
    } else if photos.is_empty() {
        println!("No recent photos.");
    } else {
        print!("{}", format_photo_table(&photos));
    }
    Ok(())
}

pub fn cmd_history(history: &SuggestionStore, json: bool) -> CliResult<()> {
    let entries: Vec<String> = history.list_suggestions().collect();
    if json {
        print_json(&entries)?;
    } else if entries.is_empty() {
        println!("No saved searches.");
    } else {
        for entry in entries {
            println!("{entry}");
        }
    }
    Ok(())
}

fn format_photo_table(photos: &[PhotoOutput]) -> String {
    let id_header = "id";
    let title_header = "title";
    let id_width = photos
        .iter()
        .map(|photo| photo.id.len())
        .max()
        .unwrap_or(id_header.len())
        .max(id_header.len());
    let title_width = photos
        .iter()
        .map(|photo| photo.title.chars().count())
        .max()
        .unwrap_or(title_header.len())
        .max(title_header.len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{id_header:<id_width$}  {title_header:<title_width$}  url"
    );
    for photo in photos {
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<title_width$}  {}",
            photo.id, photo.title, photo.preview_url
        );
    }
    out
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string(value).map_err(|e| CliError::system(e.to_string()))?
    );
    Ok(())
}

pub fn print_error(error: &CliError, json: bool) {
    if json {
        let payload = serde_json::json!({ "error": error.message() });
        eprintln!("{payload}");
    } else {
        eprintln!("Error: {}", error.message());
    }
}
