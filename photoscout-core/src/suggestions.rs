use crate::store::KeyValueStore;
use anyhow::Result;
use std::{collections::HashSet, sync::Arc};

/// Key the history lives under in the backing store.
pub const HISTORY_KEY: &str = "searchQueries";

/// Deduplicated, lower-cased history of submitted queries, oldest first.
pub struct SuggestionStore {
    backend: Box<dyn KeyValueStore>,
    snapshot: Arc<[String]>,
    max_entries: Option<usize>,
}

impl SuggestionStore {
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        let snapshot = load_entries(backend.as_ref()).unwrap_or_default().into();
        Self {
            backend,
            snapshot,
            max_entries: None,
        }
    }

    /// Cap the history, dropping the oldest entries once it is exceeded.
    /// `None` keeps every entry.
    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries.filter(|max| *max > 0);
        self
    }

    /// Case-fold `text` and append it unless already present.
    ///
    /// Returns whether a new entry was stored. Blank input is ignored.
    pub fn record_query(&mut self, text: &str) -> Result<bool> {
        let query = text.trim().to_lowercase();
        if query.is_empty() {
            return Ok(false);
        }

        // Re-read so writes from another process are not clobbered.
        let mut entries =
            load_entries(self.backend.as_ref()).unwrap_or_else(|| self.snapshot.to_vec());
        if entries.contains(&query) {
            self.snapshot = entries.into();
            return Ok(false);
        }

        entries.push(query);
        if let Some(max) = self.max_entries
            && entries.len() > max
        {
            let excess = entries.len() - max;
            entries.drain(..excess);
        }

        self.backend
            .set(HISTORY_KEY, &serde_json::to_string(&entries)?)?;
        log::info!("Recorded search query ({} in history)", entries.len());
        self.snapshot = entries.into();
        Ok(true)
    }

    /// A snapshot of the history. Later writes never affect a snapshot already taken.
    pub fn list_suggestions(&self) -> Suggestions {
        Suggestions {
            entries: Arc::clone(&self.snapshot),
            pos: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

/// `None` when the backend itself failed; a corrupt value loads as empty.
fn load_entries(backend: &dyn KeyValueStore) -> Option<Vec<String>> {
    let raw = match backend.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Some(Vec::new()),
        Err(e) => {
            log::warn!("Failed to read search history: {e:#}");
            return None;
        }
    };

    let parsed: Vec<String> = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("Ignoring corrupt search history: {e}");
            return Some(Vec::new());
        }
    };

    let mut seen = HashSet::with_capacity(parsed.len());
    Some(
        parsed
            .into_iter()
            .map(|entry| entry.trim().to_lowercase())
            .filter(|entry| !entry.is_empty() && seen.insert(entry.clone()))
            .collect(),
    )
}

/// Iterator over a history snapshot. Clone it to iterate again from the start.
#[derive(Debug, Clone)]
pub struct Suggestions {
    entries: Arc<[String]>,
    pos: usize,
}

impl Suggestions {
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }
}

impl Iterator for Suggestions {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let entry = self.entries.get(self.pos)?.clone();
        self.pos += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Suggestions {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileKeyValueStore, MemoryKeyValueStore};

    fn memory_store() -> (SuggestionStore, MemoryKeyValueStore) {
        let backend = MemoryKeyValueStore::new();
        (SuggestionStore::open(Box::new(backend.clone())), backend)
    }

    #[test]
    fn test_record_is_case_folded_and_deduplicated() {
        let (mut store, backend) = memory_store();
        assert!(store.record_query("Cat").unwrap());
        assert!(!store.record_query("cat").unwrap());
        assert!(!store.record_query("  CAT ").unwrap());

        assert_eq!(store.list_suggestions().collect::<Vec<_>>(), vec!["cat"]);
        assert_eq!(backend.raw(HISTORY_KEY).as_deref(), Some(r#"["cat"]"#));
    }

    #[test]
    fn test_insertion_order_kept() {
        let (mut store, _) = memory_store();
        for q in ["dogs", "cats", "owls", "cats"] {
            store.record_query(q).unwrap();
        }
        assert_eq!(
            store.list_suggestions().collect::<Vec<_>>(),
            vec!["dogs", "cats", "owls"]
        );
    }

    #[test]
    fn test_blank_query_ignored() {
        let (mut store, backend) = memory_store();
        assert!(!store.record_query("   ").unwrap());
        assert!(store.is_empty());
        assert!(backend.raw(HISTORY_KEY).is_none());
    }

    #[test]
    fn test_snapshot_unaffected_by_later_writes() {
        let (mut store, _) = memory_store();
        store.record_query("dogs").unwrap();

        let mut snapshot = store.list_suggestions();
        assert_eq!(snapshot.next().as_deref(), Some("dogs"));
        store.record_query("cats").unwrap();
        assert_eq!(snapshot.next(), None);

        assert_eq!(store.list_suggestions().len(), 2);
    }

    #[test]
    fn test_snapshot_is_restartable() {
        let (mut store, _) = memory_store();
        store.record_query("a").unwrap();
        store.record_query("b").unwrap();

        let suggestions = store.list_suggestions();
        let first: Vec<_> = suggestions.clone().collect();
        let second: Vec<_> = suggestions.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_loads_existing_history_and_normalises_it() {
        let backend =
            MemoryKeyValueStore::new().with_entry(HISTORY_KEY, r#"["Cats","cats","dogs",""]"#);
        let store = SuggestionStore::open(Box::new(backend));
        assert_eq!(store.list_suggestions().as_slice(), ["cats", "dogs"]);
    }

    #[test]
    fn test_corrupt_history_loads_empty_and_is_overwritten() {
        let backend = MemoryKeyValueStore::new().with_entry(HISTORY_KEY, "{not json");
        let mut store = SuggestionStore::open(Box::new(backend.clone()));
        assert!(store.is_empty());

        store.record_query("owls").unwrap();
        assert_eq!(backend.raw(HISTORY_KEY).as_deref(), Some(r#"["owls"]"#));
    }

    #[test]
    fn test_write_failure_propagates_and_keeps_snapshot() {
        let (mut store, backend) = memory_store();
        store.record_query("dogs").unwrap();
        backend.fail_writes(true);

        assert!(store.record_query("cats").is_err());
        assert_eq!(store.list_suggestions().as_slice(), ["dogs"]);
    }

    #[test]
    fn test_sees_writes_from_other_handles() {
        let backend = MemoryKeyValueStore::new();
        let mut first = SuggestionStore::open(Box::new(backend.clone()));
        let mut second = SuggestionStore::open(Box::new(backend.clone()));

        first.record_query("dogs").unwrap();
        second.record_query("cats").unwrap();
        assert_eq!(backend.raw(HISTORY_KEY).as_deref(), Some(r#"["dogs","cats"]"#));
    }

    #[test]
    fn test_max_entries_drops_oldest() {
        let (store, _) = memory_store();
        let mut store = store.with_max_entries(Some(2));
        for q in ["a", "b", "c"] {
            store.record_query(q).unwrap();
        }
        assert_eq!(store.list_suggestions().as_slice(), ["b", "c"]);
    }

    #[test]
    fn test_file_backed_history_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");
        {
            let mut store = SuggestionStore::open(Box::new(FileKeyValueStore::new(&path)));
            store.record_query("Northern Lights").unwrap();
        }
        let store = SuggestionStore::open(Box::new(FileKeyValueStore::new(&path)));
        assert_eq!(store.list_suggestions().as_slice(), ["northern lights"]);
    }

    #[test]
    fn test_newer_store_file_keeps_its_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");
        std::fs::write(
            &path,
            "version = 2\n[entries]\nsearchQueries = '[\"cats\",\"dogs\"]'\nother = \"keep\"\n",
        )
        .unwrap();

        let mut store = SuggestionStore::open(Box::new(FileKeyValueStore::new(&path)));
        assert!(store.record_query("owls").is_err());

        let after = std::fs::read_to_string(&path).unwrap();
        assert!(after.contains("cats") && after.contains("keep"), "{after}");
        assert!(!after.contains("owls"), "{after}");
    }
}
