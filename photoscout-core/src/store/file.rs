use super::KeyValueStore;
use crate::paths::state_dir;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

const STORE_FILE_NAME: &str = "store.toml";
const STORE_STATE_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

pub fn default_store_file() -> PathBuf {
    state_dir().join(STORE_FILE_NAME)
}

/// TOML file of string values, re-read on every access so that concurrent
/// processes see each other's writes.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    fn check_version(&self, file: StoreFile) -> Result<StoreFile> {
        if file.version != STORE_STATE_VERSION {
            anyhow::bail!(
                "unsupported store version {} in {}",
                file.version,
                self.path.display()
            );
        }
        Ok(file)
    }

    fn read(&self) -> Result<Option<StoreFile>> {
        let Some(contents) = self.read_contents()? else {
            return Ok(None);
        };
        let parsed: StoreFile = toml::from_str(&contents)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        self.check_version(parsed).map(Some)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.and_then(|mut file| file.entries.remove(key)))
    }

    /// Only a missing file or one that is not valid TOML is started afresh. A
    /// file from another version, or one that cannot be read, is left untouched.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut file = match self.read_contents()? {
            None => StoreFile::default(),
            Some(contents) => match toml::from_str::<StoreFile>(&contents) {
                Ok(parsed) => self.check_version(parsed)?,
                Err(e) => {
                    log::warn!("Replacing corrupt store {}: {e}", self.path.display());
                    StoreFile::default()
                }
            },
        };
        file.version = STORE_STATE_VERSION;
        file.entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string(&file)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}
