//! Persisted key-value capability.
//!
//! The suggestion history only needs `get`/`set` on string values; where those
//! strings live is up to the implementation.

pub mod file;
pub mod memory;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

use anyhow::Result;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
