use crate::error::Result;
use std::path::PathBuf;

/// Key of the folder/card document.
pub const TREE_KEY: &str = "tree";

/// Key of the navigation session.
pub const SESSION_KEY: &str = "session";

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `CardStore` handles the "what".
pub trait StorageBackend {
    /// Read the text stored under `key`.
    /// Returns Ok(None) if nothing was ever stored there.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the text stored under `key`.
    /// MUST be atomic: a reader sees either the old or the new text.
    fn save(&self, key: &str, text: &str) -> Result<()>;

    /// Where `key` lives. A real path for `FsBackend`, a virtual one otherwise.
    fn location(&self, key: &str) -> PathBuf;
}
