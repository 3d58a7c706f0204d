use super::backend::{StorageBackend, SESSION_KEY, TREE_KEY};
use crate::error::Result;
use crate::session::Session;
use crate::tree::Tree;
use log::{debug, warn};
use std::path::PathBuf;

/// The tree document bound to a storage backend.
pub struct CardStore<B: StorageBackend> {
    pub backend: B,
}

impl<B: StorageBackend> CardStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Current tree. An empty store reads as a root-only tree.
    pub fn load(&self) -> Result<Tree> {
        match self.backend.load(TREE_KEY)? {
            Some(text) => Tree::from_json(&text),
            None => Ok(Tree::new()),
        }
    }

    pub fn save(&self, tree: &Tree) -> Result<()> {
        let text = tree.to_json()?;
        self.backend.save(TREE_KEY, &text)?;
        debug!(
            "saved tree: {} folders, {} cards",
            tree.folder_count(),
            tree.card_count()
        );
        Ok(())
    }

    /// Loads, applies `op`, and saves only if `op` succeeded.
    pub fn mutate<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Tree) -> Result<T>,
    {
        let mut tree = self.load()?;
        let out = op(&mut tree)?;
        self.save(&tree)?;
        Ok(out)
    }

    /// Whether a tree document has ever been written.
    pub fn has_data(&self) -> Result<bool> {
        Ok(self.backend.load(TREE_KEY)?.is_some())
    }

    pub fn tree_location(&self) -> PathBuf {
        self.backend.location(TREE_KEY)
    }

    /// Saved session, or a fresh one at root. An unreadable session is discarded.
    pub fn load_session(&self) -> Result<Session> {
        match self.backend.load(SESSION_KEY)? {
            Some(text) => match serde_json::from_str(&text) {
                Ok(session) => Ok(session),
                Err(e) => {
                    warn!("ignoring unreadable session: {}", e);
                    Ok(Session::default())
                }
            },
            None => Ok(Session::default()),
        }
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        let text = serde_json::to_string_pretty(session)?;
        self.backend.save(SESSION_KEY, &text)
    }
}
