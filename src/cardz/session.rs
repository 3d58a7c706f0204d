//! Navigation state: which folder the user is "in".
//!
//! The session is persisted next to the tree so the CLI remembers the current
//! folder between invocations. It only ever holds an id; when that id stops
//! existing (the folder was deleted, or a replace-import swapped the tree) the
//! session falls back to root on the next [`Session::resolve_after_change`].

use crate::error::Result;
use crate::id::ROOT_ID;
use crate::model::Folder;
use crate::tree::Tree;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub current_folder: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            current_folder: ROOT_ID.to_string(),
        }
    }
}

impl Session {
    pub fn navigate(&mut self, tree: &Tree, folder_id: &str) -> Result<()> {
        tree.folder(folder_id)?;
        self.current_folder = folder_id.to_string();
        Ok(())
    }

    /// Moves to the parent folder. Stays put at root. Returns whether it moved.
    pub fn up(&mut self, tree: &Tree) -> Result<bool> {
        let current = tree.folder(&self.current_folder)?;
        match &current.parent_id {
            Some(parent) => {
                self.current_folder = parent.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Breadcrumb from root to the current folder.
    pub fn current_path<'a>(&self, tree: &'a Tree) -> Result<Vec<&'a Folder>> {
        tree.folder_path(&self.current_folder)
    }

    /// Snaps back to root when the current folder no longer exists.
    /// Returns true if the session changed.
    pub fn resolve_after_change(&mut self, tree: &Tree) -> bool {
        if tree.folders.contains_key(&self.current_folder) {
            return false;
        }
        log::debug!(
            "session folder {} is gone, returning to root",
            self.current_folder
        );
        self.current_folder = ROOT_ID.to_string();
        true
    }

    pub fn is_at_root(&self) -> bool {
        self.current_folder == ROOT_ID
    }
}
