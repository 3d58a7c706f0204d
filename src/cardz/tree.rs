//! # The Folder/Card Tree
//!
//! [`Tree`] is the whole library: two flat, insertion-ordered maps keyed by id.
//!
//! ```text
//! folders: { "root": Folder { parent_id: None, subfolders: [a, b], cards: [c1] },
//!            "a":    Folder { parent_id: "root", ... }, ... }
//! cards:   { "c1":   Card { folder_id: "root", ... }, ... }
//! ```
//!
//! Linkage is by id only: a folder's `parent_id` and a card's `folder_id` are looked up
//! in the maps, never held as references. Every relation is stored twice (the child's
//! back-reference and the parent's ordered sequence) and every mutation here updates
//! both sides, so after any `Ok` return:
//!
//! - exactly one folder (`root`) has no parent, and every other parent chain ends there;
//! - a folder id is in its parent's `subfolders` exactly once;
//! - a card id is in exactly one folder's `cards`, the one named by its `folder_id`;
//! - sibling folder names are unique (case-insensitive).
//!
//! Operations validate everything before touching the maps, so an `Err` leaves the
//! tree as it was.
//!
//! The serialized form of `Tree` is the interchange document: it is both what the
//! store keeps at rest and what export writes.

use crate::error::{CardzError, Result};
use crate::id::{self, ROOT_ID, ROOT_NAME};
use crate::model::{filter_cards, require_text, Card, Entry, Folder};
use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub folders: IndexMap<String, Folder>,
    pub cards: IndexMap<String, Card>,
}

/// Everything a cascading delete took out of the tree.
#[derive(Debug, Default, Clone)]
pub struct Removed {
    pub folders: Vec<Folder>,
    pub cards: Vec<Card>,
}

/// One row of a depth-first walk from root.
#[derive(Debug, Clone)]
pub struct OutlineRow {
    pub depth: usize,
    pub folder: Folder,
    pub card_count: usize,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// A tree holding only the root folder.
    pub fn new() -> Self {
        let mut folders = IndexMap::new();
        folders.insert(
            ROOT_ID.to_string(),
            Folder::new(ROOT_ID.to_string(), ROOT_NAME.to_string(), None),
        );
        Self {
            folders,
            cards: IndexMap::new(),
        }
    }

    pub fn folder(&self, id: &str) -> Result<&Folder> {
        self.folders
            .get(id)
            .ok_or_else(|| CardzError::FolderNotFound(id.to_string()))
    }

    fn folder_mut(&mut self, id: &str) -> Result<&mut Folder> {
        self.folders
            .get_mut(id)
            .ok_or_else(|| CardzError::FolderNotFound(id.to_string()))
    }

    pub fn card(&self, id: &str) -> Result<&Card> {
        self.cards
            .get(id)
            .ok_or_else(|| CardzError::CardNotFound(id.to_string()))
    }

    fn card_mut(&mut self, id: &str) -> Result<&mut Card> {
        self.cards
            .get_mut(id)
            .ok_or_else(|| CardzError::CardNotFound(id.to_string()))
    }

    /// Number of folders, root excluded.
    pub fn folder_count(&self) -> usize {
        self.folders.len().saturating_sub(1)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// True when there is nothing besides the root folder.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.folders.len() <= 1
    }

    fn ensure_unique_name(&self, parent_id: &str, name: &str, exclude: Option<&str>) -> Result<()> {
        let parent = self.folder(parent_id)?;
        let wanted = name.trim().to_lowercase();
        let clash = parent
            .subfolders
            .iter()
            .filter(|id| Some(id.as_str()) != exclude)
            .filter_map(|id| self.folders.get(id))
            .any(|f| f.name.trim().to_lowercase() == wanted);
        if clash {
            return Err(CardzError::DuplicateName {
                name: name.to_string(),
                parent: parent.name.clone(),
            });
        }
        Ok(())
    }

    // --- Folders ---

    pub fn create_folder(&mut self, name: &str, parent_id: &str) -> Result<String> {
        self.folder(parent_id)?;
        let name = require_text(name, "Folder name")?;
        self.ensure_unique_name(parent_id, &name, None)?;

        let folder_id = id::folder_id(|candidate| self.folders.contains_key(candidate));
        self.folders.insert(
            folder_id.clone(),
            Folder::new(folder_id.clone(), name, Some(parent_id.to_string())),
        );
        self.folder_mut(parent_id)?.subfolders.push(folder_id.clone());
        Ok(folder_id)
    }

    pub fn rename_folder(&mut self, id: &str, new_name: &str) -> Result<()> {
        if id == ROOT_ID {
            return Err(CardzError::Forbidden(
                "the root folder cannot be renamed".to_string(),
            ));
        }
        let parent_id = self.folder(id)?.parent_id.clone();
        let name = require_text(new_name, "Folder name")?;
        if let Some(parent_id) = parent_id.filter(|p| self.folders.contains_key(p)) {
            self.ensure_unique_name(&parent_id, &name, Some(id))?;
        }
        self.folder_mut(id)?.name = name;
        Ok(())
    }

    /// Deletes a folder with all of its descendant folders and every card they hold.
    pub fn delete_folder(&mut self, id: &str) -> Result<Removed> {
        if id == ROOT_ID {
            return Err(CardzError::Forbidden(
                "the root folder cannot be deleted".to_string(),
            ));
        }
        let parent_id = self.folder(id)?.parent_id.clone();
        let doomed = self.subtree_ids(id)?;
        let doomed_set: HashSet<&str> = doomed.iter().map(String::as_str).collect();

        let mut removed = Removed::default();
        for folder_id in &doomed {
            if let Some(folder) = self.folders.shift_remove(folder_id) {
                for card_id in &folder.cards {
                    if let Some(card) = self.cards.shift_remove(card_id) {
                        removed.cards.push(card);
                    }
                }
                removed.folders.push(folder);
            }
        }

        // Cards pointing into the deleted subtree without being listed there.
        let strays: Vec<String> = self
            .cards
            .iter()
            .filter(|(_, c)| doomed_set.contains(c.folder_id.as_str()))
            .map(|(key, _)| key.clone())
            .collect();
        for card_id in strays {
            if let Some(card) = self.cards.shift_remove(&card_id) {
                removed.cards.push(card);
            }
        }

        if let Some(parent_id) = parent_id {
            if let Some(parent) = self.folders.get_mut(&parent_id) {
                parent.subfolders.retain(|s| s != id);
            }
        }
        Ok(removed)
    }

    pub fn move_folder(&mut self, id: &str, new_parent_id: &str) -> Result<()> {
        if id == ROOT_ID {
            return Err(CardzError::Forbidden(
                "the root folder cannot be moved".to_string(),
            ));
        }
        let name = self.folder(id)?.name.clone();
        self.folder(new_parent_id)?;

        if self.ancestry(new_parent_id)?.iter().any(|a| a == id) {
            return Err(CardzError::CyclicMove {
                folder: id.to_string(),
                target: new_parent_id.to_string(),
            });
        }
        self.ensure_unique_name(new_parent_id, &name, Some(id))?;

        let old_parent = self.folder(id)?.parent_id.clone();
        if let Some(old_parent) = old_parent {
            if let Some(parent) = self.folders.get_mut(&old_parent) {
                parent.subfolders.retain(|s| s != id);
            }
        }
        self.folder_mut(new_parent_id)?
            .subfolders
            .push(id.to_string());
        self.folder_mut(id)?.parent_id = Some(new_parent_id.to_string());
        Ok(())
    }

    /// Folders from root down to `folder_id`, both included.
    pub fn folder_path(&self, folder_id: &str) -> Result<Vec<&Folder>> {
        let mut chain = self.ancestry(folder_id)?;
        chain.reverse();
        chain.iter().map(|id| self.folder(id)).collect()
    }

    /// Ids from `start` up to the top of its parent chain, `start` first.
    fn ancestry(&self, start: &str) -> Result<Vec<String>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(start.to_string());
        while let Some(id) = current {
            if !seen.insert(id.clone()) {
                return Err(CardzError::Store(format!(
                    "folder {} is part of a parent cycle",
                    id
                )));
            }
            current = self.folder(&id)?.parent_id.clone();
            chain.push(id);
        }
        Ok(chain)
    }

    /// Ids of `id` and all of its descendants, children before parents.
    pub fn subtree_ids(&self, id: &str) -> Result<Vec<String>> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        self.collect_subtree(id, &mut seen, &mut order)?;
        Ok(order)
    }

    fn collect_subtree(
        &self,
        id: &str,
        seen: &mut HashSet<String>,
        order: &mut Vec<String>,
    ) -> Result<()> {
        if !seen.insert(id.to_string()) {
            return Ok(());
        }
        let folder = self.folder(id)?;
        for child in &folder.subfolders {
            self.collect_subtree(child, seen, order)?;
        }
        order.push(id.to_string());
        Ok(())
    }

    // --- Cards ---

    pub fn add_card(&mut self, folder_id: &str, front: &str, back: &str) -> Result<String> {
        self.folder(folder_id)?;
        let front = require_text(front, "Front")?;
        let back = require_text(back, "Back")?;

        let card_id = id::card_id(|candidate| self.cards.contains_key(candidate));
        self.cards.insert(
            card_id.clone(),
            Card::new(card_id.clone(), folder_id.to_string(), front, back),
        );
        self.folder_mut(folder_id)?.cards.push(card_id.clone());
        Ok(card_id)
    }

    pub fn update_card(&mut self, card_id: &str, front: &str, back: &str) -> Result<()> {
        self.card(card_id)?;
        let front = require_text(front, "Front")?;
        let back = require_text(back, "Back")?;

        let card = self.card_mut(card_id)?;
        card.front = front;
        card.back = back;
        card.date_updated = Some(Utc::now());
        Ok(())
    }

    pub fn move_card(&mut self, card_id: &str, new_folder_id: &str) -> Result<()> {
        let old_folder_id = self.card(card_id)?.folder_id.clone();
        self.folder(new_folder_id)?;

        if let Some(old) = self.folders.get_mut(&old_folder_id) {
            old.cards.retain(|c| c != card_id);
        }
        self.folder_mut(new_folder_id)?
            .cards
            .push(card_id.to_string());
        self.card_mut(card_id)?.folder_id = new_folder_id.to_string();
        Ok(())
    }

    pub fn delete_card(&mut self, card_id: &str) -> Result<Card> {
        let card = self
            .cards
            .shift_remove(card_id)
            .ok_or_else(|| CardzError::CardNotFound(card_id.to_string()))?;
        if let Some(folder) = self.folders.get_mut(&card.folder_id) {
            folder.cards.retain(|c| c != card_id);
        }
        Ok(card)
    }

    // --- Read projections (lenient: unknown folder → empty) ---

    pub fn cards_in(&self, folder_id: &str) -> Vec<&Card> {
        self.folders
            .get(folder_id)
            .map(|f| f.cards.iter().filter_map(|id| self.cards.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn subfolders_of(&self, folder_id: &str) -> Vec<&Folder> {
        self.folders
            .get(folder_id)
            .map(|f| {
                f.subfolders
                    .iter()
                    .filter_map(|id| self.folders.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Subfolders first, then cards, each in their stored order.
    pub fn entries_in(&self, folder_id: &str) -> Vec<Entry> {
        self.subfolders_of(folder_id)
            .into_iter()
            .cloned()
            .map(Entry::Folder)
            .chain(self.cards_in(folder_id).into_iter().cloned().map(Entry::Card))
            .collect()
    }

    /// Deletes whatever `id` names: a folder (cascading) or a card.
    pub fn remove_entry(&mut self, id: &str) -> Result<Entry> {
        if self.folders.contains_key(id) {
            let removed = self.delete_folder(id)?;
            return removed
                .folders
                .into_iter()
                .find(|f| f.id == id)
                .map(Entry::Folder)
                .ok_or_else(|| CardzError::FolderNotFound(id.to_string()));
        }
        if self.cards.contains_key(id) {
            return self.delete_card(id).map(Entry::Card);
        }
        Err(CardzError::EntryNotFound(id.to_string()))
    }

    /// Every card in the tree matching `term` on either side.
    pub fn search(&self, term: &str) -> Vec<Card> {
        filter_cards(self.cards.values().cloned().collect(), term)
    }

    /// Depth-first walk from root, in display order.
    pub fn outline(&self) -> Vec<OutlineRow> {
        let mut rows = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![(ROOT_ID.to_string(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            if !seen.insert(id.clone()) {
                continue;
            }
            let Some(folder) = self.folders.get(&id) else {
                continue;
            };
            for child in folder.subfolders.iter().rev() {
                stack.push((child.clone(), depth + 1));
            }
            rows.push(OutlineRow {
                depth,
                folder: folder.clone(),
                card_count: self.cards_in(&id).len(),
            });
        }
        rows
    }

    // --- Interchange document ---

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses an interchange document, rejecting anything without both maps and a root.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| CardzError::InvalidFormat(format!("not valid JSON: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        validate_shape(&value)?;
        serde_json::from_value(value).map_err(|e| CardzError::InvalidFormat(e.to_string()))
    }
}

fn validate_shape(value: &Value) -> Result<()> {
    let folders = value
        .get("folders")
        .and_then(Value::as_object)
        .ok_or_else(|| CardzError::InvalidFormat("missing \"folders\" map".to_string()))?;
    value
        .get("cards")
        .and_then(Value::as_object)
        .ok_or_else(|| CardzError::InvalidFormat("missing \"cards\" map".to_string()))?;
    if !folders.contains_key(ROOT_ID) {
        return Err(CardzError::InvalidFormat(
            "missing root folder".to_string(),
        ));
    }
    Ok(())
}
