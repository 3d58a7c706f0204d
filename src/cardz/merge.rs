//! # Import Merging
//!
//! An imported document is reconciled with the current tree under one of two
//! policies:
//!
//! - **Replace**: the imported document becomes the tree, ids and all.
//! - **Merge**: the current tree is kept untouched and the imported entities are
//!   absorbed under fresh ids.
//!
//! ## The Merge Algorithm
//!
//! 1. Every imported folder except the imported root gets a new id (`old → new` is
//!    recorded) and an empty copy of itself in the result.
//! 2. Imported folders are re-walked. The imported root's direct children are hung
//!    under the result root. Every other folder's parent is resolved through the
//!    remapping table, falling back to the result root when it cannot be resolved.
//!    A folder is never appended twice to the same parent.
//! 3. Every imported card gets a new id and is placed in its remapped folder (root
//!    maps to root, anything unresolvable maps to root).
//!
//! Because ids are always regenerated, nothing collides with existing entities, and
//! because every unresolvable reference lands on root, nothing is orphaned. Imported
//! folders whose parent links form a loop are cut loose and hung under root as well.
//!
//! Sibling name uniqueness is not enforced here: a merge never fails on names.

use crate::id::{self, ROOT_ID};
use crate::model::{Card, Folder};
use crate::tree::Tree;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    Merge,
    Replace,
}

impl std::fmt::Display for ImportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportMode::Merge => write!(f, "merge"),
            ImportMode::Replace => write!(f, "replace"),
        }
    }
}

/// Produces the tree that results from importing `imported` into `current`.
pub fn apply(current: &Tree, imported: Tree, mode: ImportMode) -> Tree {
    match mode {
        ImportMode::Replace => imported,
        ImportMode::Merge => merge(current, &imported),
    }
}

pub fn merge(current: &Tree, imported: &Tree) -> Tree {
    let mut result = current.clone();
    if !result.folders.contains_key(ROOT_ID) {
        warn!("import: current tree has no root folder, recreating it");
        let mut folders = Tree::new().folders;
        folders.extend(result.folders);
        result.folders = folders;
    }
    let mut remap: HashMap<String, String> = HashMap::new();

    // Pass 1: fresh ids, empty shells.
    for (old_id, folder) in &imported.folders {
        if old_id == ROOT_ID {
            continue;
        }
        let new_id = id::folder_id(|candidate| result.folders.contains_key(candidate));
        debug!("import: folder {} -> {}", old_id, new_id);
        result.folders.insert(
            new_id.clone(),
            Folder::new(
                new_id.clone(),
                folder.name.clone(),
                Some(ROOT_ID.to_string()),
            ),
        );
        remap.insert(old_id.clone(), new_id);
    }

    // Pass 2: parents and subfolder sequences.
    for (old_id, folder) in &imported.folders {
        if old_id == ROOT_ID {
            for child in &folder.subfolders {
                if let Some(new_child) = remap.get(child) {
                    attach(&mut result, new_child, ROOT_ID);
                }
            }
            continue;
        }
        let Some(new_id) = remap.get(old_id) else {
            continue;
        };
        let parent = resolve_parent(&remap, folder.parent_id.as_deref(), new_id);
        attach(&mut result, new_id, &parent);
    }

    let imported_ids: Vec<String> = remap.values().cloned().collect();
    break_cycles(&mut result, &imported_ids);

    // Pass 3: cards.
    for (old_id, card) in &imported.cards {
        let new_id = id::card_id(|candidate| result.cards.contains_key(candidate));
        let folder_id = if card.folder_id == ROOT_ID {
            ROOT_ID.to_string()
        } else if let Some(mapped) = remap.get(&card.folder_id) {
            mapped.clone()
        } else {
            warn!(
                "import: card {} refers to unknown folder {}, placing it in root",
                old_id, card.folder_id
            );
            ROOT_ID.to_string()
        };
        debug!("import: card {} -> {}", old_id, new_id);
        result.cards.insert(
            new_id.clone(),
            Card {
                id: new_id.clone(),
                folder_id: folder_id.clone(),
                ..card.clone()
            },
        );
        if let Some(folder) = result.folders.get_mut(&folder_id) {
            folder.cards.push(new_id);
        }
    }

    result
}

fn resolve_parent(remap: &HashMap<String, String>, old_parent: Option<&str>, new_id: &str) -> String {
    match old_parent {
        Some(ROOT_ID) => ROOT_ID.to_string(),
        Some(old) => match remap.get(old) {
            Some(mapped) if mapped != new_id => mapped.clone(),
            _ => {
                warn!(
                    "import: folder {} refers to unknown parent {}, placing it in root",
                    new_id, old
                );
                ROOT_ID.to_string()
            }
        },
        None => ROOT_ID.to_string(),
    }
}

/// Points `child` at `parent`, appending it to the parent's sequence once.
fn attach(tree: &mut Tree, child: &str, parent: &str) {
    let previous = tree
        .folders
        .get(child)
        .and_then(|f| f.parent_id.clone())
        .filter(|p| p != parent);
    if let Some(previous) = previous {
        if let Some(old) = tree.folders.get_mut(&previous) {
            old.subfolders.retain(|s| s != child);
        }
    }
    if let Some(folder) = tree.folders.get_mut(child) {
        folder.parent_id = Some(parent.to_string());
    }
    if let Some(target) = tree.folders.get_mut(parent) {
        if !target.subfolders.iter().any(|s| s == child) {
            target.subfolders.push(child.to_string());
        }
    }
}

/// Re-hangs under root every imported folder that cannot reach root.
fn break_cycles(tree: &mut Tree, imported: &[String]) {
    for id in imported {
        if reaches_root(tree, id) {
            continue;
        }
        warn!("import: folder {} is part of a parent loop, placing it in root", id);
        attach(tree, id, ROOT_ID);
    }
}

fn reaches_root(tree: &Tree, start: &str) -> bool {
    let mut seen = HashSet::new();
    let mut current = start.to_string();
    loop {
        if current == ROOT_ID {
            return true;
        }
        if !seen.insert(current.clone()) {
            return false;
        }
        match tree.folders.get(&current).and_then(|f| f.parent_id.clone()) {
            Some(parent) => current = parent,
            None => return false,
        }
    }
}
