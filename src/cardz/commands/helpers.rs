//! Turning what the user typed into ids.
//!
//! Folders are named either by id or by a `/`-separated name path. A path with a
//! leading `/` starts at root; otherwise it starts at the session's folder and,
//! failing that, at root. `.` and `..` work as in a shell. Names compare
//! case-insensitively.
//!
//! Cards are named by id or by their 1-based position in the session's folder, counted
//! in the same order `ls` numbers them.

use crate::error::{CardzError, Result};
use crate::id::ROOT_ID;
use crate::model::{sort_cards, CardOrder};
use crate::session::Session;
use crate::store::{CardStore, StorageBackend};
use crate::tree::Tree;

pub fn resolve_folder(tree: &Tree, session: &Session, input: &str) -> Result<String> {
    let input = input.trim();
    if tree.folders.contains_key(input) {
        return Ok(input.to_string());
    }
    if let Some(absolute) = input.strip_prefix('/') {
        return walk(tree, ROOT_ID, absolute).ok_or_else(|| not_found(input));
    }
    let base = current_or_root(tree, session);
    walk(tree, &base, input)
        .or_else(|| walk(tree, ROOT_ID, input))
        .ok_or_else(|| not_found(input))
}

/// Resolves `input` when given, the session's folder otherwise.
pub fn folder_or_current(tree: &Tree, session: &Session, input: Option<&str>) -> Result<String> {
    match input {
        Some(input) => resolve_folder(tree, session, input),
        None => Ok(current_or_root(tree, session)),
    }
}

pub fn resolve_card(
    tree: &Tree,
    session: &Session,
    input: &str,
    order: CardOrder,
) -> Result<String> {
    let input = input.trim();
    if tree.cards.contains_key(input) {
        return Ok(input.to_string());
    }
    if let Ok(position) = input.parse::<usize>() {
        let folder = current_or_root(tree, session);
        let cards = sort_cards(tree.cards_in(&folder).into_iter().cloned().collect(), order);
        if let Some(card) = position.checked_sub(1).and_then(|i| cards.get(i)) {
            return Ok(card.id.clone());
        }
    }
    Err(CardzError::CardNotFound(input.to_string()))
}

/// The session's folder, or root if it has gone away.
pub fn current_or_root(tree: &Tree, session: &Session) -> String {
    if tree.folders.contains_key(&session.current_folder) {
        session.current_folder.clone()
    } else {
        ROOT_ID.to_string()
    }
}

/// Loads the tree together with a session that points at an existing folder.
pub fn load_with_session<B: StorageBackend>(store: &CardStore<B>) -> Result<(Tree, Session)> {
    let tree = store.load()?;
    let mut session = store.load_session()?;
    session.resolve_after_change(&tree);
    Ok((tree, session))
}

/// Persists the session if it no longer points at an existing folder.
pub fn sync_session<B: StorageBackend>(store: &CardStore<B>, tree: &Tree) -> Result<()> {
    let mut session = store.load_session()?;
    if session.resolve_after_change(tree) {
        store.save_session(&session)?;
    }
    Ok(())
}

fn walk(tree: &Tree, start: &str, path: &str) -> Option<String> {
    let mut current = start.to_string();
    for segment in path.split('/').map(str::trim).filter(|s| !s.is_empty()) {
        match segment {
            "." => {}
            ".." => {
                let folder = tree.folders.get(&current)?;
                if let Some(parent) = &folder.parent_id {
                    current = parent.clone();
                }
            }
            name => {
                let wanted = name.to_lowercase();
                current = tree
                    .subfolders_of(&current)
                    .into_iter()
                    .find(|f| f.name.trim().to_lowercase() == wanted)?
                    .id
                    .clone();
            }
        }
    }
    Some(current)
}

fn not_found(input: &str) -> CardzError {
    CardzError::FolderNotFound(input.to_string())
}
