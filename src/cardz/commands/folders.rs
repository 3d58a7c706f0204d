use crate::commands::helpers::{folder_or_current, load_with_session, resolve_folder, sync_session};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardzError, Result};
use crate::store::{CardStore, StorageBackend};

/// Creates a folder inside `parent`, or inside the current folder.
pub fn create<B: StorageBackend>(
    store: &CardStore<B>,
    name: &str,
    parent: Option<&str>,
) -> Result<CmdResult> {
    let (_, session) = load_with_session(store)?;
    let folder = store.mutate(|tree| {
        let parent_id = folder_or_current(tree, &session, parent)?;
        let id = tree.create_folder(name, &parent_id)?;
        Ok(tree.folder(&id)?.clone())
    })?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Created folder {}", folder.name)))
        .with_affected_folders(vec![folder]))
}

pub fn rename<B: StorageBackend>(
    store: &CardStore<B>,
    target: &str,
    new_name: &str,
) -> Result<CmdResult> {
    let (_, session) = load_with_session(store)?;
    let (old_name, folder) = store.mutate(|tree| {
        let id = resolve_folder(tree, &session, target)?;
        let old_name = tree.folder(&id)?.name.clone();
        tree.rename_folder(&id, new_name)?;
        Ok((old_name, tree.folder(&id)?.clone()))
    })?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Renamed {} to {}",
            old_name, folder.name
        )))
        .with_affected_folders(vec![folder]))
}

/// Deletes a folder with everything beneath it.
pub fn delete<B: StorageBackend>(store: &CardStore<B>, target: &str) -> Result<CmdResult> {
    let (_, session) = load_with_session(store)?;
    let (removed, tree) = store.mutate(|tree| {
        let id = resolve_folder(tree, &session, target)?;
        let removed = tree.delete_folder(&id)?;
        Ok((removed, tree.clone()))
    })?;
    sync_session(store, &tree)?;

    let name = removed
        .folders
        .last()
        .map(|f| f.name.clone())
        .unwrap_or_default();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted folder {} ({} folders, {} cards)",
        name,
        removed.folders.len(),
        removed.cards.len()
    )));
    Ok(result
        .with_affected_folders(removed.folders)
        .with_affected_cards(removed.cards))
}

/// Re-parents a folder. The destination must not be the folder or one of its descendants.
pub fn move_to<B: StorageBackend>(
    store: &CardStore<B>,
    target: &str,
    destination: &str,
) -> Result<CmdResult> {
    let (_, session) = load_with_session(store)?;
    let (folder, dest_name) = store.mutate(|tree| {
        let id = resolve_folder(tree, &session, target)?;
        let dest = resolve_folder(tree, &session, destination)?;
        tree.move_folder(&id, &dest)?;
        Ok((tree.folder(&id)?.clone(), tree.folder(&dest)?.name.clone()))
    })?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Moved {} into {}",
            folder.name, dest_name
        )))
        .with_affected_folders(vec![folder]))
}

/// Folder summary used before a destructive delete: how much would go.
pub fn preview_delete<B: StorageBackend>(store: &CardStore<B>, target: &str) -> Result<CmdResult> {
    let (tree, session) = load_with_session(store)?;
    let id = resolve_folder(&tree, &session, target)?;
    if tree.folder(&id)?.is_root() {
        return Err(CardzError::Forbidden("the root folder cannot be deleted".to_string()));
    }
    let subtree = tree.subtree_ids(&id)?;
    let folders: Vec<_> = subtree
        .iter()
        .filter_map(|fid| tree.folders.get(fid).cloned())
        .collect();
    let cards: Vec<_> = subtree
        .iter()
        .flat_map(|fid| tree.cards_in(fid))
        .cloned()
        .collect();
    Ok(CmdResult::default()
        .with_affected_folders(folders)
        .with_affected_cards(cards))
}
