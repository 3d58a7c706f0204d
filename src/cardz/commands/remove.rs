use crate::commands::helpers::{load_with_session, resolve_card, resolve_folder, sync_session};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardzError, Result};
use crate::model::{CardOrder, Entry};
use crate::session::Session;
use crate::store::{CardStore, StorageBackend};
use crate::tree::Tree;

/// Deletes a card or a folder, whichever `target` names.
///
/// Ids win. After that a number is a card position in the current folder, and
/// anything else is a folder path. Positions count cards in `order`.
pub fn run<B: StorageBackend>(
    store: &CardStore<B>,
    target: &str,
    order: CardOrder,
) -> Result<CmdResult> {
    let (_, session) = load_with_session(store)?;
    let (entry, tree) = store.mutate(|tree| {
        let id = resolve_entry(tree, &session, target, order)?;
        let entry = tree.remove_entry(&id)?;
        Ok((entry, tree.clone()))
    })?;
    sync_session(store, &tree)?;

    let result = CmdResult::default();
    Ok(match entry {
        Entry::Folder(folder) => result
            .with_message(CmdMessage::success(format!("Deleted folder {}", folder.name)))
            .with_affected_folders(vec![folder]),
        Entry::Card(card) => result
            .with_message(CmdMessage::success(format!("Deleted card {}", card.front)))
            .with_affected_cards(vec![card]),
    })
}

fn resolve_entry(
    tree: &Tree,
    session: &Session,
    target: &str,
    order: CardOrder,
) -> Result<String> {
    let target = target.trim();
    if tree.folders.contains_key(target) || tree.cards.contains_key(target) {
        return Ok(target.to_string());
    }
    if let Ok(id) = resolve_card(tree, session, target, order) {
        return Ok(id);
    }
    resolve_folder(tree, session, target)
        .map_err(|_| CardzError::EntryNotFound(target.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{cards, folders};
    use crate::store::mem_backend::MemBackend;

    fn store() -> CardStore<MemBackend> {
        CardStore::with_backend(MemBackend::new())
    }

    #[test]
    fn removes_card_by_id() {
        let store = store();
        let id = cards::add(&store, "q", "a", None).unwrap().affected_cards[0]
            .id
            .clone();
        let res = run(&store, &id, CardOrder::Position).unwrap();
        assert_eq!(res.affected_cards.len(), 1);
        assert_eq!(store.load().unwrap().card_count(), 0);
    }

    #[test]
    fn removes_folder_by_path_with_contents() {
        let store = store();
        folders::create(&store, "Spanish", None).unwrap();
        cards::add(&store, "hola", "hello", Some("Spanish")).unwrap();
        let res = run(&store, "Spanish", CardOrder::Position).unwrap();
        assert_eq!(res.messages[0].content, "Deleted folder Spanish");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn unknown_target_is_entry_not_found() {
        let store = store();
        let err = run(&store, "nothing", CardOrder::Position).unwrap_err();
        assert!(matches!(err, CardzError::EntryNotFound(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn root_cannot_be_removed() {
        let store = store();
        let err = run(&store, "root", CardOrder::Position).unwrap_err();
        assert_eq!(err.kind(), "Forbidden");
    }

    #[test]
    fn position_counts_in_listing_order() {
        let store = store();
        cards::add(&store, "zebra", "z", None).unwrap();
        cards::add(&store, "apple", "a", None).unwrap();
        let res = run(&store, "1", CardOrder::Alphabetical).unwrap();
        assert_eq!(res.messages[0].content, "Deleted card apple");
        let left = store.load().unwrap();
        let fronts: Vec<&str> = left.cards.values().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["zebra"]);
    }
}
