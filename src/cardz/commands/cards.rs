use crate::commands::helpers::{folder_or_current, load_with_session, resolve_card, resolve_folder};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CardOrder;
use crate::store::{CardStore, StorageBackend};

pub fn add<B: StorageBackend>(
    store: &CardStore<B>,
    front: &str,
    back: &str,
    folder: Option<&str>,
) -> Result<CmdResult> {
    let (_, session) = load_with_session(store)?;
    let (card, folder_name) = store.mutate(|tree| {
        let folder_id = folder_or_current(tree, &session, folder)?;
        let id = tree.add_card(&folder_id, front, back)?;
        Ok((tree.card(&id)?.clone(), tree.folder(&folder_id)?.name.clone()))
    })?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Added card to {}", folder_name)))
        .with_affected_cards(vec![card]))
}

pub fn edit<B: StorageBackend>(
    store: &CardStore<B>,
    target: &str,
    front: &str,
    back: &str,
    order: CardOrder,
) -> Result<CmdResult> {
    let (_, session) = load_with_session(store)?;
    let card = store.mutate(|tree| {
        let id = resolve_card(tree, &session, target, order)?;
        tree.update_card(&id, front, back)?;
        Ok(tree.card(&id)?.clone())
    })?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success("Card updated"))
        .with_affected_cards(vec![card]))
}

pub fn move_to<B: StorageBackend>(
    store: &CardStore<B>,
    target: &str,
    destination: &str,
    order: CardOrder,
) -> Result<CmdResult> {
    let (_, session) = load_with_session(store)?;
    let (card, dest_name) = store.mutate(|tree| {
        let id = resolve_card(tree, &session, target, order)?;
        let dest = resolve_folder(tree, &session, destination)?;
        tree.move_card(&id, &dest)?;
        Ok((tree.card(&id)?.clone(), tree.folder(&dest)?.name.clone()))
    })?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Moved card to {}", dest_name)))
        .with_affected_cards(vec![card]))
}

/// One card, with the path of the folder holding it.
pub fn show<B: StorageBackend>(
    store: &CardStore<B>,
    target: &str,
    order: CardOrder,
) -> Result<CmdResult> {
    let (tree, session) = load_with_session(store)?;
    let id = resolve_card(&tree, &session, target, order)?;
    let card = tree.card(&id)?.clone();
    let path = tree
        .folder_path(&card.folder_id)
        .map(|p| p.into_iter().cloned().collect())
        .unwrap_or_default();
    Ok(CmdResult::default()
        .with_affected_cards(vec![card])
        .with_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::folders;
    use crate::error::CardzError;
    use crate::id::ROOT_ID;
    use crate::store::mem_backend::MemBackend;

    fn store() -> CardStore<MemBackend> {
        CardStore::with_backend(MemBackend::new())
    }

    #[test]
    fn add_defaults_to_current_folder() {
        let store = store();
        let res = add(&store, "hola", "hello", None).unwrap();
        assert_eq!(res.affected_cards[0].folder_id, ROOT_ID);
        assert_eq!(res.messages[0].content, "Added card to Root");
    }

    #[test]
    fn add_rejects_blank_sides() {
        let store = store();
        let err = add(&store, "hola", "   ", None).unwrap_err();
        assert_eq!(err.to_string(), "Back cannot be empty");
        assert!(!store.has_data().unwrap());
    }

    #[test]
    fn add_to_missing_folder_fails() {
        let store = store();
        let err = add(&store, "q", "a", Some("Nope")).unwrap_err();
        assert!(matches!(err, CardzError::FolderNotFound(_)));
    }

    #[test]
    fn edit_by_position_stamps_update() {
        let store = store();
        add(&store, "hola", "hello", None).unwrap();
        let res = edit(&store, "1", "hola", "hi", CardOrder::Position).unwrap();
        let card = &res.affected_cards[0];
        assert_eq!(card.back, "hi");
        assert!(card.date_updated.is_some());
    }

    #[test]
    fn move_and_show() {
        let store = store();
        folders::create(&store, "Spanish", None).unwrap();
        let id = add(&store, "hola", "hello", None).unwrap().affected_cards[0]
            .id
            .clone();
        move_to(&store, &id, "Spanish", CardOrder::Position).unwrap();

        let shown = show(&store, &id, CardOrder::Position).unwrap();
        let names: Vec<&str> = shown.path.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Root", "Spanish"]);
        assert!(store.load().unwrap().cards_in(ROOT_ID).is_empty());
    }

    #[test]
    fn show_unknown_card() {
        let store = store();
        assert!(show(&store, "card_nope", CardOrder::Position).unwrap_err().is_not_found());
    }
}
