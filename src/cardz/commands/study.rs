use crate::commands::helpers::{folder_or_current, load_with_session};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{sort_cards, CardOrder};
use crate::store::{CardStore, StorageBackend};
use crate::study::StudySession;

/// Builds a study deck from the cards directly inside a folder.
pub fn start<B: StorageBackend>(
    store: &CardStore<B>,
    folder: Option<&str>,
    order: CardOrder,
    shuffle: bool,
) -> Result<CmdResult> {
    let (tree, session) = load_with_session(store)?;
    let folder_id = folder_or_current(&tree, &session, folder)?;
    let cards = sort_cards(
        tree.cards_in(&folder_id).into_iter().cloned().collect(),
        order,
    );
    let mut study = StudySession::new(cards)?;
    if shuffle {
        study = study.shuffled();
    }
    let path = tree
        .folder_path(&folder_id)?
        .into_iter()
        .cloned()
        .collect();
    Ok(CmdResult::default().with_study(study).with_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{cards, folders};
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn deck_follows_requested_order() {
        let store = CardStore::with_backend(MemBackend::new());
        folders::create(&store, "Spanish", None).unwrap();
        cards::add(&store, "perro", "dog", Some("Spanish")).unwrap();
        cards::add(&store, "casa", "house", Some("Spanish")).unwrap();

        let res = start(&store, Some("Spanish"), CardOrder::Alphabetical, false).unwrap();
        let study = res.study.unwrap();
        assert_eq!(study.len(), 2);
        assert_eq!(study.current().unwrap().front, "casa");
    }

    #[test]
    fn empty_folder_cannot_be_studied() {
        let store = CardStore::with_backend(MemBackend::new());
        folders::create(&store, "Empty", None).unwrap();
        let err = start(&store, Some("Empty"), CardOrder::Position, true).unwrap_err();
        assert_eq!(err.to_string(), "no cards to study");
    }
}
