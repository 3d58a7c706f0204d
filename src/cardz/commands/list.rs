use crate::commands::helpers::{folder_or_current, load_with_session};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{sort_cards, CardOrder, Entry};
use crate::store::{CardStore, StorageBackend};

/// Contents of one folder: subfolders in their order, then cards in `order`.
pub fn run<B: StorageBackend>(
    store: &CardStore<B>,
    folder: Option<&str>,
    order: CardOrder,
) -> Result<CmdResult> {
    let (tree, session) = load_with_session(store)?;
    let folder_id = folder_or_current(&tree, &session, folder)?;

    let cards = sort_cards(
        tree.cards_in(&folder_id).into_iter().cloned().collect(),
        order,
    );
    let entries = tree
        .subfolders_of(&folder_id)
        .into_iter()
        .cloned()
        .map(Entry::Folder)
        .chain(cards.into_iter().map(Entry::Card))
        .collect();
    let path = tree
        .folder_path(&folder_id)?
        .into_iter()
        .cloned()
        .collect();

    Ok(CmdResult::default()
        .with_listed_entries(entries)
        .with_path(path))
}

/// The whole folder hierarchy, depth first.
pub fn outline<B: StorageBackend>(store: &CardStore<B>) -> Result<CmdResult> {
    let tree = store.load()?;
    Ok(CmdResult::default().with_outline(tree.outline()))
}

/// Cards anywhere in the tree matching `term` on either side.
pub fn search<B: StorageBackend>(
    store: &CardStore<B>,
    term: &str,
    order: CardOrder,
) -> Result<CmdResult> {
    let tree = store.load()?;
    let hits = sort_cards(tree.search(term), order);
    Ok(CmdResult::default().with_listed_cards(hits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{cards, folders};
    use crate::store::mem_backend::MemBackend;

    fn seeded() -> CardStore<MemBackend> {
        let store = CardStore::with_backend(MemBackend::new());
        folders::create(&store, "Spanish", None).unwrap();
        folders::create(&store, "Verbs", Some("Spanish")).unwrap();
        cards::add(&store, "perro", "dog", Some("Spanish")).unwrap();
        cards::add(&store, "casa", "house", Some("Spanish")).unwrap();
        cards::add(&store, "ser", "to be", Some("Spanish/Verbs")).unwrap();
        store
    }

    #[test]
    fn lists_folders_before_cards() {
        let store = seeded();
        let res = run(&store, Some("Spanish"), CardOrder::Position).unwrap();
        let labels: Vec<&str> = res.listed_entries.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["Verbs", "perro", "casa"]);
        assert_eq!(res.path.len(), 2);
    }

    #[test]
    fn sorting_applies_to_cards_only() {
        let store = seeded();
        let res = run(&store, Some("Spanish"), CardOrder::Alphabetical).unwrap();
        let labels: Vec<&str> = res.listed_entries.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["Verbs", "casa", "perro"]);
    }

    #[test]
    fn root_listing_by_default() {
        let store = seeded();
        let res = run(&store, None, CardOrder::Position).unwrap();
        assert_eq!(res.listed_entries.len(), 1);
        assert_eq!(res.path[0].name, "Root");
    }

    #[test]
    fn outline_walks_every_folder() {
        let store = seeded();
        let res = outline(&store).unwrap();
        let rows: Vec<(usize, &str, usize)> = res
            .outline
            .iter()
            .map(|r| (r.depth, r.folder.name.as_str(), r.card_count))
            .collect();
        assert_eq!(rows, vec![(0, "Root", 0), (1, "Spanish", 2), (2, "Verbs", 1)]);
    }

    #[test]
    fn search_spans_the_tree() {
        let store = seeded();
        let res = search(&store, "O", CardOrder::Alphabetical).unwrap();
        let fronts: Vec<&str> = res.listed_cards.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["casa", "perro", "ser"]);
        assert!(search(&store, "gato", CardOrder::Position)
            .unwrap()
            .listed_cards
            .is_empty());
    }
}
