use crate::commands::helpers::{load_with_session, resolve_folder};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;
use crate::store::{CardStore, StorageBackend};
use crate::tree::Tree;

pub fn cd<B: StorageBackend>(store: &CardStore<B>, target: &str) -> Result<CmdResult> {
    let (tree, mut session) = load_with_session(store)?;
    let id = resolve_folder(&tree, &session, target)?;
    session.navigate(&tree, &id)?;
    store.save_session(&session)?;
    with_path(&tree, &session)
}

pub fn up<B: StorageBackend>(store: &CardStore<B>) -> Result<CmdResult> {
    let (tree, mut session) = load_with_session(store)?;
    let moved = session.up(&tree)?;
    store.save_session(&session)?;
    let mut result = with_path(&tree, &session)?;
    if !moved {
        result.add_message(CmdMessage::info("Already at the root folder"));
    }
    Ok(result)
}

pub fn pwd<B: StorageBackend>(store: &CardStore<B>) -> Result<CmdResult> {
    let (tree, session) = load_with_session(store)?;
    with_path(&tree, &session)
}

fn with_path(tree: &Tree, session: &Session) -> Result<CmdResult> {
    let path = session
        .current_path(tree)?
        .into_iter()
        .cloned()
        .collect();
    Ok(CmdResult::default().with_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::folders;
    use crate::store::mem_backend::MemBackend;

    fn names(res: &CmdResult) -> Vec<&str> {
        res.path.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn cd_is_remembered() {
        let store = CardStore::with_backend(MemBackend::new());
        folders::create(&store, "Spanish", None).unwrap();
        folders::create(&store, "Verbs", Some("Spanish")).unwrap();

        cd(&store, "Spanish").unwrap();
        let res = cd(&store, "Verbs").unwrap();
        assert_eq!(names(&res), vec!["Root", "Spanish", "Verbs"]);
        assert_eq!(names(&pwd(&store).unwrap()), vec!["Root", "Spanish", "Verbs"]);
    }

    #[test]
    fn up_stops_at_root() {
        let store = CardStore::with_backend(MemBackend::new());
        folders::create(&store, "Spanish", None).unwrap();
        cd(&store, "Spanish").unwrap();

        let res = up(&store).unwrap();
        assert_eq!(names(&res), vec!["Root"]);
        assert!(res.messages.is_empty());

        let res = up(&store).unwrap();
        assert_eq!(res.messages[0].content, "Already at the root folder");
    }

    #[test]
    fn cd_to_unknown_keeps_session() {
        let store = CardStore::with_backend(MemBackend::new());
        assert!(cd(&store, "Nowhere").is_err());
        assert!(store.load_session().unwrap().is_at_root());
    }
}
