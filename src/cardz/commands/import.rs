//! Importing a document happens in two steps so the caller can decide in between:
//!
//! 1. [`plan`] reads and validates the file and counts what it holds. Nothing is written.
//! 2. [`apply`] merges or replaces, then persists the result.

use crate::commands::helpers::sync_session;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardzError, Result};
use crate::merge::{self, ImportMode};
use crate::store::{CardStore, StorageBackend};
use crate::tree::Tree;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed document waiting for a merge/replace decision.
#[derive(Debug, Clone)]
pub struct ImportPlan {
    pub source: PathBuf,
    pub document: Tree,
    pub imported_folders: usize,
    pub imported_cards: usize,
    pub existing_folders: usize,
    pub existing_cards: usize,
}

impl ImportPlan {
    /// Whether importing would touch anything already stored.
    pub fn has_existing_data(&self) -> bool {
        self.existing_folders > 0 || self.existing_cards > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub mode: ImportMode,
    pub imported_folders: usize,
    pub imported_cards: usize,
    pub existing_folders: usize,
    pub existing_cards: usize,
    pub total_folders: usize,
    pub total_cards: usize,
}

pub fn plan<B: StorageBackend>(store: &CardStore<B>, path: &Path) -> Result<ImportPlan> {
    let text = fs::read_to_string(path).map_err(CardzError::Io)?;
    let document = Tree::from_json(&text)?;
    let (existing_folders, existing_cards) = match store.load() {
        Ok(current) => (current.folder_count(), current.card_count()),
        Err(e) => {
            warn!("current data is unreadable ({}), only replace can succeed", e);
            (0, 0)
        }
    };
    Ok(ImportPlan {
        source: path.to_path_buf(),
        imported_folders: document.folder_count(),
        imported_cards: document.card_count(),
        existing_folders,
        existing_cards,
        document,
    })
}

pub fn apply<B: StorageBackend>(
    store: &CardStore<B>,
    plan: ImportPlan,
    mode: ImportMode,
) -> Result<CmdResult> {
    let result_tree = match mode {
        ImportMode::Replace => plan.document,
        ImportMode::Merge => merge::apply(&store.load()?, plan.document, mode),
    };
    store.save(&result_tree)?;
    sync_session(store, &result_tree)?;

    let summary = ImportSummary {
        mode,
        imported_folders: plan.imported_folders,
        imported_cards: plan.imported_cards,
        existing_folders: plan.existing_folders,
        existing_cards: plan.existing_cards,
        total_folders: result_tree.folder_count(),
        total_cards: result_tree.card_count(),
    };
    info!(
        "{} import of {}: {} folders, {} cards",
        mode,
        plan.source.display(),
        summary.imported_folders,
        summary.imported_cards
    );

    let verb = match mode {
        ImportMode::Merge => "Merged",
        ImportMode::Replace => "Replaced data with",
    };
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "{} {} folders and {} cards from {}",
            verb,
            summary.imported_folders,
            summary.imported_cards,
            plan.source.display()
        )))
        .with_import_summary(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::inspect;
    use crate::commands::{cards, export, folders};
    use crate::id::ROOT_ID;
    use crate::store::mem_backend::MemBackend;
    use crate::store::TREE_KEY;
    use tempfile::tempdir;

    const DOC: &str = r#"{
  "folders": {
    "root": { "id": "root", "name": "Root", "parentId": null, "subfolders": ["F"], "cards": [] },
    "F": { "id": "F", "name": "French", "parentId": "root", "subfolders": [], "cards": ["c1"] }
  },
  "cards": {
    "c1": { "id": "c1", "front": "bonjour", "back": "hello", "folderId": "F", "dateCreated": "2024-01-01T00:00:00Z" }
  }
}"#;

    fn write_doc(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("import.json");
        fs::write(&path, text).unwrap();
        path
    }

    fn store() -> CardStore<MemBackend> {
        CardStore::with_backend(MemBackend::new())
    }

    #[test]
    fn plan_counts_without_writing() {
        let dir = tempdir().unwrap();
        let store = store();
        cards::add(&store, "q", "a", None).unwrap();
        let before = store.backend.load(TREE_KEY).unwrap();

        let plan = plan(&store, &write_doc(dir.path(), DOC)).unwrap();
        assert_eq!(plan.imported_folders, 1);
        assert_eq!(plan.imported_cards, 1);
        assert_eq!(plan.existing_cards, 1);
        assert!(plan.has_existing_data());
        assert_eq!(store.backend.load(TREE_KEY).unwrap(), before);
    }

    #[test]
    fn invalid_documents_are_rejected() {
        let dir = tempdir().unwrap();
        let store = store();
        let err = plan(&store, &write_doc(dir.path(), "not json")).unwrap_err();
        assert_eq!(err.kind(), "InvalidFormat");
        let err = plan(&store, &write_doc(dir.path(), r#"{"folders":{}}"#)).unwrap_err();
        assert_eq!(err.kind(), "InvalidFormat");
        assert!(!store.has_data().unwrap());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = plan(&store(), &dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), "Io");
    }

    #[test]
    fn merge_adds_alongside_existing() {
        let dir = tempdir().unwrap();
        let store = store();
        folders::create(&store, "Spanish", None).unwrap();

        let plan = plan(&store, &write_doc(dir.path(), DOC)).unwrap();
        let res = apply(&store, plan, ImportMode::Merge).unwrap();
        let summary = res.import_summary.unwrap();
        assert_eq!(summary.total_folders, 2);
        assert_eq!(summary.total_cards, 1);

        let tree = store.load().unwrap();
        assert!(!tree.folders.contains_key("F"));
        assert!(inspect(&tree).is_clean());
        let names: Vec<&str> = tree
            .subfolders_of(ROOT_ID)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Spanish", "French"]);
    }

    #[test]
    fn replace_discards_existing_and_resets_session() {
        let dir = tempdir().unwrap();
        let store = store();
        let spanish = folders::create(&store, "Spanish", None).unwrap().affected_folders[0]
            .id
            .clone();
        crate::commands::navigate::cd(&store, &spanish).unwrap();

        let plan = plan(&store, &write_doc(dir.path(), DOC)).unwrap();
        apply(&store, plan, ImportMode::Replace).unwrap();

        let tree = store.load().unwrap();
        assert!(tree.folders.contains_key("F"));
        assert!(!tree.folders.contains_key(&spanish));
        assert!(store.load_session().unwrap().is_at_root());
    }

    #[test]
    fn replace_recovers_from_corrupt_store() {
        let dir = tempdir().unwrap();
        let store = store();
        store.backend.put_raw(TREE_KEY, "garbage");
        let plan = plan(&store, &write_doc(dir.path(), DOC)).unwrap();
        assert!(!plan.has_existing_data());
        assert!(apply(&store, plan.clone(), ImportMode::Merge).is_err());
        apply(&store, plan, ImportMode::Replace).unwrap();
        assert_eq!(store.load().unwrap().card_count(), 1);
    }

    #[test]
    fn export_then_replace_is_identical() {
        let dir = tempdir().unwrap();
        let store = store();
        folders::create(&store, "Spanish", None).unwrap();
        cards::add(&store, "hola", "hello", Some("Spanish")).unwrap();
        let before = store.backend.load(TREE_KEY).unwrap().unwrap();

        let file = dir.path().join("export.json");
        export::run(&store, Some(&file)).unwrap();

        let other = CardStore::with_backend(MemBackend::new());
        let plan = plan(&other, &file).unwrap();
        apply(&other, plan, ImportMode::Replace).unwrap();
        assert_eq!(other.backend.load(TREE_KEY).unwrap().unwrap(), before);
    }
}
