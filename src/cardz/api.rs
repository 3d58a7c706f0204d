//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every cardz operation, whatever the UI.
//!
//! It dispatches to `commands/*.rs` and hands back `Result<CmdResult>`. It does not
//! print, prompt, or decide anything on the user's behalf: the import decision gate,
//! for instance, is two calls ([`CardzApi::plan_import`] then [`CardzApi::import`])
//! with the choice made by the caller in between.
//!
//! `CardzApi<B: StorageBackend>` is generic over the backend:
//! - Production: `CardzApi<FsBackend>`
//! - Testing: `CardzApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::merge::ImportMode;
use crate::model::CardOrder;
use crate::store::{CardStore, StorageBackend};
use std::path::Path;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CardzPaths, CmdMessage, CmdResult, ImportPlan, MessageLevel};

/// The main API facade for cardz operations.
pub struct CardzApi<B: StorageBackend> {
    store: CardStore<B>,
    paths: CardzPaths,
}

impl<B: StorageBackend> CardzApi<B> {
    pub fn new(backend: B, paths: CardzPaths) -> Self {
        Self {
            store: CardStore::with_backend(backend),
            paths,
        }
    }

    pub fn store(&self) -> &CardStore<B> {
        &self.store
    }

    pub fn paths(&self) -> &CardzPaths {
        &self.paths
    }

    // --- Folders ---

    pub fn create_folder(&self, name: &str, parent: Option<&str>) -> Result<CmdResult> {
        commands::folders::create(&self.store, name, parent)
    }

    pub fn rename_folder(&self, folder: &str, new_name: &str) -> Result<CmdResult> {
        commands::folders::rename(&self.store, folder, new_name)
    }

    pub fn delete_folder(&self, folder: &str) -> Result<CmdResult> {
        commands::folders::delete(&self.store, folder)
    }

    pub fn preview_delete_folder(&self, folder: &str) -> Result<CmdResult> {
        commands::folders::preview_delete(&self.store, folder)
    }

    pub fn move_folder(&self, folder: &str, destination: &str) -> Result<CmdResult> {
        commands::folders::move_to(&self.store, folder, destination)
    }

    // --- Cards ---

    pub fn add_card(&self, front: &str, back: &str, folder: Option<&str>) -> Result<CmdResult> {
        commands::cards::add(&self.store, front, back, folder)
    }

    // Card positions count in `order`, the order `list` shows them in.

    pub fn edit_card(
        &self,
        card: &str,
        front: &str,
        back: &str,
        order: CardOrder,
    ) -> Result<CmdResult> {
        commands::cards::edit(&self.store, card, front, back, order)
    }

    pub fn move_card(&self, card: &str, destination: &str, order: CardOrder) -> Result<CmdResult> {
        commands::cards::move_to(&self.store, card, destination, order)
    }

    pub fn show_card(&self, card: &str, order: CardOrder) -> Result<CmdResult> {
        commands::cards::show(&self.store, card, order)
    }

    /// Deletes a card or a folder.
    pub fn remove_entry(&self, target: &str, order: CardOrder) -> Result<CmdResult> {
        commands::remove::run(&self.store, target, order)
    }

    // --- Browsing ---

    pub fn list(&self, folder: Option<&str>, order: CardOrder) -> Result<CmdResult> {
        commands::list::run(&self.store, folder, order)
    }

    pub fn outline(&self) -> Result<CmdResult> {
        commands::list::outline(&self.store)
    }

    pub fn search(&self, term: &str, order: CardOrder) -> Result<CmdResult> {
        commands::list::search(&self.store, term, order)
    }

    pub fn change_folder(&self, folder: &str) -> Result<CmdResult> {
        commands::navigate::cd(&self.store, folder)
    }

    pub fn up(&self) -> Result<CmdResult> {
        commands::navigate::up(&self.store)
    }

    pub fn current_folder(&self) -> Result<CmdResult> {
        commands::navigate::pwd(&self.store)
    }

    pub fn study(&self, folder: Option<&str>, order: CardOrder, shuffle: bool) -> Result<CmdResult> {
        commands::study::start(&self.store, folder, order, shuffle)
    }

    // --- Interchange ---

    pub fn export(&self, dest: Option<&Path>) -> Result<CmdResult> {
        commands::export::run(&self.store, dest)
    }

    pub fn plan_import(&self, path: &Path) -> Result<ImportPlan> {
        commands::import::plan(&self.store, path)
    }

    pub fn import(&self, plan: ImportPlan, mode: ImportMode) -> Result<CmdResult> {
        commands::import::apply(&self.store, plan, mode)
    }

    // --- Maintenance ---

    pub fn check(&self) -> Result<CmdResult> {
        commands::check::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use tempfile::tempdir;

    fn api() -> (CardzApi<MemBackend>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let paths = CardzPaths {
            data: dir.path().to_path_buf(),
        };
        (CardzApi::new(MemBackend::new(), paths), dir)
    }

    #[test]
    fn folder_and_card_calls_reach_the_store() {
        let (api, _dir) = api();
        api.create_folder("Spanish", None).unwrap();
        api.add_card("hola", "hello", Some("Spanish")).unwrap();
        api.change_folder("Spanish").unwrap();

        let listed = api.list(None, CardOrder::Position).unwrap();
        assert_eq!(listed.listed_entries.len(), 1);
        assert_eq!(api.current_folder().unwrap().path.len(), 2);

        api.edit_card("1", "hola", "hi", CardOrder::Position).unwrap();
        let shown = api.show_card("1", CardOrder::Position).unwrap();
        assert_eq!(shown.affected_cards[0].back, "hi");

        api.up().unwrap();
        api.remove_entry("Spanish", CardOrder::Position).unwrap();
        assert!(api.store().load().unwrap().is_empty());
    }

    #[test]
    fn import_is_two_steps() {
        let (api, dir) = api();
        api.create_folder("A", None).unwrap();
        let file = dir.path().join("out.json");
        api.export(Some(&file)).unwrap();

        let plan = api.plan_import(&file).unwrap();
        assert_eq!(plan.imported_folders, 1);
        let res = api.import(plan, ImportMode::Merge).unwrap();
        assert_eq!(res.import_summary.unwrap().total_folders, 2);
    }

    #[test]
    fn config_uses_data_dir() {
        let (api, dir) = api();
        api.config(ConfigAction::Set("shuffle_study".into(), "true".into()))
            .unwrap();
        assert!(dir.path().join("config.json").exists());
        assert!(api.check().unwrap().report.unwrap().is_clean());
    }
}
