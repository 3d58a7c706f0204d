use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardzError, Result};
use crate::store::{CardStore, StorageBackend};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the whole tree as a pretty-printed document.
///
/// `dest` may be a file, a directory (the default file name is used inside it),
/// or absent (default file name in the working directory).
pub fn run<B: StorageBackend>(store: &CardStore<B>, dest: Option<&Path>) -> Result<CmdResult> {
    let tree = store.load()?;
    if tree.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No data to export."));
        return Ok(res);
    }

    let target = target_path(dest, Local::now().date_naive());
    fs::write(&target, tree.to_json()?).map_err(CardzError::Io)?;
    log::info!(
        "exported {} folders and {} cards to {}",
        tree.folder_count(),
        tree.card_count(),
        target.display()
    );

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Exported {} folders and {} cards to {}",
            tree.folder_count(),
            tree.card_count(),
            target.display()
        )))
        .with_file(target))
}

pub fn default_file_name(date: NaiveDate) -> String {
    format!("flashcards_export_{}.json", date.format("%Y-%m-%d"))
}

fn target_path(dest: Option<&Path>, today: NaiveDate) -> PathBuf {
    match dest {
        Some(path) if path.is_dir() => path.join(default_file_name(today)),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_file_name(today)),
    }
}
