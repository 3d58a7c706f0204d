use crate::check::inspect;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CardStore, StorageBackend};

/// Verifies the stored tree. Never modifies it.
pub fn run<B: StorageBackend>(store: &CardStore<B>) -> Result<CmdResult> {
    let tree = store.load()?;
    let report = inspect(&tree);
    let message = if report.is_clean() {
        CmdMessage::success(format!(
            "No problems found in {} folders and {} cards",
            tree.folder_count(),
            tree.card_count()
        ))
    } else {
        CmdMessage::warning(format!("{} problems found", report.issues.len()))
    };
    Ok(CmdResult::default()
        .with_message(message)
        .with_report(report))
}
