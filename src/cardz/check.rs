//! Read-only verification of the tree invariants.
//!
//! Corrupted state (usually from a hand-edited file or a replace-import of a broken
//! document) is reported here, never repaired.

use crate::id::ROOT_ID;
use crate::tree::Tree;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingRoot,
    RootHasParent(String),
    FolderWithoutParent(String),
    MissingParent { folder: String, parent: String },
    NotListedInParent { folder: String, parent: String },
    ListedMoreThanOnce { folder: String, parent: String, times: usize },
    DanglingSubfolder { parent: String, child: String },
    ForeignSubfolder { parent: String, child: String },
    ParentCycle(String),
    CardInMissingFolder { card: String, folder: String },
    CardNotListed { card: String, folder: String },
    CardListedMoreThanOnce { card: String, times: usize },
    DanglingCard { folder: String, card: String },
    DuplicateSiblingName { parent: String, name: String },
    KeyMismatch { key: String, id: String },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingRoot => write!(f, "root folder is missing"),
            Issue::RootHasParent(p) => write!(f, "root folder has a parent ({})", p),
            Issue::FolderWithoutParent(id) => write!(f, "folder {} has no parent", id),
            Issue::MissingParent { folder, parent } => {
                write!(f, "folder {} points to missing parent {}", folder, parent)
            }
            Issue::NotListedInParent { folder, parent } => {
                write!(f, "folder {} is not listed in its parent {}", folder, parent)
            }
            Issue::ListedMoreThanOnce {
                folder,
                parent,
                times,
            } => write!(f, "folder {} is listed {} times in {}", folder, times, parent),
            Issue::DanglingSubfolder { parent, child } => {
                write!(f, "folder {} lists missing subfolder {}", parent, child)
            }
            Issue::ForeignSubfolder { parent, child } => write!(
                f,
                "folder {} lists {} which belongs to another parent",
                parent, child
            ),
            Issue::ParentCycle(id) => write!(f, "folder {} is part of a parent cycle", id),
            Issue::CardInMissingFolder { card, folder } => {
                write!(f, "card {} points to missing folder {}", card, folder)
            }
            Issue::CardNotListed { card, folder } => {
                write!(f, "card {} is not listed in its folder {}", card, folder)
            }
            Issue::CardListedMoreThanOnce { card, times } => {
                write!(f, "card {} is listed {} times", card, times)
            }
            Issue::DanglingCard { folder, card } => {
                write!(f, "folder {} lists missing card {}", folder, card)
            }
            Issue::DuplicateSiblingName { parent, name } => {
                write!(f, "folder {} has several subfolders named \"{}\"", parent, name)
            }
            Issue::KeyMismatch { key, id } => {
                write!(f, "entry stored under {} carries id {}", key, id)
            }
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CheckReport {
    pub issues: Vec<Issue>,
    pub folders_checked: usize,
    pub cards_checked: usize,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn inspect(tree: &Tree) -> CheckReport {
    let mut report = CheckReport {
        issues: Vec::new(),
        folders_checked: tree.folders.len(),
        cards_checked: tree.cards.len(),
    };
    let issues = &mut report.issues;

    match tree.folders.get(ROOT_ID) {
        None => issues.push(Issue::MissingRoot),
        Some(root) => {
            if let Some(parent) = &root.parent_id {
                issues.push(Issue::RootHasParent(parent.clone()));
            }
        }
    }

    for (key, folder) in &tree.folders {
        if key != &folder.id {
            issues.push(Issue::KeyMismatch {
                key: key.clone(),
                id: folder.id.clone(),
            });
        }
        if key == ROOT_ID {
            continue;
        }
        let Some(parent_id) = &folder.parent_id else {
            issues.push(Issue::FolderWithoutParent(key.clone()));
            continue;
        };
        match tree.folders.get(parent_id) {
            None => issues.push(Issue::MissingParent {
                folder: key.clone(),
                parent: parent_id.clone(),
            }),
            Some(parent) => {
                let times = parent.subfolders.iter().filter(|s| *s == key).count();
                if times == 0 {
                    issues.push(Issue::NotListedInParent {
                        folder: key.clone(),
                        parent: parent_id.clone(),
                    });
                } else if times > 1 {
                    issues.push(Issue::ListedMoreThanOnce {
                        folder: key.clone(),
                        parent: parent_id.clone(),
                        times,
                    });
                }
            }
        }
        if in_parent_cycle(tree, key) {
            issues.push(Issue::ParentCycle(key.clone()));
        }
    }

    for (key, folder) in &tree.folders {
        let mut names = HashSet::new();
        let mut reported = HashSet::new();
        for child_id in &folder.subfolders {
            match tree.folders.get(child_id) {
                None => issues.push(Issue::DanglingSubfolder {
                    parent: key.clone(),
                    child: child_id.clone(),
                }),
                Some(child) => {
                    if child.parent_id.as_deref() != Some(key.as_str()) {
                        issues.push(Issue::ForeignSubfolder {
                            parent: key.clone(),
                            child: child_id.clone(),
                        });
                    }
                    let name = child.name.trim().to_lowercase();
                    if !names.insert(name.clone()) && reported.insert(name) {
                        issues.push(Issue::DuplicateSiblingName {
                            parent: key.clone(),
                            name: child.name.clone(),
                        });
                    }
                }
            }
        }
        for card_id in &folder.cards {
            if !tree.cards.contains_key(card_id) {
                issues.push(Issue::DanglingCard {
                    folder: key.clone(),
                    card: card_id.clone(),
                });
            }
        }
    }

    let mut listings: HashMap<&str, usize> = HashMap::new();
    for folder in tree.folders.values() {
        for card_id in &folder.cards {
            *listings.entry(card_id.as_str()).or_default() += 1;
        }
    }
    for (key, card) in &tree.cards {
        if key != &card.id {
            issues.push(Issue::KeyMismatch {
                key: key.clone(),
                id: card.id.clone(),
            });
        }
        match tree.folders.get(&card.folder_id) {
            None => issues.push(Issue::CardInMissingFolder {
                card: key.clone(),
                folder: card.folder_id.clone(),
            }),
            Some(folder) => {
                if !folder.cards.contains(key) {
                    issues.push(Issue::CardNotListed {
                        card: key.clone(),
                        folder: card.folder_id.clone(),
                    });
                }
            }
        }
        let times = listings.get(key.as_str()).copied().unwrap_or(0);
        if times > 1 {
            issues.push(Issue::CardListedMoreThanOnce {
                card: key.clone(),
                times,
            });
        }
    }

    report
}

fn in_parent_cycle(tree: &Tree, start: &str) -> bool {
    let mut seen = HashSet::new();
    let mut current = Some(start.to_string());
    while let Some(id) = current {
        if !seen.insert(id.clone()) {
            return true;
        }
        current = tree.folders.get(&id).and_then(|f| f.parent_id.clone());
    }
    false
}
