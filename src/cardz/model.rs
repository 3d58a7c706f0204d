use crate::id::ROOT_ID;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// `None` only for the root folder.
    pub parent_id: Option<String>,
    #[serde(default)]
    pub subfolders: Vec<String>,
    #[serde(default)]
    pub cards: Vec<String>,
}

impl Folder {
    pub fn new(id: String, name: String, parent_id: Option<String>) -> Self {
        Self {
            id,
            name,
            parent_id,
            subfolders: Vec::new(),
            cards: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub front: String,
    pub back: String,
    pub folder_id: String,
    #[serde(default = "Utc::now")]
    pub date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<DateTime<Utc>>,
}

impl Card {
    pub fn new(id: String, folder_id: String, front: String, back: String) -> Self {
        Self {
            id,
            front,
            back,
            folder_id,
            date_created: Utc::now(),
            date_updated: None,
        }
    }

    /// Last time the card changed, creation time if it was never edited.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.date_updated.unwrap_or(self.date_created)
    }
}

/// Something that lives inside a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Folder(Folder),
    Card(Card),
}

impl Entry {
    pub fn id(&self) -> &str {
        match self {
            Entry::Folder(f) => &f.id,
            Entry::Card(c) => &c.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Entry::Folder(f) => &f.name,
            Entry::Card(c) => &c.front,
        }
    }
}

/// Ordering applied to cards when listing or studying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardOrder {
    /// The folder's own order (insertion order).
    #[default]
    Position,
    /// Most recently created first.
    Newest,
    /// By front text, case-insensitive.
    Alphabetical,
}

impl std::fmt::Display for CardOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CardOrder::Position => "position",
            CardOrder::Newest => "newest",
            CardOrder::Alphabetical => "alphabetical",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for CardOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "position" => Ok(CardOrder::Position),
            "newest" | "date" => Ok(CardOrder::Newest),
            "alphabetical" | "alpha" => Ok(CardOrder::Alphabetical),
            other => Err(format!("Unknown card order: {}", other)),
        }
    }
}

/// Case-insensitive substring match on either side of the card.
/// An empty (or blank) term keeps every card.
pub fn filter_cards(cards: Vec<Card>, term: &str) -> Vec<Card> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return cards;
    }
    cards
        .into_iter()
        .filter(|c| c.front.to_lowercase().contains(&term) || c.back.to_lowercase().contains(&term))
        .collect()
}

pub fn sort_cards(mut cards: Vec<Card>, order: CardOrder) -> Vec<Card> {
    match order {
        CardOrder::Position => {}
        CardOrder::Newest => cards.sort_by(|a, b| b.date_created.cmp(&a.date_created)),
        CardOrder::Alphabetical => {
            cards.sort_by(|a, b| a.front.to_lowercase().cmp(&b.front.to_lowercase()))
        }
    }
    cards
}

/// Trims a user-supplied text field, rejecting it when nothing is left.
pub(crate) fn require_text(value: &str, field: &str) -> crate::error::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(crate::error::CardzError::Validation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}
