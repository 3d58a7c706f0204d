use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardzError {
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("No folder or card with id: {0}")]
    EntryNotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Cannot move folder {folder} into {target}: it is the folder itself or one of its descendants")]
    CyclicMove { folder: String, target: String },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("A folder named \"{name}\" already exists in {parent}")]
    DuplicateName { name: String, parent: String },

    #[error("{0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl CardzError {
    /// The coarse error kind, as presented to callers that only care about the category.
    pub fn kind(&self) -> &'static str {
        match self {
            CardzError::FolderNotFound(_)
            | CardzError::CardNotFound(_)
            | CardzError::EntryNotFound(_) => "NotFound",
            CardzError::Forbidden(_) => "Forbidden",
            CardzError::CyclicMove { .. } => "CyclicMove",
            CardzError::InvalidFormat(_) => "InvalidFormat",
            CardzError::DuplicateName { .. } => "DuplicateName",
            CardzError::Validation(_) => "Validation",
            CardzError::Io(_) => "Io",
            CardzError::Serialization(_) => "Serialization",
            CardzError::Store(_) => "Store",
            CardzError::Api(_) => "Api",
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == "NotFound"
    }
}

pub type Result<T> = std::result::Result<T, CardzError>;
