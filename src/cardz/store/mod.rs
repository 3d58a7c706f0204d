//! # Storage Layer
//!
//! The whole tree is one JSON document. Persistence is split in two:
//!
//! - [`backend::StorageBackend`]: raw key/value text I/O (the "how").
//! - [`card_store::CardStore`]: the tree document and the session built on top
//!   of a backend (the "what").
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one file per key in the data directory. Writes go
//!   to a temp file first and are renamed into place.
//! - [`mem_backend::MemBackend`]: in-memory map for tests, able to simulate
//!   write failures.
//!
//! ## Read-Modify-Write
//!
//! Every mutation loads the document, applies the change in memory and saves the
//! full document back. Nothing is written when the change fails, so a rejected
//! operation leaves the stored tree exactly as it was.
//!
//! A missing document reads as a tree holding only the root folder; that root is
//! written the first time something changes.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── tree.json       # Folders and cards
//! ├── session.json    # Current folder
//! └── config.json     # Settings
//! ```

pub mod backend;
pub mod card_store;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::{StorageBackend, SESSION_KEY, TREE_KEY};
pub use card_store::CardStore;
