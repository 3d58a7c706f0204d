//! # Cardz Architecture
//!
//! Cardz is a **UI-agnostic flashcard library**: folders of two-sided cards, a study
//! mode, and a JSON interchange format. It happens to ship a command-line client.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Resolves names/positions to ids, runs one operation      │
//! │  - No I/O assumptions beyond the files it was handed        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Tree + Storage (tree.rs, merge.rs, store/)                 │
//! │  - The folder/card tree and its invariants                  │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust arguments and returns `Result<CmdResult>`.
//! It never writes to stdout/stderr and never exits the process. Diagnostics go
//! through the `log` facade; the binary decides where they end up.
//!
//! ## Testing Strategy
//!
//! - **Tree** (`tree.rs`, `merge.rs`, `check.rs`): the invariants, exhaustively.
//! - **Commands**: behaviour against `MemBackend`, no filesystem.
//! - **API**: dispatch only.
//! - **CLI**: end-to-end through the real binary (`tests/`).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per user-facing operation
//! - [`tree`]: Folders, cards, and every structural mutation
//! - [`merge`]: Import merge/replace
//! - [`check`]: Read-only invariant verification
//! - [`session`]: The current folder
//! - [`study`]: Study-mode deck
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Folder`, `Card`, `Entry`, `CardOrder`)
//! - [`id`]: Id generation
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and wiring
//! - [`error`]: Error types
//! - `cli`: Argument parsing and rendering for the binary (not part of the lib API)

pub mod api;
pub mod check;
pub mod commands;
pub mod config;
pub mod error;
pub mod id;
pub mod init;
pub mod merge;
pub mod model;
pub mod session;
pub mod store;
pub mod study;
pub mod tree;
