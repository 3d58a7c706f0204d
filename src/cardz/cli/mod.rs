//! # CLI Behavior
//!
//! This is **one possible UI client** for cardz, not the application itself.
//! For the overall architecture, see the crate-level documentation of the `cardz` library.
//!
//! ## Where Things Are
//!
//! The CLI keeps state between invocations the way a browsing UI would: `cardz cd`
//! remembers the folder, and every folder argument that is not an id is a path
//! relative to it (or to root, with a leading `/`). Cards are addressed by id or
//! by the number `cardz ls` shows next to them.
//!
//! ## Logging
//!
//! Library diagnostics go through `log`. They are shown at `warn` by default,
//! at `debug` with `-v`, and `RUST_LOG` overrides both.

mod commands;
mod render;
mod setup;

pub use commands::run;
