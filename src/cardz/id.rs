//! Identifier generation.
//!
//! Ids are `<prefix>_<unix millis>_<9 random chars>`, e.g. `card_1718000000000_3f9a0c21b`.
//! The random part comes from a v4 UUID. Ids are never reused: generation retries
//! until the candidate is not already taken by the caller's map.

use chrono::Utc;
use uuid::Uuid;

/// Id of the singleton root folder.
pub const ROOT_ID: &str = "root";

/// Display name of the root folder.
pub const ROOT_NAME: &str = "Root";

const FOLDER_PREFIX: &str = "folder";
const CARD_PREFIX: &str = "card";
const SUFFIX_LEN: usize = 9;

fn generate(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, millis, &random[..SUFFIX_LEN])
}

fn fresh<F: Fn(&str) -> bool>(prefix: &str, taken: F) -> String {
    loop {
        let candidate = generate(prefix);
        if !taken(&candidate) {
            return candidate;
        }
    }
}

/// A new folder id for which `taken` returns false.
pub fn folder_id<F: Fn(&str) -> bool>(taken: F) -> String {
    fresh(FOLDER_PREFIX, taken)
}

/// A new card id for which `taken` returns false.
pub fn card_id<F: Fn(&str) -> bool>(taken: F) -> String {
    fresh(CARD_PREFIX, taken)
}
