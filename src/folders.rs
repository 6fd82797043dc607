/// Folder id derivation and inbox synthesis
use crate::bookmark_data::{Folder, INBOX_FOLDER_ID};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").unwrap());

/// Derive a folder id from its name and the creation time
///
/// Algorithm:
/// 1. Lowercase the name
/// 2. Replace every whitespace character with "-"
/// 3. Append "-" and the last 4 digits of the epoch-millisecond timestamp
///
/// Two folders with the same name created 10 seconds apart (mod 10^4 ms)
/// get the same id; this is not detected.
///
/// Examples:
/// - ("Reading", 1700000001234) → "reading-1234"
/// - ("Side Projects", 1700000000042) → "side-projects-0042"
pub fn folder_slug(name: &str, now_ms: f64) -> String {
    let base = WHITESPACE.replace_all(&name.to_lowercase(), "-").into_owned();
    let millis = (now_ms.max(0.0) as u64).to_string();
    let suffix = &millis[millis.len().saturating_sub(4)..];

    format!("{}-{}", base, suffix)
}

/// Persisted folders as every reader displays them: the inbox first when
/// storage does not hold one, otherwise unchanged.
pub fn normalize_folders(persisted: &[Folder], inbox_name: &str) -> Vec<Folder> {
    if persisted.iter().any(|f| f.id == INBOX_FOLDER_ID) {
        return persisted.to_vec();
    }

    std::iter::once(Folder::inbox(inbox_name))
        .chain(persisted.iter().cloned())
        .collect()
}
