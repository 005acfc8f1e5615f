use std::fs;
use std::path::{Path, PathBuf};

/// Where the custom-card store lives when `--cards` is not given.
///
/// `MINIKERS_CARDS` overrides the location; otherwise the file sits in the
/// user's home directory.
pub fn default_cards_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("MINIKERS_CARDS") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".minikers_cards.json"))
}

/// Default file name for import/export prompts, relative to the working
/// directory so exports are easy to find and hand to someone else.
pub fn default_exchange_path() -> PathBuf {
    PathBuf::from("custom-cards.json")
}

pub fn read_cards_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))
}

pub fn write_cards_file(path: &Path, body: &str) -> Result<(), String> {
    fs::write(path, body).map_err(|err| format!("{}: {err}", path.display()))
}
