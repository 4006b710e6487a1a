use crate::catalog::{resolve_catalog, RawCard, RawItem};
use anyhow::Context;
use forage_core::Catalog;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const CARDS_FILE: &str = "cards.json";
pub const ITEMS_FILE: &str = "items.json";

/// Load `cards.json` and `items.json` from `dir`, using the same shapes as the built-in
/// catalog.
pub fn load_catalog_dir(dir: &Path) -> anyhow::Result<Catalog> {
    load_catalog_dir_with_locale(dir, None)
}

pub fn load_catalog_dir_with_locale(dir: &Path, locale: Option<&str>) -> anyhow::Result<Catalog> {
    let cards: Vec<RawCard> = load_json(dir.join(CARDS_FILE))?;
    let items: Vec<RawItem> = load_json(dir.join(ITEMS_FILE))?;
    resolve_catalog(cards, items, locale)
        .with_context(|| format!("load catalog from {}", dir.display()))
}

/// Canonical form of a locale tag. Empty input selects English.
pub fn normalize_locale(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return "en_US".to_string();
    }
    let lowered = trimmed.replace('-', "_").to_ascii_lowercase();
    match lowered.as_str() {
        "en" | "en_us" => "en_US".to_string(),
        "ja" | "jp" | "ja_jp" => "ja_JP".to_string(),
        _ => trimmed.replace('-', "_"),
    }
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
