use crate::load::normalize_locale;
use anyhow::Context;
use forage_core::{
    CardDef, CardFlags, CardGroup, Catalog, ConditionalReward, ItemDef, ResourceVector,
};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const DEFAULT_LOCALE: &str = "en_US";
pub const SUPPORTED_LOCALES: [&str; 2] = ["en_US", "ja_JP"];

const BUILTIN_CARDS: &[u8] = include_bytes!("../catalog/cards.json");
const BUILTIN_ITEMS: &[u8] = include_bytes!("../catalog/items.json");

/// The compiled-in catalog with English names.
pub fn builtin_catalog() -> Catalog {
    builtin_catalog_with_locale(None)
}

/// The compiled-in catalog with names in `locale`, falling back to English.
pub fn builtin_catalog_with_locale(locale: Option<&str>) -> Catalog {
    parse_catalog(BUILTIN_CARDS, BUILTIN_ITEMS, locale)
        .expect("built-in catalog JSON must be valid")
}

/// Parse card and item JSON documents and validate the result.
pub fn parse_catalog(
    cards_json: &[u8],
    items_json: &[u8],
    locale: Option<&str>,
) -> anyhow::Result<Catalog> {
    let cards: Vec<RawCard> = serde_json::from_slice(cards_json).context("parse cards JSON")?;
    let items: Vec<RawItem> = serde_json::from_slice(items_json).context("parse items JSON")?;
    resolve_catalog(cards, items, locale)
}

pub(crate) fn resolve_catalog(
    cards: Vec<RawCard>,
    items: Vec<RawItem>,
    locale: Option<&str>,
) -> anyhow::Result<Catalog> {
    let locale = normalize_locale(locale.unwrap_or(DEFAULT_LOCALE));
    let cards = cards.into_iter().map(|raw| raw.resolve(&locale)).collect();
    let items = items.into_iter().map(|raw| raw.resolve(&locale)).collect();
    let catalog = Catalog::new(cards, items).context("validate catalog")?;
    Ok(catalog)
}

/// Section heading for a card group.
pub fn group_title(group: CardGroup, locale: &str) -> &'static str {
    let ja = normalize_locale(locale) == "ja_JP";
    match (group, ja) {
        (CardGroup::GeneralGather, false) => "Gathering",
        (CardGroup::GeneralGather, true) => "採集カード",
        (CardGroup::GeneralOverhunt, false) => "Overhunting",
        (CardGroup::GeneralOverhunt, true) => "乱獲カード",
        (CardGroup::ItemDiscovery, false) => "Item discovery",
        (CardGroup::ItemDiscovery, true) => "アイテム発見",
        (CardGroup::MonoResource, false) => "Single-resource bounty",
        (CardGroup::MonoResource, true) => "同色大量シリーズ",
        (CardGroup::ReliefMinChar, false) => "Relief: fewest characters",
        (CardGroup::ReliefMinChar, true) => "救済シリーズ: 最少キャラ条件",
        (CardGroup::ReliefHigherChar, false) => "Relief: room character gap",
        (CardGroup::ReliefHigherChar, true) => "救済シリーズ: キャラ部屋合計格差条件",
        (CardGroup::PowerEvents, false) => "Power events",
        (CardGroup::PowerEvents, true) => "強力イベント",
        (CardGroup::GoAgain, false) => "Go again",
        (CardGroup::GoAgain, true) => "いってらっしゃいシリーズ",
    }
}

// ── Deserialization types ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct RawCard {
    id: String,
    #[serde(default)]
    names: BTreeMap<String, String>,
    group: CardGroup,
    quantity: u32,
    #[serde(default)]
    base_reward: ResourceVector,
    #[serde(default)]
    conditional_rewards: Vec<ConditionalReward>,
    #[serde(default)]
    flags: CardFlags,
}

#[derive(Deserialize)]
pub(crate) struct RawItem {
    id: String,
    #[serde(default)]
    names: BTreeMap<String, String>,
    quantity: u32,
    #[serde(default)]
    food_gain: f64,
    #[serde(default)]
    extra_draws: u32,
}

impl RawCard {
    fn resolve(self, locale: &str) -> CardDef {
        CardDef {
            name: localized_name(&self.names, &self.id, locale),
            id: self.id,
            group: self.group,
            quantity: self.quantity,
            base_reward: self.base_reward,
            conditional_rewards: self.conditional_rewards,
            flags: self.flags,
        }
    }
}

impl RawItem {
    fn resolve(self, locale: &str) -> ItemDef {
        ItemDef {
            name: localized_name(&self.names, &self.id, locale),
            id: self.id,
            quantity: self.quantity,
            food_gain: self.food_gain,
            extra_draws: self.extra_draws,
        }
    }
}

fn localized_name(names: &BTreeMap<String, String>, id: &str, locale: &str) -> String {
    names
        .get(locale)
        .or_else(|| names.get(DEFAULT_LOCALE))
        .cloned()
        .unwrap_or_else(|| id.to_string())
}
