use crate::{ConditionKey, ResourceVector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CardGroup {
    GeneralGather,
    GeneralOverhunt,
    ItemDiscovery,
    MonoResource,
    ReliefMinChar,
    ReliefHigherChar,
    PowerEvents,
    GoAgain,
}

impl CardGroup {
    pub const ALL: [CardGroup; 8] = [
        CardGroup::GeneralGather,
        CardGroup::GeneralOverhunt,
        CardGroup::ItemDiscovery,
        CardGroup::MonoResource,
        CardGroup::ReliefMinChar,
        CardGroup::ReliefHigherChar,
        CardGroup::PowerEvents,
        CardGroup::GoAgain,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionalReward {
    pub condition: ConditionKey,
    pub reward: ResourceVector,
}

/// Behaviour bits of a card. They are independent, not an exclusive kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CardFlags {
    pub item_discovery: bool,
    pub bonus_action: bool,
    pub draw_again: bool,
    pub favorite_bonus: bool,
    pub season_reset: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardDef {
    pub id: String,
    pub name: String,
    pub group: CardGroup,
    pub quantity: u32,
    pub base_reward: ResourceVector,
    #[serde(default)]
    pub conditional_rewards: Vec<ConditionalReward>,
    #[serde(default)]
    pub flags: CardFlags,
}

impl CardDef {
    pub fn new(id: impl Into<String>, quantity: u32, base_reward: ResourceVector) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            group: CardGroup::GeneralGather,
            quantity,
            base_reward,
            conditional_rewards: Vec::new(),
            flags: CardFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: CardFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_conditional(mut self, condition: ConditionKey, reward: ResourceVector) -> Self {
        self.conditional_rewards
            .push(ConditionalReward { condition, reward });
        self
    }

    pub fn chains_extra_draw(&self) -> bool {
        self.flags.draw_again || self.flags.bonus_action
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub food_gain: f64,
    #[serde(default)]
    pub extra_draws: u32,
}

impl ItemDef {
    pub fn new(id: impl Into<String>, quantity: u32, food_gain: f64, extra_draws: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            quantity,
            food_gain,
            extra_draws,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("card {0} has zero quantity")]
    EmptyCard(String),
    #[error("item {0} has zero quantity")]
    EmptyItem(String),
    #[error("duplicate card id {0}")]
    DuplicateCard(String),
    #[error("duplicate item id {0}")]
    DuplicateItem(String),
    #[error("card {0} has a negative or non-finite reward")]
    InvalidReward(String),
    #[error("item {0} has a negative or non-finite food gain")]
    InvalidFoodGain(String),
    #[error("more than one season reset card ({0}, {1})")]
    MultipleSeasonCards(String, String),
    #[error("more than one favorite bonus card ({0}, {1})")]
    MultipleFavoriteCards(String, String),
}

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub cards: Vec<CardDef>,
    pub items: Vec<ItemDef>,
}

impl Catalog {
    pub fn new(cards: Vec<CardDef>, items: Vec<ItemDef>) -> Result<Self, CatalogError> {
        let mut card_ids = HashSet::new();
        let mut season: Option<&str> = None;
        let mut favorite: Option<&str> = None;
        for card in &cards {
            if card.quantity == 0 {
                return Err(CatalogError::EmptyCard(card.id.clone()));
            }
            if !card_ids.insert(card.id.as_str()) {
                return Err(CatalogError::DuplicateCard(card.id.clone()));
            }
            let rewards_valid = card.base_reward.is_valid_reward()
                && card
                    .conditional_rewards
                    .iter()
                    .all(|entry| entry.reward.is_valid_reward());
            if !rewards_valid {
                return Err(CatalogError::InvalidReward(card.id.clone()));
            }
            if card.flags.season_reset {
                if let Some(first) = season {
                    return Err(CatalogError::MultipleSeasonCards(
                        first.to_string(),
                        card.id.clone(),
                    ));
                }
                season = Some(card.id.as_str());
            }
            if card.flags.favorite_bonus {
                if let Some(first) = favorite {
                    return Err(CatalogError::MultipleFavoriteCards(
                        first.to_string(),
                        card.id.clone(),
                    ));
                }
                favorite = Some(card.id.as_str());
            }
        }

        let mut item_ids = HashSet::new();
        for item in &items {
            if item.quantity == 0 {
                return Err(CatalogError::EmptyItem(item.id.clone()));
            }
            if !item_ids.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateItem(item.id.clone()));
            }
            if !item.food_gain.is_finite() || item.food_gain < 0.0 {
                return Err(CatalogError::InvalidFoodGain(item.id.clone()));
            }
        }

        Ok(Self { cards, items })
    }

    pub fn card(&self, id: &str) -> Option<&CardDef> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn cards_in_group(&self, group: CardGroup) -> impl Iterator<Item = &CardDef> + '_ {
        self.cards.iter().filter(move |card| card.group == group)
    }

    pub fn season_card(&self) -> Option<&CardDef> {
        self.cards.iter().find(|card| card.flags.season_reset)
    }

    pub fn deck_size(&self) -> u32 {
        self.cards.iter().map(|card| card.quantity).sum()
    }

    pub fn pool_size(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
