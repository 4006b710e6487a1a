use crate::{CardDef, Conditions, DeckState, Resource, ResourceVector};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const THRESHOLDS: [u32; 3] = [1, 2, 3];

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Gain {
    pub vector: ResourceVector,
    pub food: f64,
}

impl Gain {
    pub fn from_vector(vector: ResourceVector) -> Self {
        Self {
            food: vector.sum(),
            vector,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct StatsOptions {
    /// Food credited to an item-discovery card, i.e. the value of using the found item.
    pub item_food_value: Option<f64>,
    pub season_expectation: Option<Gain>,
}

impl StatsOptions {
    pub fn with_item_food_value(mut self, value: f64) -> Self {
        self.item_food_value = Some(value);
        self
    }

    pub fn with_season_expectation(mut self, gain: Gain) -> Self {
        self.season_expectation = Some(gain);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ThresholdTable {
    pub fruit: [f64; 3],
    pub meat: [f64; 3],
    pub fish: [f64; 3],
}

impl ThresholdTable {
    pub fn get(&self, resource: Resource, threshold: u32) -> f64 {
        let Some(slot) = THRESHOLDS.iter().position(|value| *value == threshold) else {
            return 0.0;
        };
        self.row(resource)[slot]
    }

    pub fn row(&self, resource: Resource) -> &[f64; 3] {
        match resource {
            Resource::Fruit => &self.fruit,
            Resource::Meat => &self.meat,
            Resource::Fish => &self.fish,
        }
    }

    fn row_mut(&mut self, resource: Resource) -> &mut [f64; 3] {
        match resource {
            Resource::Fruit => &mut self.fruit,
            Resource::Meat => &mut self.meat,
            Resource::Fish => &mut self.fish,
        }
    }

    fn accumulate(&mut self, vector: ResourceVector, probability: f64) {
        for resource in Resource::ALL {
            let amount = vector.get(resource);
            let row = self.row_mut(resource);
            for (slot, threshold) in THRESHOLDS.iter().enumerate() {
                if amount >= *threshold as f64 {
                    row[slot] += probability;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeckStats {
    pub total_cards: u32,
    pub item_count: u32,
    pub item_probability: f64,
    pub extra_action_count: u32,
    pub extra_action_probability: f64,
    pub expectation_base: ResourceVector,
    pub expectation_final: ResourceVector,
    pub food_expectation: f64,
    pub resource_at_least: ThresholdTable,
    pub immediate_gains: BTreeMap<String, Gain>,
}

pub fn immediate_gain(card: &CardDef, conditions: &Conditions, options: &StatsOptions) -> Gain {
    if card.flags.season_reset {
        if let Some(season) = options.season_expectation {
            return season;
        }
    }

    let base = if card.flags.favorite_bonus {
        conditions.favorite.bonus_vector()
    } else {
        card.base_reward
    };
    let vector = card
        .conditional_rewards
        .iter()
        .filter(|entry| conditions.is_satisfied(entry.condition))
        .fold(base, |acc, entry| acc + entry.reward);

    let food = match options.item_food_value {
        Some(value) if card.flags.item_discovery => value,
        _ => vector.sum(),
    };
    Gain { vector, food }
}

/// Statistics of the next draw from `deck`.
///
/// Cards that grant another draw are credited with the average of the rest of the
/// deck: the pool-wide total minus one copy of the card itself, divided by
/// `total_cards - 1`. This is a single-step lookahead and is not re-normalized when
/// several chaining cards are likely at once.
pub fn compute_deck_stats(
    deck: &DeckState,
    conditions: &Conditions,
    cards: &[CardDef],
    options: &StatsOptions,
) -> DeckStats {
    let gains: Vec<Gain> = cards
        .iter()
        .map(|card| immediate_gain(card, conditions, options))
        .collect();

    let mut stats = DeckStats {
        immediate_gains: cards
            .iter()
            .zip(&gains)
            .map(|(card, gain)| (card.id.clone(), *gain))
            .collect(),
        ..DeckStats::default()
    };
    for card in cards {
        let remaining = deck.remaining(&card.id);
        stats.total_cards += remaining;
        if card.flags.item_discovery {
            stats.item_count += remaining;
        }
        if card.flags.bonus_action {
            stats.extra_action_count += remaining;
        }
    }

    if stats.total_cards == 0 {
        return stats;
    }
    let total = stats.total_cards as f64;

    let mut pool_vector = ResourceVector::ZERO;
    let mut pool_food = 0.0;
    for (card, gain) in cards.iter().zip(&gains) {
        let remaining = deck.remaining(&card.id) as f64;
        pool_vector += gain.vector * remaining;
        pool_food += gain.food * remaining;
    }
    stats.expectation_base = pool_vector.scale(1.0 / total);

    let rest_cards = stats.total_cards - 1;
    for (card, gain) in cards.iter().zip(&gains) {
        let remaining = deck.remaining(&card.id);
        if remaining == 0 {
            continue;
        }
        let probability = remaining as f64 / total;

        let (effective_vector, effective_food) = if card.chains_extra_draw() {
            let (rest_vector, rest_food) = if rest_cards > 0 {
                let rest = rest_cards as f64;
                (
                    (pool_vector - gain.vector).scale(1.0 / rest),
                    (pool_food - gain.food) / rest,
                )
            } else {
                (ResourceVector::ZERO, 0.0)
            };
            (gain.vector + rest_vector, gain.food + rest_food)
        } else {
            (gain.vector, gain.food)
        };
        trace!(
            "card {} p={:.4} effective={:?} food={:.3}",
            card.id,
            probability,
            effective_vector,
            effective_food
        );

        stats.expectation_final += effective_vector * probability;
        stats.food_expectation += effective_food * probability;
        stats
            .resource_at_least
            .accumulate(effective_vector, probability);
    }

    stats.item_probability = stats.item_count as f64 / total;
    stats.extra_action_probability = stats.extra_action_count as f64 / total;
    stats
}
