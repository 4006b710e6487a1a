use crate::{ItemDef, ItemPool};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemStats {
    pub remaining: u32,
    pub expected_food_gain: f64,
}

/// Extra draws granted by an item are priced at `expected_food_per_card` each, a
/// scalar taken from the deck statistics rather than a recursive evaluation.
pub fn compute_item_stats(
    pool: &ItemPool,
    items: &[ItemDef],
    expected_food_per_card: f64,
) -> ItemStats {
    let remaining = pool.remaining(items);
    if remaining == 0 {
        return ItemStats::default();
    }

    let expected_food_gain = items
        .iter()
        .filter_map(|item| {
            let available = pool.available(item);
            if available == 0 {
                return None;
            }
            let probability = available as f64 / remaining as f64;
            let extra_food = item.extra_draws as f64 * expected_food_per_card;
            Some(probability * (item.food_gain + extra_food))
        })
        .sum();

    ItemStats {
        remaining,
        expected_food_gain,
    }
}
