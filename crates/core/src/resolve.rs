use crate::{
    compute_deck_stats, compute_item_stats, Catalog, Conditions, DeckState, DeckStats, Gain,
    ItemPool, ItemStats, StatsOptions,
};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Resolution {
    pub season_baseline: DeckStats,
    pub without_items: DeckStats,
    pub items: ItemStats,
    pub season_with_items: DeckStats,
    pub stats: DeckStats,
}

pub fn season_gain(fresh: &DeckStats) -> Gain {
    Gain {
        vector: fresh.expectation_base,
        food: fresh.food_expectation,
    }
}

/// Breaks the deck/item dependency with a fixed two-pass schedule.
///
/// Item value is computed once from item-agnostic deck statistics and then used to
/// finalize the deck statistics. There is no iteration to a fixed point; changing the
/// pass order changes the displayed numbers.
pub fn resolve(
    deck: &DeckState,
    pool: &ItemPool,
    conditions: &Conditions,
    catalog: &Catalog,
) -> Resolution {
    let fresh = DeckState::fresh(catalog);
    let zero_items = StatsOptions::default().with_item_food_value(0.0);

    let season_baseline = compute_deck_stats(&fresh, conditions, &catalog.cards, &zero_items);
    debug!(
        "season baseline: food={:.3} base={:?}",
        season_baseline.food_expectation, season_baseline.expectation_base
    );

    let without_items = compute_deck_stats(
        deck,
        conditions,
        &catalog.cards,
        &zero_items.with_season_expectation(season_gain(&season_baseline)),
    );
    debug!(
        "deck without items: cards={} food={:.3}",
        without_items.total_cards, without_items.food_expectation
    );

    let items = compute_item_stats(pool, &catalog.items, without_items.food_expectation);
    debug!(
        "items: remaining={} expected_food={:.3}",
        items.remaining, items.expected_food_gain
    );

    let with_items = StatsOptions::default().with_item_food_value(items.expected_food_gain);
    let season_with_items = compute_deck_stats(&fresh, conditions, &catalog.cards, &with_items);
    let stats = compute_deck_stats(
        deck,
        conditions,
        &catalog.cards,
        &with_items.with_season_expectation(season_gain(&season_with_items)),
    );
    debug!(
        "final: cards={} food={:.3}",
        stats.total_cards, stats.food_expectation
    );

    Resolution {
        season_baseline,
        without_items,
        items,
        season_with_items,
        stats,
    }
}
