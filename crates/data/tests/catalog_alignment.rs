use forage_core::{
    resolve, CardGroup, ConditionKey, Conditions, DeckState, EventBus, ItemPool, Resource,
    ResourceVector, Tracker,
};
use forage_data::builtin_catalog;

const EPS: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn builtin_catalog_sizes() {
    let catalog = builtin_catalog();
    assert_eq!(catalog.cards.len(), 32);
    assert_eq!(catalog.deck_size(), 48);
    assert_eq!(catalog.items.len(), 11);
    assert_eq!(catalog.pool_size(), 18);
    assert_eq!(catalog.cards_in_group(CardGroup::GoAgain).count(), 3);
    assert_eq!(
        catalog.season_card().map(|card| card.id.as_str()),
        Some("season_change")
    );
}

#[test]
fn fresh_deck_probabilities() {
    let catalog = builtin_catalog();
    let resolution = resolve(
        &DeckState::fresh(&catalog),
        &ItemPool::fresh(&catalog),
        &Conditions::default(),
        &catalog,
    );
    let stats = &resolution.stats;
    assert_eq!(stats.total_cards, 48);
    assert_eq!(stats.item_count, 10);
    assert_close(stats.item_probability, 10.0 / 48.0);
    assert_eq!(stats.extra_action_count, 1);
    assert_close(stats.extra_action_probability, 1.0 / 48.0);

    // Each resource totals 26 units across the deck.
    let baseline = &resolution.season_baseline;
    for resource in Resource::ALL {
        assert_close(baseline.expectation_base.get(resource), 26.0 / 48.0);
        assert_close(baseline.resource_at_least.get(resource, 1), 20.0 / 48.0);
        assert_close(baseline.resource_at_least.get(resource, 2), 5.0 / 48.0);
        assert_close(baseline.resource_at_least.get(resource, 3), 1.0 / 48.0);
    }
}

#[test]
fn fresh_deck_resolution_values() {
    let catalog = builtin_catalog();
    let resolution = resolve(
        &DeckState::fresh(&catalog),
        &ItemPool::fresh(&catalog),
        &Conditions::default(),
        &catalog,
    );
    assert_close(resolution.season_baseline.food_expectation, 1.7619680851063833);
    assert_close(resolution.without_items.food_expectation, 1.8017998104345863);
    assert_eq!(resolution.items.remaining, 18);
    assert_close(resolution.items.expected_food_gain, 3.7117110479226403);
    assert_close(resolution.season_with_items.food_expectation, 2.6010516996633637);
    assert_close(resolution.stats.food_expectation, 2.6598520705334123);

    let final_vector = resolution.stats.expectation_final;
    assert_close(final_vector.fruit, 0.5995678191489361);
    assert_close(final_vector.meat, final_vector.fruit);
    assert_close(final_vector.fish, final_vector.fruit);
}

#[test]
fn favorite_selection_is_additive_on_builtin_deck() {
    let catalog = builtin_catalog();
    let deck = DeckState::fresh(&catalog);
    let pool = ItemPool::fresh(&catalog);
    let mut conditions = Conditions::default();
    let mut previous = resolve(&deck, &pool, &conditions, &catalog)
        .stats
        .food_expectation;
    let mut expected = ResourceVector::ZERO;
    for resource in Resource::ALL {
        conditions.favorite.set(resource, true);
        expected.set(resource, 2.0);
        let resolution = resolve(&deck, &pool, &conditions, &catalog);
        assert_eq!(
            resolution.stats.immediate_gains["everyone_favorite"].vector,
            expected
        );
        assert!(resolution.stats.food_expectation > previous);
        previous = resolution.stats.food_expectation;
    }
    assert_close(previous, 2.8092449725250184);
}

#[test]
fn min_char_condition_boosts_relief_cards() {
    let catalog = builtin_catalog();
    let deck = DeckState::fresh(&catalog);
    let pool = ItemPool::fresh(&catalog);
    let conditions = Conditions {
        is_min_char_player: true,
        ..Conditions::default()
    };
    let resolution = resolve(&deck, &pool, &conditions, &catalog);
    let gains = &resolution.stats.immediate_gains;
    assert_eq!(gains["rescued_fish"].vector, ResourceVector::new(1.0, 1.0, 1.0));
    assert_eq!(gains["blessing_spring"].vector, ResourceVector::new(1.0, 1.0, 1.0));
    assert_eq!(gains["basket_with_hole"].vector, ResourceVector::new(1.0, 1.0, 1.0));
    assert_eq!(gains["harvest_help"].vector, ResourceVector::new(1.0, 1.0, 0.0));
    for resource in Resource::ALL {
        assert_close(
            resolution.season_baseline.expectation_base.get(resource),
            27.0 / 48.0,
        );
    }
    assert!(conditions.is_satisfied(ConditionKey::IsMinCharPlayer));
}

#[test]
fn tracking_a_session() {
    let catalog = builtin_catalog();
    let mut tracker = Tracker::new(&catalog);
    let mut events = EventBus::default();

    for _ in 0..8 {
        assert!(tracker.adjust_card("find_item", -1, &mut events));
    }
    assert!(!tracker.adjust_card("find_item", -1, &mut events));
    assert_eq!(tracker.toggle_card("mysterious_spring", 0, &mut events), Some(false));

    let stats = tracker.resolve().stats;
    assert_eq!(stats.total_cards, 39);
    assert_eq!(stats.item_count, 2);
    assert_close(stats.item_probability, 2.0 / 39.0);
    assert_eq!(stats.extra_action_count, 0);

    assert!(tracker.adjust_item("blueprint", -1, &mut events));
    assert!(tracker.adjust_item("blueprint", -1, &mut events));
    assert!(!tracker.adjust_item("blueprint", -1, &mut events));
    assert_eq!(tracker.resolve().items.remaining, 16);

    assert!(tracker.reset_season(&mut events));
    let resolution = tracker.resolve();
    assert_eq!(resolution.stats.total_cards, 48);
    assert_eq!(resolution.items.remaining, 16);
    assert_eq!(events.drain().count(), 12);
}
