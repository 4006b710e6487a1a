use forage_core::{
    compute_deck_stats, compute_item_stats, resolve, season_gain, CardDef, CardFlags, Catalog,
    Conditions, DeckState, Gain, ItemDef, ItemPool, ResourceVector, StatsOptions,
};

fn catalog() -> Catalog {
    Catalog::new(
        vec![
            CardDef::new("gather", 3, ResourceVector::new(1.0, 1.0, 0.0)),
            CardDef::new("big_catch", 1, ResourceVector::new(0.0, 0.0, 3.0)),
            CardDef::new("find_item", 2, ResourceVector::ZERO).with_flags(CardFlags {
                item_discovery: true,
                ..CardFlags::default()
            }),
            CardDef::new("go_again", 1, ResourceVector::new(1.0, 0.0, 0.0)).with_flags(
                CardFlags {
                    draw_again: true,
                    ..CardFlags::default()
                },
            ),
            CardDef::new("season_change", 1, ResourceVector::ZERO).with_flags(CardFlags {
                season_reset: true,
                ..CardFlags::default()
            }),
        ],
        vec![
            ItemDef::new("ration", 2, 5.0, 0),
            ItemDef::new("backpack", 1, 0.0, 1),
        ],
    )
    .expect("catalog")
}

#[test]
fn follows_the_five_pass_schedule() {
    let catalog = catalog();
    let mut deck = DeckState::fresh(&catalog);
    assert!(deck.adjust(&catalog, "gather", -2));
    assert!(deck.adjust(&catalog, "find_item", -1));
    let mut pool = ItemPool::fresh(&catalog);
    assert!(pool.consume("ration"));
    let conditions = Conditions::default();

    let resolution = resolve(&deck, &pool, &conditions, &catalog);

    let fresh = DeckState::fresh(&catalog);
    let zero = StatsOptions::default().with_item_food_value(0.0);
    let baseline = compute_deck_stats(&fresh, &conditions, &catalog.cards, &zero);
    let without_items = compute_deck_stats(
        &deck,
        &conditions,
        &catalog.cards,
        &zero.with_season_expectation(season_gain(&baseline)),
    );
    let items = compute_item_stats(&pool, &catalog.items, without_items.food_expectation);
    let valued = StatsOptions::default().with_item_food_value(items.expected_food_gain);
    let season_with_items = compute_deck_stats(&fresh, &conditions, &catalog.cards, &valued);
    let stats = compute_deck_stats(
        &deck,
        &conditions,
        &catalog.cards,
        &valued.with_season_expectation(season_gain(&season_with_items)),
    );

    assert_eq!(resolution.season_baseline, baseline);
    assert_eq!(resolution.without_items, without_items);
    assert_eq!(resolution.items, items);
    assert_eq!(resolution.season_with_items, season_with_items);
    assert_eq!(resolution.stats, stats);
}

#[test]
fn item_value_reaches_discovery_and_season_cards() {
    let catalog = catalog();
    let resolution = resolve(
        &DeckState::fresh(&catalog),
        &ItemPool::fresh(&catalog),
        &Conditions::default(),
        &catalog,
    );

    let item_value = resolution.items.expected_food_gain;
    assert!(item_value > 0.0);
    assert_eq!(resolution.stats.immediate_gains["find_item"].food, item_value);
    assert_eq!(
        resolution.without_items.immediate_gains["find_item"].food,
        0.0
    );

    let season = resolution.stats.immediate_gains["season_change"];
    assert_eq!(season, season_gain(&resolution.season_with_items));
    assert!(season.food > resolution.without_items.immediate_gains["season_change"].food);
}

#[test]
fn items_are_priced_from_item_agnostic_deck_food() {
    let catalog = catalog();
    let pool = ItemPool::fresh(&catalog);
    let resolution = resolve(
        &DeckState::fresh(&catalog),
        &pool,
        &Conditions::default(),
        &catalog,
    );
    let per_card = resolution.without_items.food_expectation;
    let expected = (2.0 * 5.0 + per_card) / 3.0;
    assert!((resolution.items.expected_food_gain - expected).abs() < 1e-9);
    // The final deck food differs from the one used to price items: no second round.
    assert!(resolution.stats.food_expectation > per_card);
}

#[test]
fn empty_deck_still_resolves() {
    let catalog = catalog();
    let resolution = resolve(
        &DeckState::empty(&catalog),
        &ItemPool::fresh(&catalog),
        &Conditions::default(),
        &catalog,
    );
    assert_eq!(resolution.stats.total_cards, 0);
    assert_eq!(resolution.stats.food_expectation, 0.0);
    assert!((resolution.items.expected_food_gain - 10.0 / 3.0).abs() < 1e-9);
    assert!(resolution.season_with_items.total_cards > 0);
}

#[test]
fn season_gain_uses_single_draw_vector() {
    let catalog = catalog();
    let stats = compute_deck_stats(
        &DeckState::fresh(&catalog),
        &Conditions::default(),
        &catalog.cards,
        &StatsOptions::default(),
    );
    assert_eq!(
        season_gain(&stats),
        Gain {
            vector: stats.expectation_base,
            food: stats.food_expectation,
        }
    );
}
