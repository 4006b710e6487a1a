use crate::{
    resolve, Catalog, ConditionKey, Conditions, DeckState, Event, EventBus, ItemPool,
    PresenceMap, Resolution, Resource,
};

/// Counting session: owns what the operator has marked as drawn or used and the
/// table conditions. Each method is one full read-modify-write of that state.
#[derive(Debug, Clone)]
pub struct Tracker<'a> {
    catalog: &'a Catalog,
    cards: PresenceMap,
    items: ItemPool,
    conditions: Conditions,
}

impl<'a> Tracker<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_conditions(catalog, Conditions::default())
    }

    pub fn with_conditions(catalog: &'a Catalog, conditions: Conditions) -> Self {
        Self {
            catalog,
            cards: PresenceMap::for_cards(catalog),
            items: ItemPool::fresh(catalog),
            conditions,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn cards(&self) -> &PresenceMap {
        &self.cards
    }

    pub fn items(&self) -> &ItemPool {
        &self.items
    }

    pub fn deck_state(&self) -> DeckState {
        DeckState::from_presence(&self.cards, self.catalog)
    }

    pub fn resolve(&self) -> Resolution {
        resolve(
            &self.deck_state(),
            &self.items,
            &self.conditions,
            self.catalog,
        )
    }

    pub fn toggle_card(&mut self, id: &str, index: u32, events: &mut EventBus) -> Option<bool> {
        let present = self.cards.toggle(id, index)?;
        events.push(Event::CardToggled {
            id: id.to_string(),
            index,
            present,
        });
        Some(present)
    }

    pub fn adjust_card(&mut self, id: &str, delta: i32, events: &mut EventBus) -> bool {
        if !self.cards.adjust(id, delta) {
            return false;
        }
        events.push(Event::CardAdjusted {
            id: id.to_string(),
            remaining: self.cards.count(id),
        });
        true
    }

    pub fn toggle_item(&mut self, id: &str, index: u32, events: &mut EventBus) -> Option<bool> {
        let available = self.items.toggle(id, index)?;
        events.push(Event::ItemToggled {
            id: id.to_string(),
            index,
            available,
        });
        Some(available)
    }

    pub fn adjust_item(&mut self, id: &str, delta: i32, events: &mut EventBus) -> bool {
        let changed = match delta {
            -1 => self.items.consume(id),
            1 => self.items.restore(id),
            _ => false,
        };
        if !changed {
            return false;
        }
        events.push(Event::ItemAdjusted {
            id: id.to_string(),
            available: self.items.presence().count(id),
        });
        true
    }

    pub fn set_condition(
        &mut self,
        key: ConditionKey,
        value: bool,
        events: &mut EventBus,
    ) -> bool {
        if self.conditions.is_satisfied(key) == value {
            return false;
        }
        self.conditions.set(key, value);
        events.push(Event::ConditionChanged { key, value });
        true
    }

    pub fn toggle_condition(&mut self, key: ConditionKey, events: &mut EventBus) -> bool {
        let value = self.conditions.toggle(key);
        events.push(Event::ConditionChanged { key, value });
        value
    }

    pub fn set_favorite(
        &mut self,
        resource: Resource,
        selected: bool,
        events: &mut EventBus,
    ) -> bool {
        if self.conditions.favorite.is_selected(resource) == selected {
            return false;
        }
        self.conditions.favorite.set(resource, selected);
        events.push(Event::FavoriteChanged { resource, selected });
        true
    }

    pub fn toggle_favorite(&mut self, resource: Resource, events: &mut EventBus) -> bool {
        let selected = self.conditions.favorite.toggle(resource);
        events.push(Event::FavoriteChanged { resource, selected });
        selected
    }

    /// Puts every card back. Conditions and the item pool are left untouched.
    pub fn reset_season(&mut self, events: &mut EventBus) -> bool {
        if self.cards == PresenceMap::for_cards(self.catalog) {
            return false;
        }
        self.cards.reset();
        events.push(Event::SeasonReset {
            remaining: self.cards.total_present(),
        });
        true
    }

    pub fn reset_items(&mut self, events: &mut EventBus) -> bool {
        if self.items == ItemPool::fresh(self.catalog) {
            return false;
        }
        self.items.reset();
        events.push(Event::ItemsReset {
            remaining: self.items.remaining(&self.catalog.items),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardDef, ItemDef, ResourceVector};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                CardDef::new("gather", 2, ResourceVector::new(1.0, 0.0, 0.0)),
                CardDef::new("fish", 1, ResourceVector::new(0.0, 0.0, 2.0)),
            ],
            vec![ItemDef::new("ration", 1, 5.0, 0)],
        )
        .expect("catalog")
    }

    #[test]
    fn season_reset_keeps_conditions_and_items() {
        let catalog = catalog();
        let mut tracker = Tracker::new(&catalog);
        let mut events = EventBus::default();
        tracker.toggle_card("gather", 0, &mut events);
        tracker.toggle_item("ration", 0, &mut events);
        tracker.set_condition(ConditionKey::IsMinCharPlayer, true, &mut events);
        tracker.toggle_favorite(Resource::Meat, &mut events);
        assert_eq!(tracker.deck_state().total(), 2);

        assert!(tracker.reset_season(&mut events));
        assert_eq!(tracker.deck_state(), DeckState::fresh(&catalog));
        assert!(tracker.conditions().is_min_char_player);
        assert!(tracker.conditions().favorite.meat);
        assert_eq!(tracker.items().remaining(&catalog.items), 0);
        assert_eq!(
            events.drain().last(),
            Some(Event::SeasonReset { remaining: 3 })
        );
    }

    #[test]
    fn noop_mutations_emit_nothing() {
        let catalog = catalog();
        let mut tracker = Tracker::new(&catalog);
        let mut events = EventBus::default();
        assert!(!tracker.adjust_card("fish", 1, &mut events));
        assert_eq!(tracker.toggle_card("fish", 5, &mut events), None);
        assert!(!tracker.set_condition(ConditionKey::IsMinCharPlayer, false, &mut events));
        assert!(!tracker.adjust_item("ration", 1, &mut events));
        assert!(!tracker.reset_season(&mut events));
        assert!(!tracker.reset_items(&mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn adjust_card_reports_remaining() {
        let catalog = catalog();
        let mut tracker = Tracker::new(&catalog);
        let mut events = EventBus::default();
        assert!(tracker.adjust_card("gather", -1, &mut events));
        assert_eq!(
            events.drain().collect::<Vec<_>>(),
            vec![Event::CardAdjusted {
                id: "gather".to_string(),
                remaining: 1,
            }]
        );
        assert_eq!(tracker.resolve().stats.total_cards, 2);
    }

    #[test]
    fn reset_items_reports_restored_pool() {
        let catalog = catalog();
        let mut tracker = Tracker::new(&catalog);
        let mut events = EventBus::default();
        assert!(tracker.adjust_item("ration", -1, &mut events));
        events.drain().for_each(drop);
        assert!(tracker.reset_items(&mut events));
        assert_eq!(
            events.drain().collect::<Vec<_>>(),
            vec![Event::ItemsReset { remaining: 1 }]
        );
        assert!(!tracker.reset_items(&mut events));
        assert!(events.is_empty());
    }
}
