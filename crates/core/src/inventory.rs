use crate::{Catalog, ItemDef, PresenceMap};

/// Items still available to the operator. Items are spent, not drawn, so only the
/// per-instance form is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPool {
    presence: PresenceMap,
}

impl ItemPool {
    pub fn fresh(catalog: &Catalog) -> Self {
        Self {
            presence: PresenceMap::for_items(catalog),
        }
    }

    pub fn presence(&self) -> &PresenceMap {
        &self.presence
    }

    pub fn is_available(&self, id: &str, index: u32) -> bool {
        self.presence.is_present(id, index)
    }

    pub fn toggle(&mut self, id: &str, index: u32) -> Option<bool> {
        self.presence.toggle(id, index)
    }

    /// Marks the highest-indexed remaining copy of `id` as used.
    pub fn consume(&mut self, id: &str) -> bool {
        self.presence.adjust(id, -1)
    }

    pub fn restore(&mut self, id: &str) -> bool {
        self.presence.adjust(id, 1)
    }

    pub fn available(&self, item: &ItemDef) -> u32 {
        self.presence.count(&item.id).min(item.quantity)
    }

    pub fn remaining(&self, items: &[ItemDef]) -> u32 {
        items.iter().map(|item| self.available(item)).sum()
    }

    pub fn reset(&mut self) {
        self.presence.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardDef, ResourceVector};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![CardDef::new("plain", 1, ResourceVector::ZERO)],
            vec![
                ItemDef::new("ration", 2, 5.0, 0),
                ItemDef::new("drink", 1, 0.0, 1),
            ],
        )
        .expect("catalog")
    }

    #[test]
    fn consume_and_restore_stay_in_range() {
        let catalog = catalog();
        let mut pool = ItemPool::fresh(&catalog);
        assert_eq!(pool.remaining(&catalog.items), 3);
        assert!(pool.consume("drink"));
        assert!(!pool.consume("drink"));
        assert!(!pool.is_available("drink", 0));
        assert!(pool.restore("drink"));
        assert!(!pool.restore("drink"));
        assert!(!pool.consume("unknown"));
        assert_eq!(pool.remaining(&catalog.items), 3);
    }

    #[test]
    fn reset_restores_used_items() {
        let catalog = catalog();
        let mut pool = ItemPool::fresh(&catalog);
        assert_eq!(pool.toggle("ration", 1), Some(false));
        assert_eq!(pool.remaining(&catalog.items), 2);
        pool.reset();
        assert_eq!(pool, ItemPool::fresh(&catalog));
    }
}
