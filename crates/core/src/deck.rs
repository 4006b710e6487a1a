use crate::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const INSTANCE_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceRef {
    pub id: String,
    pub index: u32,
}

impl InstanceRef {
    pub fn new(id: impl Into<String>, index: u32) -> Self {
        Self {
            id: id.into(),
            index,
        }
    }
}

impl fmt::Display for InstanceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.id, INSTANCE_SEPARATOR, self.index)
    }
}

impl FromStr for InstanceRef {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (id, index) = value
            .rsplit_once(INSTANCE_SEPARATOR)
            .ok_or_else(|| format!("expected <id>{INSTANCE_SEPARATOR}<index>, got {value}"))?;
        if id.is_empty() {
            return Err(format!("missing id in {value}"));
        }
        let index = index
            .parse::<u32>()
            .map_err(|err| format!("invalid index in {value}: {err}"))?;
        Ok(Self::new(id, index))
    }
}

/// Per-instance "still here" flags, used for both deck cards and items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceMap {
    slots: BTreeMap<String, Vec<bool>>,
}

impl PresenceMap {
    pub fn fresh<'a>(entries: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let slots = entries
            .into_iter()
            .map(|(id, quantity)| (id.to_string(), vec![true; quantity as usize]))
            .collect();
        Self { slots }
    }

    pub fn for_cards(catalog: &Catalog) -> Self {
        Self::fresh(
            catalog
                .cards
                .iter()
                .map(|card| (card.id.as_str(), card.quantity)),
        )
    }

    pub fn for_items(catalog: &Catalog) -> Self {
        Self::fresh(
            catalog
                .items
                .iter()
                .map(|item| (item.id.as_str(), item.quantity)),
        )
    }

    pub fn is_present(&self, id: &str, index: u32) -> bool {
        self.slots
            .get(id)
            .and_then(|slots| slots.get(index as usize))
            .copied()
            .unwrap_or(false)
    }

    pub fn toggle(&mut self, id: &str, index: u32) -> Option<bool> {
        let slot = self.slots.get_mut(id)?.get_mut(index as usize)?;
        *slot = !*slot;
        Some(*slot)
    }

    pub fn count(&self, id: &str) -> u32 {
        self.slots
            .get(id)
            .map(|slots| slots.iter().filter(|present| **present).count() as u32)
            .unwrap_or(0)
    }

    pub fn total_present(&self) -> u32 {
        self.slots.keys().map(|id| self.count(id)).sum()
    }

    /// Moves the present count of `id` by `delta`. Returns to the deck the lowest absent
    /// instances and takes out the highest present ones. A move that would leave
    /// `[0, quantity]` changes nothing and returns `false`.
    pub fn adjust(&mut self, id: &str, delta: i32) -> bool {
        let Some(slots) = self.slots.get_mut(id) else {
            return false;
        };
        let present = slots.iter().filter(|present| **present).count() as i64;
        let target = present + delta as i64;
        if delta == 0 || target < 0 || target > slots.len() as i64 {
            return false;
        }
        if delta > 0 {
            let mut remaining = delta;
            for slot in slots.iter_mut().filter(|present| !**present) {
                if remaining == 0 {
                    break;
                }
                *slot = true;
                remaining -= 1;
            }
        } else {
            let mut remaining = -delta;
            for slot in slots.iter_mut().rev().filter(|present| **present) {
                if remaining == 0 {
                    break;
                }
                *slot = false;
                remaining -= 1;
            }
        }
        true
    }

    pub fn instances(&self, id: &str) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.slots
            .get(id)
            .into_iter()
            .flat_map(|slots| slots.iter().enumerate())
            .map(|(index, present)| (index as u32, *present))
    }

    pub fn reset(&mut self) {
        for slots in self.slots.values_mut() {
            slots.iter_mut().for_each(|slot| *slot = true);
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckState {
    counts: BTreeMap<String, u32>,
}

impl DeckState {
    pub fn fresh(catalog: &Catalog) -> Self {
        let counts = catalog
            .cards
            .iter()
            .map(|card| (card.id.clone(), card.quantity))
            .collect();
        Self { counts }
    }

    pub fn empty(catalog: &Catalog) -> Self {
        let counts = catalog
            .cards
            .iter()
            .map(|card| (card.id.clone(), 0))
            .collect();
        Self { counts }
    }

    pub fn from_presence(presence: &PresenceMap, catalog: &Catalog) -> Self {
        let counts = catalog
            .cards
            .iter()
            .map(|card| (card.id.clone(), presence.count(&card.id).min(card.quantity)))
            .collect();
        Self { counts }
    }

    pub fn remaining(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn set_remaining(&mut self, catalog: &Catalog, id: &str, count: u32) -> bool {
        let Some(card) = catalog.card(id) else {
            return false;
        };
        if count > card.quantity {
            return false;
        }
        self.counts.insert(card.id.clone(), count);
        true
    }

    pub fn adjust(&mut self, catalog: &Catalog, id: &str, delta: i32) -> bool {
        let target = self.remaining(id) as i64 + delta as i64;
        if delta == 0 || target < 0 || target > u32::MAX as i64 {
            return false;
        }
        self.set_remaining(catalog, id, target as u32)
    }

    pub fn reset(&mut self, catalog: &Catalog) {
        *self = Self::fresh(catalog);
    }
}
