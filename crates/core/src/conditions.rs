use crate::{Resource, ResourceVector};
use serde::{Deserialize, Serialize};

/// Units granted per selected resource by the favorite-food card.
pub const FAVORITE_BONUS_PER_KIND: f64 = 2.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKey {
    HasHigherCharRoomPlayer,
    IsMinCharPlayer,
}

impl ConditionKey {
    pub const ALL: [ConditionKey; 2] = [
        ConditionKey::HasHigherCharRoomPlayer,
        ConditionKey::IsMinCharPlayer,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::HasHigherCharRoomPlayer => "has_higher_char_room_player",
            Self::IsMinCharPlayer => "is_min_char_player",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FavoriteSelection {
    pub fruit: bool,
    pub meat: bool,
    pub fish: bool,
}

impl FavoriteSelection {
    pub fn is_selected(&self, resource: Resource) -> bool {
        match resource {
            Resource::Fruit => self.fruit,
            Resource::Meat => self.meat,
            Resource::Fish => self.fish,
        }
    }

    pub fn set(&mut self, resource: Resource, selected: bool) {
        match resource {
            Resource::Fruit => self.fruit = selected,
            Resource::Meat => self.meat = selected,
            Resource::Fish => self.fish = selected,
        }
    }

    pub fn toggle(&mut self, resource: Resource) -> bool {
        let selected = !self.is_selected(resource);
        self.set(resource, selected);
        selected
    }

    pub fn bonus_vector(&self) -> ResourceVector {
        let mut vector = ResourceVector::ZERO;
        for resource in Resource::ALL {
            if self.is_selected(resource) {
                vector.set(resource, FAVORITE_BONUS_PER_KIND);
            }
        }
        vector
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Conditions {
    pub has_higher_char_room_player: bool,
    pub is_min_char_player: bool,
    pub favorite: FavoriteSelection,
}

impl Conditions {
    pub fn is_satisfied(&self, key: ConditionKey) -> bool {
        match key {
            ConditionKey::HasHigherCharRoomPlayer => self.has_higher_char_room_player,
            ConditionKey::IsMinCharPlayer => self.is_min_char_player,
        }
    }

    pub fn set(&mut self, key: ConditionKey, value: bool) {
        match key {
            ConditionKey::HasHigherCharRoomPlayer => self.has_higher_char_room_player = value,
            ConditionKey::IsMinCharPlayer => self.is_min_char_player = value,
        }
    }

    pub fn toggle(&mut self, key: ConditionKey) -> bool {
        let value = !self.is_satisfied(key);
        self.set(key, value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorite_bonus_is_additive_per_kind() {
        let mut selection = FavoriteSelection::default();
        assert_eq!(selection.bonus_vector(), ResourceVector::ZERO);
        selection.toggle(Resource::Fish);
        assert_eq!(selection.bonus_vector(), ResourceVector::new(0.0, 0.0, 2.0));
        selection.toggle(Resource::Fruit);
        assert_eq!(selection.bonus_vector(), ResourceVector::new(2.0, 0.0, 2.0));
        assert!(selection.is_selected(Resource::Fruit));
        assert!(!selection.is_selected(Resource::Meat));
    }

    #[test]
    fn favorite_bonus_is_order_independent() {
        let mut a = FavoriteSelection::default();
        a.toggle(Resource::Meat);
        a.toggle(Resource::Fruit);
        let mut b = FavoriteSelection::default();
        b.toggle(Resource::Fruit);
        b.toggle(Resource::Meat);
        assert_eq!(a.bonus_vector(), b.bonus_vector());
    }

    #[test]
    fn toggle_reports_new_value() {
        let mut conditions = Conditions::default();
        assert!(conditions.toggle(ConditionKey::IsMinCharPlayer));
        assert!(conditions.is_satisfied(ConditionKey::IsMinCharPlayer));
        assert!(!conditions.is_satisfied(ConditionKey::HasHigherCharRoomPlayer));
        assert!(!conditions.toggle(ConditionKey::IsMinCharPlayer));
    }
}
