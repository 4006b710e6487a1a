use crate::{ConditionKey, Resource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    CardToggled {
        id: String,
        index: u32,
        present: bool,
    },
    CardAdjusted { id: String, remaining: u32 },
    ItemToggled {
        id: String,
        index: u32,
        available: bool,
    },
    ItemAdjusted { id: String, available: u32 },
    ConditionChanged { key: ConditionKey, value: bool },
    FavoriteChanged { resource: Resource, selected: bool },
    SeasonReset { remaining: u32 },
    ItemsReset { remaining: u32 },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
