use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Fruit,
    Meat,
    Fish,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Fruit, Resource::Meat, Resource::Fish];

    pub fn id(self) -> &'static str {
        match self {
            Self::Fruit => "fruit",
            Self::Meat => "meat",
            Self::Fish => "fish",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fruit" => Some(Self::Fruit),
            "meat" => Some(Self::Meat),
            "fish" => Some(Self::Fish),
            _ => None,
        }
    }
}

/// Quantity of each tracked resource. Catalog rewards are whole numbers, derived
/// expectations are not, so components are stored as `f64`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResourceVector {
    pub fruit: f64,
    pub meat: f64,
    pub fish: f64,
}

impl ResourceVector {
    pub const ZERO: ResourceVector = ResourceVector {
        fruit: 0.0,
        meat: 0.0,
        fish: 0.0,
    };

    pub const fn new(fruit: f64, meat: f64, fish: f64) -> Self {
        Self { fruit, meat, fish }
    }

    pub fn get(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Fruit => self.fruit,
            Resource::Meat => self.meat,
            Resource::Fish => self.fish,
        }
    }

    pub fn set(&mut self, resource: Resource, amount: f64) {
        match resource {
            Resource::Fruit => self.fruit = amount,
            Resource::Meat => self.meat = amount,
            Resource::Fish => self.fish = amount,
        }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self {
            fruit: self.fruit * factor,
            meat: self.meat * factor,
            fish: self.fish * factor,
        }
    }

    pub fn sum(&self) -> f64 {
        self.fruit + self.meat + self.fish
    }

    pub fn is_valid_reward(&self) -> bool {
        Resource::ALL.iter().all(|resource| {
            let value = self.get(*resource);
            value.is_finite() && value >= 0.0
        })
    }
}

impl Add for ResourceVector {
    type Output = ResourceVector;

    fn add(self, rhs: ResourceVector) -> ResourceVector {
        ResourceVector {
            fruit: self.fruit + rhs.fruit,
            meat: self.meat + rhs.meat,
            fish: self.fish + rhs.fish,
        }
    }
}

impl AddAssign for ResourceVector {
    fn add_assign(&mut self, rhs: ResourceVector) {
        *self = *self + rhs;
    }
}

impl Sub for ResourceVector {
    type Output = ResourceVector;

    fn sub(self, rhs: ResourceVector) -> ResourceVector {
        ResourceVector {
            fruit: self.fruit - rhs.fruit,
            meat: self.meat - rhs.meat,
            fish: self.fish - rhs.fish,
        }
    }
}

impl Mul<f64> for ResourceVector {
    type Output = ResourceVector;

    fn mul(self, rhs: f64) -> ResourceVector {
        self.scale(rhs)
    }
}
