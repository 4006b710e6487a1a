//! Card-counting core: catalog types, deck and item state, the deck and item
//! statistics engines, and the two-pass composition between them. Keep this crate
//! free of IO and platform concerns.

pub mod conditions;
pub mod content;
pub mod deck;
pub mod events;
pub mod inventory;
pub mod item_stats;
pub mod resolve;
pub mod resources;
pub mod stats;
pub mod tracker;

pub use conditions::*;
pub use content::*;
pub use deck::*;
pub use events::*;
pub use inventory::*;
pub use item_stats::*;
pub use resolve::*;
pub use resources::*;
pub use stats::*;
pub use tracker::*;
