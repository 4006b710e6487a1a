//! Built-in card and item catalog, plus loading of alternate catalogs from disk.

pub mod catalog;
pub mod load;

pub use catalog::*;
pub use load::*;
