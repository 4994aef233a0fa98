#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
mod point;
pub mod selector;
mod r#type;

pub use error::{KDTreeError, Result};
pub use point::Point;
pub use r#type::{CoordType, IndexableNum};

#[cfg(test)]
pub(crate) mod test;
