//! A static, pointer-based K-D Tree for exact nearest neighbor search in any dimension.

#![warn(missing_docs)]

mod builder;
mod codec;
pub(crate) mod constants;
mod index;
mod search;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::KDTree;
pub use traversal::{KDNode, Preorder};
