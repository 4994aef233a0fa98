//! Strategies choosing the split axis and pivot position while building a k-d tree.

mod cycle;
mod kind;
mod r#trait;

pub use cycle::CycleSelector;
pub use kind::{create_selector, SelectorKind};
pub use r#trait::AxisSelector;
