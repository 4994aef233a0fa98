use std::fmt::Debug;

use crate::error::Result;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// Chooses how a set of candidate points is split at one level of the tree.
///
/// The builder calls [`set`][AxisSelector::set] once per recursive step, then reads
/// [`axis`][AxisSelector::axis] and [`position`][AxisSelector::position]. Nothing carries over
/// between steps other than what the last `set` installed.
pub trait AxisSelector<N: IndexableNum>: Debug + Send {
    /// Install the candidates of the current subtree and its depth in the tree.
    fn set(&mut self, candidates: &[Point<N>], depth: usize);

    /// The axis to split the current candidates on.
    ///
    /// Fails with [`UnsetSelector`][crate::KDTreeError::UnsetSelector] if no non-empty candidate
    /// set has been installed yet.
    fn axis(&self) -> Result<usize>;

    /// The rank within the current candidates of the point to use as split point.
    fn position(&self) -> usize;
}
