use std::cmp;

use log::{debug, error};

use crate::error::{KDTreeError, Result};
use crate::kdtree::traversal::KDNode;
use crate::kdtree::KDTree;
use crate::point::Point;
use crate::r#type::IndexableNum;
use crate::selector::{AxisSelector, CycleSelector};

/// A builder to create a [`KDTree`].
///
/// Points are staged with [`add`][Self::add] and the tree is built once by
/// [`finish`][Self::finish].
///
/// ```
/// use nn_kdtree::kdtree::KDTreeBuilder;
/// use nn_kdtree::Point;
///
/// let mut builder = KDTreeBuilder::<f64>::new();
/// builder.add(Point::new(vec![0., 0.], 0));
/// builder.add(Point::new(vec![1., 1.], 1));
/// let tree = builder.finish().unwrap();
///
/// let nearest = tree.nearest(&Point::new(vec![0.9, 0.8], 99)).unwrap();
/// assert_eq!(nearest.map(|p| p.index()), Some(1));
/// ```
#[derive(Debug)]
pub struct KDTreeBuilder<N: IndexableNum> {
    /// staged points, partitioned in place by `finish`
    points: Vec<Point<N>>,

    /// dimension fixed by the first added point
    dim: usize,

    selector: Box<dyn AxisSelector<N>>,
}

impl<N: IndexableNum> KDTreeBuilder<N> {
    /// Create a new builder splitting with the default [`CycleSelector`].
    pub fn new() -> Self {
        Self::with_selector(Box::new(CycleSelector::new()))
    }

    /// Create a new builder with room for `capacity` points before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut builder = Self::new();
        builder.points.reserve(capacity);
        builder
    }

    /// Create a new builder using the provided axis selection strategy.
    ///
    /// See [`create_selector`][crate::selector::create_selector] to pick a strategy by name.
    pub fn with_selector(selector: Box<dyn AxisSelector<N>>) -> Self {
        Self {
            points: vec![],
            dim: 0,
            selector,
        }
    }

    /// Add a point to the index, returning its position in the staging buffer.
    ///
    /// The first point fixes the dimension of the tree. A later point with a different dimension
    /// is logged as an error and still staged; [`finish`][Self::finish] will then refuse to build.
    pub fn add(&mut self, point: Point<N>) -> usize {
        if self.dim == 0 {
            self.dim = point.dimension();
        } else if self.dim != point.dimension() {
            error!(
                "Dimension inconsistent: point {} has dimension {}, index has {}",
                point.index(),
                point.dimension(),
                self.dim
            );
        }

        let position = self.points.len();
        self.points.push(point);
        position
    }

    /// The number of staged points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no point has been staged.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The dimension fixed by the first added point, or zero before any point is added.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Consume this builder, partitioning the staged points into a KDTree ready for queries.
    ///
    /// With no staged points this returns an empty tree.
    pub fn finish(mut self) -> Result<KDTree<N>> {
        if self.points.is_empty() {
            return Ok(KDTree::empty());
        }

        if let Some(point) = self.points.iter().find(|p| p.dimension() != self.dim) {
            return Err(KDTreeError::DimensionMismatch {
                expected: self.dim,
                actual: point.dimension(),
            });
        }

        let num_items = self.points.len();
        let root = build(self.selector.as_mut(), self.points, 0)?;
        let tree = KDTree::new(root, self.dim);
        debug!(
            "built k-d tree with {} points of dimension {}, height {}",
            num_items,
            self.dim,
            tree.height()
        );
        Ok(tree)
    }
}

impl<N: IndexableNum> Default for KDTreeBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively partition `points` into a subtree rooted at the selector's pivot.
fn build<N: IndexableNum>(
    selector: &mut dyn AxisSelector<N>,
    mut points: Vec<Point<N>>,
    depth: usize,
) -> Result<Option<Box<KDNode<N>>>> {
    if points.is_empty() {
        return Ok(None);
    }

    selector.set(&points, depth);
    let axis = selector.axis()?;
    let position = selector.position();
    assert!(
        position < points.len(),
        "Selected position {} out of {} candidates.",
        position,
        points.len()
    );

    // move the pivot to `position` with everything before it not greater and everything after
    // it not less on `axis`
    let last = points.len() - 1;
    select(&mut points, position, 0, last, axis);

    let right_points = points.split_off(position + 1);
    // `position` is the last index left after the split
    let pivot = points.swap_remove(position);

    let mut node = KDNode::new(pivot, axis);
    node.left = build(selector, points, depth + 1)?;
    node.right = build(selector, right_points, depth + 1)?;
    Ok(Some(Box::new(node)))
}

/// Custom Floyd-Rivest selection algorithm: sort points so that [left..k-1] items are not
/// greater than the k-th item on `axis` and [k+1..right] items are not less.
///
/// Ties are placed on either side.
fn select<N: IndexableNum>(
    points: &mut [Point<N>],
    k: usize,
    mut left: usize,
    mut right: usize,
    axis: usize,
) {
    while right > left {
        if right - left > 600 {
            let n = (right - left + 1) as f64;
            let m = (k - left + 1) as f64;
            let z = f64::ln(n);
            let s = 0.5 * f64::exp((2.0 * z) / 3.0);
            let sd = 0.5
                * f64::sqrt((z * s * (n - s)) / n)
                * (if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 });
            let new_left = cmp::max(left, f64::floor(k as f64 - (m * s) / n + sd) as usize);
            let new_right = cmp::min(
                right,
                f64::floor(k as f64 + ((n - m) * s) / n + sd) as usize,
            );
            select(points, k, new_left, new_right, axis);
        }

        let t = points[k][axis];
        let mut i = left;
        let mut j = right;

        points.swap(left, k);
        if points[right][axis] > t {
            points.swap(left, right);
        }

        while i < j {
            points.swap(i, j);
            i += 1;
            j -= 1;
            while points[i][axis] < t {
                i += 1;
            }
            while points[j][axis] > t {
                j -= 1;
            }
        }

        if points[left][axis] == t {
            points.swap(left, j);
        } else {
            j += 1;
            points.swap(j, right);
        }

        if j <= k {
            left = j + 1;
        }
        if k <= j {
            // j == 0 only when k == 0, in which case left was just moved past it
            right = j.saturating_sub(1);
        }
    }
}
