use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::{KDTreeError, Result};
use crate::kdtree::traversal::KDNode;
use crate::kdtree::KDTree;
use crate::point::Point;
use crate::r#type::IndexableNum;

impl<N: IndexableNum> KDTree<N> {
    /// Find the point in the tree closest to `query`.
    ///
    /// Returns `Ok(None)` for an empty tree. Fails with
    /// [`DimensionMismatch`][KDTreeError::DimensionMismatch] if `query` does not have the
    /// dimension of the tree. When several points are equally close, the first one reached by the
    /// search wins.
    pub fn nearest(&self, query: &Point<N>) -> Result<Option<&Point<N>>> {
        Ok(self
            .nearest_with_sq_dist(query)?
            .map(|(point, _sq_dist)| point))
    }

    /// Like [`nearest`][Self::nearest], also returning the squared euclidean distance between
    /// `query` and the found point.
    pub fn nearest_with_sq_dist(&self, query: &Point<N>) -> Result<Option<(&Point<N>, N)>> {
        let Some(root) = self.root() else {
            return Ok(None);
        };
        if query.dimension() != self.dim {
            return Err(KDTreeError::DimensionMismatch {
                expected: self.dim,
                actual: query.dimension(),
            });
        }

        let mut queue = BinaryHeap::new();
        queue.push(Reverse(NeighborNode {
            dist: N::zero(),
            node: root,
        }));

        let mut best = root;
        let mut best_dist = N::infinity();

        while let Some(Reverse(current)) = queue.pop() {
            // every queued subtree is at least this far away
            if current.dist >= best_dist {
                break;
            }

            let node = current.node;
            let sq_dist = query.sq_dist(&node.point);
            if sq_dist < best_dist {
                best = node;
                best_dist = sq_dist;
            }

            let axis_diff = query.axis_diff(&node.point, node.axis);
            let (near, far) = if axis_diff <= N::zero() {
                (node.left_child(), node.right_child())
            } else {
                (node.right_child(), node.left_child())
            };

            if let Some(near) = near {
                queue.push(Reverse(NeighborNode {
                    dist: N::zero(),
                    node: near,
                }));
            }
            if let Some(far) = far {
                queue.push(Reverse(NeighborNode {
                    dist: axis_diff * axis_diff,
                    node: far,
                }));
            }
        }

        Ok(Some((&best.point, best_dist)))
    }

    /// Find the nearest point for each of `queries`, in order.
    ///
    /// Queries run in parallel when the `rayon` feature is enabled. Fails on the first query with
    /// the wrong dimension.
    pub fn nearest_many(&self, queries: &[Point<N>]) -> Result<Vec<Option<&Point<N>>>> {
        #[cfg(feature = "rayon")]
        {
            queries.par_iter().map(|query| self.nearest(query)).collect()
        }

        #[cfg(not(feature = "rayon"))]
        {
            queries.iter().map(|query| self.nearest(query)).collect()
        }
    }
}

/// A wrapper around a subtree and the lower bound of its distance for use in the priority queue.
#[derive(Debug, Clone, Copy)]
struct NeighborNode<'a, N: IndexableNum> {
    dist: N,
    node: &'a KDNode<N>,
}

impl<N: IndexableNum> PartialEq for NeighborNode<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist
    }
}

impl<N: IndexableNum> Eq for NeighborNode<'_, N> {}

impl<N: IndexableNum> Ord for NeighborNode<'_, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NaN distances compare equal to everything
        self.dist
            .partial_cmp(&other.dist)
            .unwrap_or(Ordering::Equal)
    }
}

impl<N: IndexableNum> PartialOrd for NeighborNode<'_, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
