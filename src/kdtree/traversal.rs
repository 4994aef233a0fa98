//! Utilities to traverse the KDTree structure.

use tinyvec::TinyVec;

use crate::point::Point;
use crate::r#type::IndexableNum;

/// A node in the KDTree.
///
/// Each node owns its split point and its two optional subtrees.
#[derive(Debug, Clone, PartialEq)]
pub struct KDNode<N: IndexableNum> {
    pub(crate) point: Point<N>,

    /// The axis that the children of this node are split over.
    pub(crate) axis: usize,

    pub(crate) left: Option<Box<KDNode<N>>>,
    pub(crate) right: Option<Box<KDNode<N>>>,
}

impl<N: IndexableNum> KDNode<N> {
    pub(crate) fn new(point: Point<N>, axis: usize) -> Self {
        Self {
            point,
            axis,
            left: None,
            right: None,
        }
    }

    /// The split point stored at this node.
    #[inline]
    pub fn point(&self) -> &Point<N> {
        &self.point
    }

    /// The axis descendants of this node are partitioned on.
    #[inline]
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// The subtree holding points not greater than this node's point on [`axis`][Self::axis].
    #[inline]
    pub fn left_child(&self) -> Option<&KDNode<N>> {
        self.left.as_deref()
    }

    /// The subtree holding points not less than this node's point on [`axis`][Self::axis].
    #[inline]
    pub fn right_child(&self) -> Option<&KDNode<N>> {
        self.right.as_deref()
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left_child().map(|child| (child, depth + 1)));
            stack.extend(node.right_child().map(|child| (child, depth + 1)));
        }
        height
    }
}

// Unlink subtrees onto an explicit stack so dropping a deep tree can't overflow the call stack.
impl<N: IndexableNum> Drop for KDNode<N> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<KDNode<N>>> = vec![];
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// A preorder walk over a tree that also reports absent children.
///
/// Yields `Some(node)` for each node and `None` for each missing child, in the order self, left
/// subtree, right subtree. An empty tree yields a single `None`.
#[derive(Debug, Clone)]
pub struct Preorder<'a, N: IndexableNum> {
    // Use TinyVec to avoid heap allocations
    stack: TinyVec<[Option<&'a KDNode<N>>; 33]>,
}

impl<'a, N: IndexableNum> Preorder<'a, N> {
    pub(crate) fn new(root: Option<&'a KDNode<N>>) -> Self {
        let mut stack = TinyVec::new();
        stack.push(root);
        Self { stack }
    }
}

impl<'a, N: IndexableNum> Iterator for Preorder<'a, N> {
    type Item = Option<&'a KDNode<N>>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        if let Some(node) = item {
            // Note: pushed in backwards order to what gets popped
            self.stack.push(node.right_child());
            self.stack.push(node.left_child());
        }
        Some(item)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn leaf(index: usize, x: f64) -> Box<KDNode<f64>> {
        Box::new(KDNode::new(Point::new(vec![x], index), 0))
    }

    #[test]
    fn preorder_with_markers() {
        let mut root = KDNode::new(Point::new(vec![1.], 1), 0);
        root.left = Some(leaf(0, 0.));

        let visited: Vec<Option<usize>> = Preorder::new(Some(&root))
            .map(|node| node.map(|node| node.point().index()))
            .collect();
        assert_eq!(visited, vec![Some(1), Some(0), None, None, None]);
        assert_eq!(root.height(), 2);
        assert!(root.is_parent());
        assert!(root.left_child().is_some_and(|node| node.is_leaf()));
        assert!(root.right_child().is_none());
    }

    #[test]
    fn preorder_of_empty_tree() {
        let visited: Vec<_> = Preorder::<f32>::new(None).collect();
        assert_eq!(visited, vec![None]);
    }
}
