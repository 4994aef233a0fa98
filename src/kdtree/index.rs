use crate::kdtree::traversal::{KDNode, Preorder};
use crate::r#type::IndexableNum;

/// A built, immutable KDTree.
///
/// Usually this will be created from scratch via [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder]
/// or loaded from a model file via [`KDTree::load`].
///
/// Queries take `&self` and never mutate the tree, so a built tree may be shared across threads
/// for concurrent reads.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<N: IndexableNum> {
    pub(crate) root: Option<Box<KDNode<N>>>,
    pub(crate) dim: usize,
}

impl<N: IndexableNum> KDTree<N> {
    pub(crate) fn new(root: Option<Box<KDNode<N>>>, dim: usize) -> Self {
        Self { root, dim }
    }

    /// A tree without any points. Its dimension is zero.
    pub fn empty() -> Self {
        Self::new(None, 0)
    }

    /// The dimension of the points in this tree, or zero for an empty tree.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Access the root node of the KDTree for manual traversal.
    pub fn root(&self) -> Option<&KDNode<N>> {
        self.root.as_deref()
    }

    /// Returns `true` if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of points in this tree.
    pub fn len(&self) -> usize {
        self.preorder().flatten().count()
    }

    /// The number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.height())
    }

    /// Walk every node position in preorder, including absent children.
    pub fn preorder(&self) -> Preorder<'_, N> {
        Preorder::new(self.root())
    }
}

impl<N: IndexableNum> Default for KDTree<N> {
    fn default() -> Self {
        Self::empty()
    }
}
