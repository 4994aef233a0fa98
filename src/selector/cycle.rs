use crate::error::{KDTreeError, Result};
use crate::point::Point;
use crate::r#type::IndexableNum;
use crate::selector::AxisSelector;

/// Round-robins the split axis with tree depth and splits at the median.
///
/// With an even number of candidates the upper median is chosen.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleSelector {
    depth: usize,
    // number of candidates at the current depth
    count: usize,
    dim: usize,
}

impl CycleSelector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: IndexableNum> AxisSelector<N> for CycleSelector {
    fn set(&mut self, candidates: &[Point<N>], depth: usize) {
        self.depth = depth;
        self.count = candidates.len();
        if let Some(first) = candidates.first() {
            self.dim = first.dimension();
        }
    }

    fn axis(&self) -> Result<usize> {
        if self.dim == 0 {
            return Err(KDTreeError::UnsetSelector);
        }
        Ok(self.depth % self.dim)
    }

    #[inline]
    fn position(&self) -> usize {
        self.count / 2
    }
}
