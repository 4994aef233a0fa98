//! The point type stored in and queried against a [`KDTree`][crate::kdtree::KDTree].

use std::ops::Index;

use crate::r#type::IndexableNum;

/// An n-dimensional point together with the identifier of the sample it came from.
///
/// Points are plain values: they are cloned into and out of trees freely and never mutated once
/// constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<N: IndexableNum> {
    coords: Vec<N>,
    index: usize,
}

impl<N: IndexableNum> Point<N> {
    /// Create a new point from its coordinates and sample identifier.
    pub fn new(coords: Vec<N>, index: usize) -> Self {
        Self { coords, index }
    }

    /// The coordinates of this point.
    #[inline]
    pub fn coords(&self) -> &[N] {
        &self.coords
    }

    /// The identifier of the original sample.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The number of coordinates.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Squared euclidean distance to another point of the same dimension.
    #[inline]
    pub fn sq_dist(&self, other: &Point<N>) -> N {
        debug_assert_eq!(self.dimension(), other.dimension());
        self.coords
            .iter()
            .zip(other.coords.iter())
            .fold(N::zero(), |acc, (&a, &b)| {
                let d = a - b;
                acc + d * d
            })
    }

    /// Signed difference `self[axis] - other[axis]` along a single axis.
    #[inline]
    pub fn axis_diff(&self, other: &Point<N>, axis: usize) -> N {
        self.coords[axis] - other.coords[axis]
    }
}

impl<N: IndexableNum> Index<usize> for Point<N> {
    type Output = N;

    #[inline]
    fn index(&self, axis: usize) -> &N {
        &self.coords[axis]
    }
}

#[cfg(test)]
mod test {
    use super::Point;

    #[test]
    fn distances() {
        let a = Point::new(vec![0., 0., 0.], 0);
        let b = Point::new(vec![1., 2., 2.], 1);
        assert_eq!(a.sq_dist(&b), 9.);
        assert_eq!(b.sq_dist(&a), 9.);
        assert_eq!(a.axis_diff(&b, 1), -2.);
        assert_eq!(b.axis_diff(&a, 2), 2.);
    }

    #[test]
    fn accessors() {
        let p = Point::new(vec![3.5f32, -1.], 42);
        assert_eq!(p.dimension(), 2);
        assert_eq!(p.index(), 42);
        assert_eq!(p[0], 3.5);
        assert_eq!(p.coords(), &[3.5, -1.]);
    }
}
