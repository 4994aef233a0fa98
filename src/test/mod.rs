//! Helpers shared by the test suites: random samples and a linear-scan oracle.

use rand::rngs::StdRng;
use rand::Rng;

use crate::kdtree::{KDTree, KDTreeBuilder};
use crate::point::Point;
use crate::r#type::IndexableNum;

/// `num` points with coordinates drawn uniformly from `[0, 1)`, identified by position.
pub(crate) fn random_points(num: usize, dim: usize, rng: &mut StdRng) -> Vec<Point<f64>> {
    (0..num)
        .map(|index| {
            let coords = (0..dim).map(|_| rng.gen::<f64>()).collect();
            Point::new(coords, index)
        })
        .collect()
}

pub(crate) fn build_tree<N: IndexableNum>(points: &[Point<N>]) -> KDTree<N> {
    let mut builder = KDTreeBuilder::with_capacity(points.len());
    for point in points {
        builder.add(point.clone());
    }
    builder.finish().unwrap()
}

/// The first sample with the smallest squared distance to `query`.
pub(crate) fn brute_force_nearest<'a, N: IndexableNum>(
    samples: &'a [Point<N>],
    query: &Point<N>,
) -> Option<&'a Point<N>> {
    let mut best: Option<(&Point<N>, N)> = None;
    for sample in samples {
        let dist = sample.sq_dist(query);
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((sample, dist));
        }
    }
    best.map(|(sample, _)| sample)
}

/// Assert the tree answers every query at the same distance as a linear scan.
pub(crate) fn assert_matches_oracle<N: IndexableNum>(
    tree: &KDTree<N>,
    samples: &[Point<N>],
    queries: &[Point<N>],
) {
    for query in queries {
        let expected = brute_force_nearest(samples, query).unwrap();
        let found = tree.nearest(query).unwrap().unwrap();
        assert_eq!(
            found.sq_dist(query),
            expected.sq_dist(query),
            "query {} found {} when oracle found {}",
            query.index(),
            found.index(),
            expected.index()
        );
    }
}
