use criterion::{criterion_group, criterion_main, Criterion};
use nn_kdtree::kdtree::{KDTree, KDTreeBuilder};
use nn_kdtree::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(num: usize, dim: usize, rng: &mut StdRng) -> Vec<Point<f64>> {
    (0..num)
        .map(|index| Point::new((0..dim).map(|_| rng.gen()).collect(), index))
        .collect()
}

fn construct_kdtree(points: &[Point<f64>]) -> KDTree<f64> {
    let mut builder = KDTreeBuilder::with_capacity(points.len());
    for point in points {
        builder.add(point.clone());
    }
    builder.finish().unwrap()
}

fn brute_force_nearest<'a>(points: &'a [Point<f64>], query: &Point<f64>) -> &'a Point<f64> {
    points
        .iter()
        .min_by(|a, b| a.sq_dist(query).total_cmp(&b.sq_dist(query)))
        .unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let points = random_points(100_000, 3, &mut rng);
    let queries = random_points(1_000, 3, &mut rng);

    c.bench_function("construction (kdtree)", |b| {
        b.iter(|| construct_kdtree(&points))
    });

    let tree = construct_kdtree(&points);

    c.bench_function("nearest (kdtree)", |b| {
        b.iter(|| {
            for query in &queries {
                tree.nearest(query).unwrap();
            }
        })
    });

    c.bench_function("nearest_many (kdtree)", |b| {
        b.iter(|| tree.nearest_many(&queries).unwrap())
    });

    c.bench_function("nearest (brute force, 100 queries)", |b| {
        b.iter(|| {
            for query in &queries[..100] {
                brute_force_nearest(&points, query);
            }
        })
    });

    let bytes = tree.to_bytes().unwrap();

    c.bench_function("serialize (kdtree)", |b| b.iter(|| tree.to_bytes().unwrap()));

    c.bench_function("deserialize (kdtree)", |b| {
        b.iter(|| KDTree::<f64>::from_bytes(&bytes).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
