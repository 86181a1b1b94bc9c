#![allow(dead_code)]

use ndarray::{Array2, array};
use rand::Rng;

use consensus_heatmap::seed::TestSeeds;

/// Small hand-written consensus matrices.
///
/// An older copy of this data had the off-diagonal entries of the 4x4 case
/// transposed; this version is symmetric and is the one kept.
pub fn small_cmats() -> Vec<Array2<f64>> {
    vec![
        array![[1.0, 1.0], [1.0, 1.0]],
        array![[1.0, 0.0, 0.5], [0.0, 1.0, 0.27], [0.5, 0.27, 1.0]],
        array![
            [1.0, 0.998, 0.3874, 0.000_000_540_01],
            [0.998, 1.0, 0.7523, 0.0],
            [0.3874, 0.7523, 1.0, 0.003],
            [0.000_000_540_01, 0.0, 0.003, 1.0],
        ],
    ]
}

/// Random consensus matrix with `k` clusters, rows already grouped by cluster.
///
/// Same-cluster pairs co-occur often (0.6..=1.0), others rarely (0.0..=0.4).
pub fn random_cmat(id: &str, n: usize, k: usize) -> Array2<f64> {
    let seeds = TestSeeds::derive(id, &[&n, &k]);
    let mut label_rng = seeds.primary_rng();
    let mut value_rng = seeds.secondary_rng();

    let mut labels: Vec<usize> = (0..n).map(|_| label_rng.random_range(0..k.max(1))).collect();
    labels.sort_unstable();

    let mut m = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        m[[i, i]] = 1.0;
        for j in (i + 1)..n {
            let v = if labels[i] == labels[j] {
                value_rng.random_range(0.6..=1.0)
            } else {
                value_rng.random_range(0.0..=0.4)
            };
            m[[i, j]] = v;
            m[[j, i]] = v;
        }
    }
    m
}
