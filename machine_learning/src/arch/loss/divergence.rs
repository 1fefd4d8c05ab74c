use std::f64::consts::FRAC_1_SQRT_2;

use ndarray::ArrayView2;

/// Lower clamp applied to probabilities before taking their logarithm.
const EPSILON: f64 = f64::EPSILON;

fn pairs<'a>(
    expected: ArrayView2<'a, f64>,
    actual: ArrayView2<'a, f64>,
) -> impl Iterator<Item = (f64, f64)> + 'a {
    expected.into_iter().copied().zip(actual.into_iter().copied())
}

/// Sum of `-e·ln(p)` with `p` clamped to `[ε, 1 - ε]`.
pub fn cross(expected: ArrayView2<f64>, actual: ArrayView2<f64>) -> f64 {
    -pairs(expected, actual)
        .map(|(e, a)| e * a.clamp(EPSILON, 1. - EPSILON).ln())
        .filter(|l| l.is_finite())
        .sum::<f64>()
}

/// Hellinger distance between the expected and actual values taken as a whole.
pub fn hellinger(expected: ArrayView2<f64>, actual: ArrayView2<f64>) -> f64 {
    let sum: f64 = pairs(expected, actual)
        .map(|(e, a)| (a.max(0.).sqrt() - e.sqrt()).powi(2))
        .sum();

    FRAC_1_SQRT_2 * sum.sqrt()
}

/// Sum of `e·ln(e/a)`, terms with a non-finite logarithm are skipped.
pub fn kullback_leibler(expected: ArrayView2<f64>, actual: ArrayView2<f64>) -> f64 {
    pairs(expected, actual)
        .filter_map(|(e, a)| {
            let l = (e / a).ln();
            l.is_finite().then_some(e * l)
        })
        .sum()
}

/// `Σ e·ln(e/a) - Σ e + Σ a`, counting only the pairs whose term is finite.
pub fn generalized_kullback_leibler(expected: ArrayView2<f64>, actual: ArrayView2<f64>) -> f64 {
    let (x, y, z) = pairs(expected, actual)
        .filter_map(|(e, a)| {
            let l = e * (e / a).ln();
            l.is_finite().then_some((l, e, a))
        })
        .fold((0., 0., 0.), |(x, y, z), (l, e, a)| (x + l, y + e, z + a));

    x - y + z
}

/// Sum of `r - ln(r) - 1` where `r = e²/a²`, skipping non-finite logarithms.
pub fn itakura_saito(expected: ArrayView2<f64>, actual: ArrayView2<f64>) -> f64 {
    pairs(expected, actual)
        .filter_map(|(e, a)| {
            let r = (e * e) / (a * a);
            let l = r.ln();
            l.is_finite().then_some(r - l - 1.)
        })
        .sum()
}
