use ndarray::ArrayView2;

/// Sum of squared differences over every element.
pub fn squared(expected: ArrayView2<f64>, actual: ArrayView2<f64>) -> f64 {
    expected
        .iter()
        .zip(actual.iter())
        .map(|(e, a)| (a - e).powi(2))
        .sum()
}

/// Sum of `max(0, 1 - a·e)` over every element.
pub fn hinge(expected: ArrayView2<f64>, actual: ArrayView2<f64>) -> f64 {
    expected
        .iter()
        .zip(actual.iter())
        .map(|(e, a)| (1. - a * e).max(0.))
        .sum()
}
