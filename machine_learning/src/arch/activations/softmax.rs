use ndarray::{Array1, ArrayView1, s};

fn max(x: ArrayView1<f64>) -> f64 {
    x.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v))
}

/// Numerically stable softmax over a whole row.
///
/// Entries at `+∞` share the whole mass, and a row made only of `-∞` is uniform.
pub fn softmax(x: ArrayView1<f64>) -> Array1<f64> {
    let max = max(x);
    if max.is_infinite() {
        let hits = x.mapv(|v| if v == max { 1. } else { 0. });
        let count = hits.sum();
        return hits / count;
    }

    let mut y = x.mapv(|v| (v - max).exp());
    let sum = y.sum();
    y /= sum;
    y
}

/// Keeps the entries equal to the row's maximum and zeroes the rest.
pub fn maxout(x: ArrayView1<f64>) -> Array1<f64> {
    let max = max(x);
    x.mapv(|v| if v == max { v } else { 0. })
}

/// Applies `softmax` to each half of the row and then to the concatenation.
///
/// For odd lengths the second half is the larger one.
pub fn split_softmax(x: ArrayView1<f64>) -> Array1<f64> {
    let mid = x.len() / 2;

    let mut halves = Array1::zeros(x.len());
    halves
        .slice_mut(s![..mid])
        .assign(&softmax(x.slice(s![..mid])));
    halves
        .slice_mut(s![mid..])
        .assign(&softmax(x.slice(s![mid..])));

    softmax(halves.view())
}
