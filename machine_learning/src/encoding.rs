/// Z-score normalizes a column of values using the population standard deviation.
///
/// A column without spread maps every value to `0`.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std_dev = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();

    if std_dev == 0. {
        return vec![0.; values.len()];
    }

    values.iter().map(|v| (v - mean) / std_dev).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salaries() {
        let got = normalize(&[60000., 24000., 30000., 30000., 18000., 56000.]);
        let expected = [
            1.4892192139292129,
            -0.7760719847236746,
            -0.39852345161486,
            -0.39852345161486,
            -1.1536205178324892,
            1.2375201918566698,
        ];

        for (got, expected) in got.iter().zip(expected) {
            assert!((got - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn constant() {
        assert_eq!(normalize(&[3., 3., 3.]), vec![0., 0., 0.]);
        assert!(normalize(&[]).is_empty());
    }
}
