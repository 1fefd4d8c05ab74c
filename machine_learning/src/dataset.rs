use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::{MlErr, Result};

/// A single labeled row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub inputs: Vec<f64>,
    pub outputs: Vec<f64>,
}

impl Example {
    /// Creates a new `Example`.
    ///
    /// # Arguments
    /// * `inputs` - The encoded features.
    /// * `outputs` - The encoded expected outputs.
    pub fn new(inputs: impl Into<Vec<f64>>, outputs: impl Into<Vec<f64>>) -> Self {
        Self {
            inputs: inputs.into(),
            outputs: outputs.into(),
        }
    }
}

/// One split of a dataset for k-fold training.
#[derive(Debug, Clone, PartialEq)]
pub struct Fold {
    /// Every row outside of this fold's bucket.
    pub train: Dataset,
    /// The rows of this fold's bucket.
    pub test: Dataset,
}

/// A non-empty set of examples sharing their input and output widths.
///
/// Inputs and outputs are held as two row-aligned matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    inputs: Array2<f64>,
    outputs: Array2<f64>,
}

impl Dataset {
    /// Creates a new `Dataset` from a list of examples.
    ///
    /// # Arguments
    /// * `examples` - The rows of the dataset, the first one sets the widths.
    ///
    /// # Returns
    /// `NoData` if there are no examples or `DimensionMismatch` if their widths differ.
    pub fn new(examples: &[Example]) -> Result<Self> {
        let Some(first) = examples.first() else {
            return Err(MlErr::NoData);
        };

        let input_width = first.inputs.len();
        let output_width = first.outputs.len();

        let mut inputs = Vec::with_capacity(examples.len() * input_width);
        let mut outputs = Vec::with_capacity(examples.len() * output_width);

        for example in examples {
            if example.inputs.len() != input_width {
                return Err(MlErr::DimensionMismatch {
                    what: "example inputs",
                    got: example.inputs.len(),
                    expected: input_width,
                });
            }

            if example.outputs.len() != output_width {
                return Err(MlErr::DimensionMismatch {
                    what: "example outputs",
                    got: example.outputs.len(),
                    expected: output_width,
                });
            }

            inputs.extend_from_slice(&example.inputs);
            outputs.extend_from_slice(&example.outputs);
        }

        Self::from_flat(inputs, outputs, input_width, output_width)
    }

    /// Creates a new `Dataset` from row-major buffers.
    ///
    /// # Arguments
    /// * `inputs` - Every input row, one after the other.
    /// * `outputs` - Every output row, aligned with `inputs`.
    /// * `input_width` - The length of an input row.
    /// * `output_width` - The length of an output row.
    ///
    /// # Returns
    /// `ConfigInvalid` for zero widths, `DimensionMismatch` if the buffers don't hold the
    /// same amount of rows or `NoData` if they're empty.
    pub fn from_flat(
        inputs: Vec<f64>,
        outputs: Vec<f64>,
        input_width: usize,
        output_width: usize,
    ) -> Result<Self> {
        if input_width == 0 || output_width == 0 {
            return Err(MlErr::ConfigInvalid(
                "dataset rows must have positive widths".to_string(),
            ));
        }

        let rows = inputs.len() / input_width;
        if rows == 0 {
            return Err(MlErr::NoData);
        }

        if inputs.len() != rows * input_width {
            return Err(MlErr::DimensionMismatch {
                what: "flat inputs",
                got: inputs.len(),
                expected: rows * input_width,
            });
        }

        if outputs.len() != rows * output_width {
            return Err(MlErr::DimensionMismatch {
                what: "flat outputs",
                got: outputs.len(),
                expected: rows * output_width,
            });
        }

        let shape_err = |what, got| MlErr::DimensionMismatch {
            what,
            got,
            expected: rows,
        };

        Ok(Self {
            inputs: Array2::from_shape_vec((rows, input_width), inputs)
                .map_err(|_| shape_err("input rows", rows))?,
            outputs: Array2::from_shape_vec((rows, output_width), outputs)
                .map_err(|_| shape_err("output rows", rows))?,
        })
    }

    /// Returns the amount of rows.
    pub fn len(&self) -> usize {
        self.inputs.nrows()
    }

    /// Always `false`, a dataset holds at least one row.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn input_width(&self) -> usize {
        self.inputs.ncols()
    }

    pub fn output_width(&self) -> usize {
        self.outputs.ncols()
    }

    pub fn inputs(&self) -> ArrayView2<'_, f64> {
        self.inputs.view()
    }

    pub fn outputs(&self) -> ArrayView2<'_, f64> {
        self.outputs.view()
    }

    /// Iterates over the `(inputs, outputs)` pairs of every row.
    pub fn rows(&self) -> impl Iterator<Item = (ArrayView1<'_, f64>, ArrayView1<'_, f64>)> {
        self.inputs.rows().into_iter().zip(self.outputs.rows())
    }

    /// Copies the given rows, in the given order, into a new dataset.
    ///
    /// # Returns
    /// `NoData` if `rows` is empty or `DimensionMismatch` if a row is out of bounds.
    pub fn select(&self, rows: &[usize]) -> Result<Self> {
        if rows.is_empty() {
            return Err(MlErr::NoData);
        }

        if let Some(&row) = rows.iter().find(|&&row| row >= self.len()) {
            return Err(MlErr::DimensionMismatch {
                what: "selected row",
                got: row,
                expected: self.len(),
            });
        }

        Ok(Self {
            inputs: self.inputs.select(Axis(0), rows),
            outputs: self.outputs.select(Axis(0), rows),
        })
    }

    /// Shuffles the rows into `k` buckets and builds one fold per bucket.
    ///
    /// `k` is capped at the amount of rows and bucket sizes differ by at most one row,
    /// so no row is left out.
    ///
    /// # Arguments
    /// * `k` - The amount of buckets.
    /// * `rng` - The generator used to shuffle the rows.
    ///
    /// # Returns
    /// The folds in bucket order, empty when fewer than two buckets can be made.
    pub fn folds<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Result<Vec<Fold>> {
        let k = k.min(self.len());
        if k < 2 {
            return Ok(Vec::new());
        }

        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);

        let (base, extra) = (self.len() / k, self.len() % k);
        let mut buckets = Vec::with_capacity(k);
        let mut rest = order.as_slice();
        for i in 0..k {
            let (bucket, tail) = rest.split_at(base + usize::from(i < extra));
            buckets.push(bucket);
            rest = tail;
        }

        buckets
            .iter()
            .enumerate()
            .map(|(i, test)| {
                let train: Vec<usize> = buckets
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .flat_map(|(_, bucket)| bucket.iter().copied())
                    .collect();

                Ok(Fold {
                    train: self.select(&train)?,
                    test: self.select(test)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn numbered(rows: usize) -> Dataset {
        let examples: Vec<_> = (0..rows)
            .map(|i| Example::new([i as f64], [i as f64 * 10.]))
            .collect();
        Dataset::new(&examples).unwrap()
    }

    fn ids(data: &Dataset) -> Vec<usize> {
        let mut ids: Vec<_> = data.inputs().iter().map(|&x| x as usize).collect();
        ids.sort();
        ids
    }

    #[test]
    fn from_examples() {
        let dataset = Dataset::new(&[
            Example::new([0., 0.], [0., 1.]),
            Example::new([0., 1.], [1., 0.]),
            Example::new([1., 0.], [1., 0.]),
        ])
        .unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.input_width(), 2);
        assert_eq!(dataset.output_width(), 2);
        assert_eq!(dataset.inputs().row(1).to_vec(), vec![0., 1.]);
        assert_eq!(dataset.outputs().row(2).to_vec(), vec![1., 0.]);
        assert_eq!(dataset.rows().count(), 3);
    }

    #[test]
    fn empty() {
        assert_eq!(Dataset::new(&[]), Err(MlErr::NoData));
        assert_eq!(
            Dataset::from_flat(Vec::new(), Vec::new(), 2, 1),
            Err(MlErr::NoData)
        );
    }

    #[test]
    fn ragged() {
        let result = Dataset::new(&[Example::new([0., 0.], [1.]), Example::new([0.], [1.])]);
        assert_eq!(
            result,
            Err(MlErr::DimensionMismatch {
                what: "example inputs",
                got: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn flat_mismatch() {
        let result = Dataset::from_flat(vec![0., 1., 2., 3.], vec![1., 0., 1.], 2, 2);
        assert!(matches!(result, Err(MlErr::DimensionMismatch { .. })));

        let result = Dataset::from_flat(vec![0., 1., 2.], vec![1.], 2, 1);
        assert!(matches!(result, Err(MlErr::DimensionMismatch { .. })));
    }

    #[test]
    fn select_rows() {
        let data = numbered(4);
        let picked = data.select(&[3, 1]).unwrap();

        assert_eq!(picked.inputs().column(0).to_vec(), vec![3., 1.]);
        assert_eq!(picked.outputs().column(0).to_vec(), vec![30., 10.]);
        assert_eq!(data.select(&[]), Err(MlErr::NoData));
        assert!(matches!(
            data.select(&[4]),
            Err(MlErr::DimensionMismatch { got: 4, .. })
        ));
    }

    #[test]
    fn folds_cover_every_row() {
        let data = numbered(10);
        let mut rng = StdRng::seed_from_u64(3);
        let folds = data.folds(3, &mut rng).unwrap();

        assert_eq!(folds.len(), 3);

        let sizes: Vec<_> = folds.iter().map(|f| f.test.len()).collect();
        assert_eq!(sizes, vec![4, 3, 3]);

        let mut tested = Vec::new();
        for fold in &folds {
            assert_eq!(fold.train.len() + fold.test.len(), 10);

            let mut all = ids(&fold.train);
            all.extend(ids(&fold.test));
            all.sort();
            assert_eq!(all, (0..10).collect::<Vec<_>>());

            // Outputs stay aligned with their inputs.
            for (x, y) in fold.test.rows() {
                assert_eq!(y[0], x[0] * 10.);
            }

            tested.extend(ids(&fold.test));
        }

        tested.sort();
        assert_eq!(tested, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn folds_capped_by_rows() {
        let mut rng = StdRng::seed_from_u64(0);

        let folds = numbered(3).folds(10, &mut rng).unwrap();
        assert_eq!(folds.len(), 3);
        assert!(folds.iter().all(|f| f.test.len() == 1 && f.train.len() == 2));

        assert!(numbered(5).folds(1, &mut rng).unwrap().is_empty());
        assert!(numbered(1).folds(4, &mut rng).unwrap().is_empty());
    }
}
