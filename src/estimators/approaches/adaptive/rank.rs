// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{ArrayView1, ArrayView2, Axis};

use crate::error::{Error, Result};

/// Argsort for f64 values.
///
/// Fills `idx` with the indices that sort `values` ascending. Ties are resolved by
/// the original index order, matching `numpy.argsort(kind="stable")`. Ordering uses
/// `f64::total_cmp`, so NaNs sort after every finite value.
pub fn argsort(values: &[f64], idx: &mut [usize]) {
    assert_eq!(values.len(), idx.len(), "argsort buffers must have equal length");
    for (i, slot) in idx.iter_mut().enumerate() {
        *slot = i;
    }
    // `sort_by` is stable, so equal values keep ascending index order.
    idx.sort_by(|&i, &j| values[i].total_cmp(&values[j]));
}

/// Zero-based rank of every value within its column.
///
/// The result is a permutation of `0..n`; tied values get consecutive ranks in
/// order of appearance.
pub fn rank_column(column: ArrayView1<'_, f64>) -> Vec<usize> {
    let values: Vec<f64> = column.iter().copied().collect();
    let mut order = vec![0usize; values.len()];
    argsort(&values, &mut order);

    let mut ranks = vec![0usize; values.len()];
    for (rank, &row) in order.iter().enumerate() {
        ranks[row] = rank;
    }
    ranks
}

/// Rank-transformed bivariate sample.
///
/// Each observation becomes `[rank_x, rank_y]`. Both coordinates are independent
/// permutations of `0..n` and the sample is never empty; every constructor checks this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedSample {
    points: Vec<[usize; 2]>,
}

impl RankedSample {
    /// Validate an N x 2 sample and rank-transform both columns.
    pub fn from_sample(sample: ArrayView2<'_, f64>) -> Result<Self> {
        if sample.ncols() != 2 {
            return Err(Error::InvalidShape {
                rows: sample.nrows(),
                cols: sample.ncols(),
            });
        }
        Self::from_columns(
            sample.index_axis(Axis(1), 0),
            sample.index_axis(Axis(1), 1),
        )
    }

    /// Validate two equally long columns and rank-transform them.
    pub fn from_columns(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::LengthMismatch(x.len(), y.len()));
        }
        if x.is_empty() {
            return Err(Error::EmptySample);
        }
        check_finite(x, 0)?;
        check_finite(y, 1)?;

        let rx = rank_column(x);
        let ry = rank_column(y);
        let points = rx.into_iter().zip(ry).map(|(a, b)| [a, b]).collect();
        Ok(Self { points })
    }

    /// Wrap precomputed ranks.
    ///
    /// Fails unless the sample is non-empty and each coordinate is a permutation of
    /// `0..n`.
    pub fn from_ranks(points: Vec<[usize; 2]>) -> Result<Self> {
        let n = points.len();
        if n == 0 {
            return Err(Error::EmptySample);
        }
        for col in 0..2 {
            let mut seen = vec![false; n];
            for point in &points {
                let rank = point[col];
                if rank >= n || seen[rank] {
                    return Err(Error::InvalidRanks { col, rank, n });
                }
                seen[rank] = true;
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[[usize; 2]] {
        &self.points
    }

    /// Number of observations.
    pub fn n(&self) -> usize {
        self.points.len()
    }

    /// Same sample with the two coordinates exchanged.
    pub fn transposed(&self) -> Self {
        Self {
            points: self.points.iter().map(|&[x, y]| [y, x]).collect(),
        }
    }
}

fn check_finite(column: ArrayView1<'_, f64>, col: usize) -> Result<()> {
    match column.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(Error::NonFinite {
            row,
            col,
            value: column[row],
        }),
        None => Ok(()),
    }
}
