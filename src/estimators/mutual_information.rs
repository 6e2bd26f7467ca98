// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{ArrayView1, ArrayView2};

use crate::error::Result;
use crate::estimators::approaches::adaptive::AdaptivePartitionMutualInformation;
use crate::estimators::traits::GlobalValue;

/// Mutual information estimation methods
///
/// This struct provides static methods for creating mutual information estimators
/// for different types of data and estimation approaches.
pub struct MutualInformation;

impl MutualInformation {
    /// Creates a new adaptive partitioning estimator for an N x 2 sample
    ///
    /// # Arguments
    ///
    /// * `data` - Sample with one observation per row; columns are the two variables
    ///
    /// # Errors
    ///
    /// Fails if the sample is not N x 2, is empty, or contains non-finite values.
    pub fn new_adaptive(data: ArrayView2<'_, f64>) -> Result<AdaptivePartitionMutualInformation> {
        AdaptivePartitionMutualInformation::new(data)
    }

    /// Creates a new adaptive partitioning estimator from two paired series
    ///
    /// # Errors
    ///
    /// Fails if the series differ in length, are empty, or contain non-finite values.
    pub fn new_adaptive_columns(
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
    ) -> Result<AdaptivePartitionMutualInformation> {
        AdaptivePartitionMutualInformation::from_columns(x, y)
    }
}

/// Mutual information (nats) between column 0 and column 1 of an N x 2 sample,
/// estimated by adaptive partitioning of the rank-transformed sample.
///
/// ```rust
/// use adaptive_mi::mutual_info;
/// use ndarray::array;
///
/// let sample = array![[0.1, 1.0], [0.4, 2.0], [0.2, 1.5], [0.9, 3.0]];
/// let mi = mutual_info(sample.view()).unwrap();
/// assert!((mi - 2f64.ln()).abs() < 1e-12);
/// ```
pub fn mutual_info(sample: ArrayView2<'_, f64>) -> Result<f64> {
    Ok(MutualInformation::new_adaptive(sample)?.global_value())
}
