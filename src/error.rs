// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for mutual information estimation.

use thiserror::Error;

/// Invalid input handed to an estimator.
///
/// The estimation itself is infallible; every variant describes a sample or
/// parameter rejected at the crate boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The sample is not an N x 2 array.
    #[error("invalid input: expected an N x 2 sample, got {rows} x {cols}")]
    InvalidShape { rows: usize, cols: usize },

    /// The sample has no observations.
    #[error("invalid input: sample is empty")]
    EmptySample,

    /// A value is NaN or infinite.
    #[error("invalid input: non-finite value {value} at row {row}, column {col}")]
    NonFinite { row: usize, col: usize, value: f64 },

    /// The two columns have different lengths.
    #[error("invalid input: columns have different lengths: {0} vs {1}")]
    LengthMismatch(usize, usize),

    /// Precomputed ranks are not a permutation of `0..n` in some column.
    #[error("invalid input: rank {rank} in column {col} is out of range or repeated (n = {n})")]
    InvalidRanks { col: usize, rank: usize, n: usize },

    /// Logarithm base must be finite, positive and not 1.
    #[error("invalid input: logarithm base {0} must be finite, positive and not 1")]
    InvalidBase(f64),
}

impl Error {
    /// Whether this error rejects caller-provided input. Currently true for all variants.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidShape { .. }
                | Error::EmptySample
                | Error::NonFinite { .. }
                | Error::LengthMismatch(..)
                | Error::InvalidRanks { .. }
                | Error::InvalidBase(_)
        )
    }
}

/// A specialized Result type for estimator construction.
pub type Result<T> = std::result::Result<T, Error>;
