// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # adaptive-mi
//!
//! Mutual information between two continuous random variables, estimated by
//! adaptive partitioning of the observation space (Darbellay & Vajda, 1999).
//!
//! ## Quick Start
//!
//! ```rust
//! use adaptive_mi::estimators::mutual_information::MutualInformation;
//! use adaptive_mi::estimators::traits::{GlobalValue, LocalValues};
//! use ndarray::array;
//!
//! let sample = array![[0.3, 1.2], [1.1, 0.4], [2.5, 2.2], [0.9, 3.1], [1.7, 1.9]];
//!
//! // One-shot estimate in nats
//! let mi = adaptive_mi::mutual_info(sample.view()).unwrap();
//!
//! // Estimator object: bits, local values, partition inspection
//! let est = MutualInformation::new_adaptive(sample.view()).unwrap();
//! let bits = est.clone().with_base(2.0).unwrap().global_value();
//! let locals = est.local_values();
//! assert!((locals.mean().unwrap() - mi).abs() < 1e-12);
//! assert!((bits - mi / 2f64.ln()).abs() < 1e-12);
//! ```
//!
//! ## Method
//!
//! 1. Both columns are replaced by their zero-based ranks (ties stable by row), so the
//!    sample becomes N points on the N x N integer grid with uniform marginals.
//! 2. The grid is split at the midpoints of each axis. A cell whose four quadrant counts
//!    pass the uniformity test `T = 4 sum_k (N_k - Np/4)^2 / Np <= 7.8` becomes a leaf;
//!    otherwise each quadrant with more than 2 points is refined again and quadrants
//!    with 1 or 2 points become leaves directly. The root is always split.
//! 3. With `S = sum_leaves n ln(n / (Nx Ny))`, the estimate is `S / N + ln N`.
//!
//! The partition uses an explicit work stack and a single index buffer, so large
//! samples neither recurse on the call stack nor copy point subsets.
//!
//! ## Errors
//!
//! Samples that are not N x 2, are empty, or contain NaN or infinite values are
//! rejected with [`Error`].

pub mod error;
pub mod estimators;

pub use error::{Error, Result};
pub use estimators::mutual_information::{mutual_info, MutualInformation};
pub use estimators::traits::{GlobalValue, LocalValues, OptionalLocalValues};
