// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Adaptive partitioning (Darbellay-Vajda) estimators module
// This module contains the rank transform, the quadrant partition and the estimator.

pub mod adaptive_estimator;
pub mod partition;
pub mod rank;

pub use adaptive_estimator::AdaptivePartitionMutualInformation;
pub use partition::{AdaptivePartition, Cell, Leaf, Quadrant};
pub use rank::RankedSample;
