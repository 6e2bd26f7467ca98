// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod adaptive;

// Re-exports so tests and users can import
// adaptive_mi::estimators::approaches::* ergonomically.
pub use adaptive::AdaptivePartitionMutualInformation;
