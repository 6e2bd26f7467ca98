// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Range;

use log::{debug, trace};

use super::rank::RankedSample;

/// Critical value of the quadrant uniformity statistic. Cells with `T <= SPLIT_THRESHOLD`
/// are treated as uniform (close to the 95% quantile of chi-square with 3 degrees of freedom).
pub const SPLIT_THRESHOLD: f64 = 7.8;

/// Children of a split cell holding at least this many points are refined further;
/// smaller non-empty children are accounted directly.
pub const MIN_RECURSE_COUNT: usize = 3;

/// One of the four sub-cells obtained by splitting a cell at its midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `x <= x_mid`, `y <= y_mid`
    LowLow = 0,
    /// `x <= x_mid`, `y > y_mid`
    LowHigh = 1,
    /// `x > x_mid`, `y <= y_mid`
    HighLow = 2,
    /// `x > x_mid`, `y > y_mid`
    HighHigh = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::LowLow,
        Quadrant::LowHigh,
        Quadrant::HighLow,
        Quadrant::HighHigh,
    ];

    /// Classify a rank point against the split midpoints.
    #[inline]
    pub fn classify(point: [usize; 2], x_mid: usize, y_mid: usize) -> Self {
        match (point[0] <= x_mid, point[1] <= y_mid) {
            (true, true) => Quadrant::LowLow,
            (true, false) => Quadrant::LowHigh,
            (false, true) => Quadrant::HighLow,
            (false, false) => Quadrant::HighHigh,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Axis-aligned cell of the rank grid with inclusive bounds.
///
/// A child on the high side of a one-wide axis has `min == max + 1`; it has zero
/// extent and never holds points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
}

impl Cell {
    /// Cell spanning the whole `n x n` rank grid. `n` must be at least 1.
    pub fn root(n: usize) -> Self {
        debug_assert!(n >= 1);
        Self {
            x_min: 0,
            x_max: n - 1,
            y_min: 0,
            y_max: n - 1,
        }
    }

    /// Number of integer columns covered (`Nx`).
    pub fn width(&self) -> usize {
        self.x_max + 1 - self.x_min
    }

    /// Number of integer rows covered (`Ny`).
    pub fn height(&self) -> usize {
        self.y_max + 1 - self.y_min
    }

    /// `Nx * Ny` as a float.
    pub fn area(&self) -> f64 {
        self.width() as f64 * self.height() as f64
    }

    /// Split point on each axis, rounded down.
    pub fn midpoints(&self) -> (usize, usize) {
        ((self.x_min + self.x_max) / 2, (self.y_min + self.y_max) / 2)
    }

    pub fn contains(&self, point: [usize; 2]) -> bool {
        (self.x_min..=self.x_max).contains(&point[0])
            && (self.y_min..=self.y_max).contains(&point[1])
    }

    /// Sub-cells in [`Quadrant`] order.
    pub fn quadrants(&self) -> [Cell; 4] {
        let (xm, ym) = self.midpoints();
        let low_x = (self.x_min, xm);
        let high_x = (xm + 1, self.x_max);
        let low_y = (self.y_min, ym);
        let high_y = (ym + 1, self.y_max);
        let make = |(x_min, x_max): (usize, usize), (y_min, y_max): (usize, usize)| Cell {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        [
            make(low_x, low_y),
            make(low_x, high_y),
            make(high_x, low_y),
            make(high_x, high_y),
        ]
    }
}

/// Quadrant uniformity statistic `T = 4 * sum_k (N_k - Np/4)^2 / Np`.
pub fn uniformity_statistic(counts: &[usize; 4]) -> f64 {
    let np: usize = counts.iter().sum();
    if np == 0 {
        return 0.0;
    }
    let np = np as f64;
    let expected = np / 4.0;
    let ss: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d
        })
        .sum();
    4.0 * ss / np
}

/// Log-frequency term `n * ln(n / (Nx * Ny))` of a non-empty cell.
#[inline]
pub fn cell_log_frequency(count: usize, cell: &Cell) -> f64 {
    let n = count as f64;
    n * (n / cell.area()).ln()
}

/// Terminal cell of the adaptive partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub cell: Cell,
    pub count: usize,
    /// Number of splits between the root and this cell.
    pub depth: usize,
    /// Range into [`AdaptivePartition::members`] holding this leaf's observations.
    pub members: Range<usize>,
}

impl Leaf {
    pub fn log_frequency(&self) -> f64 {
        cell_log_frequency(self.count, &self.cell)
    }
}

/// Pending unit of work on the partition stack.
enum Frame {
    /// Test the cell for uniformity and split it if needed.
    Refine {
        cell: Cell,
        members: Range<usize>,
        depth: usize,
        force_split: bool,
    },
    /// Child with fewer than [`MIN_RECURSE_COUNT`] points, accounted without testing.
    Direct {
        cell: Cell,
        members: Range<usize>,
        depth: usize,
    },
}

/// Adaptive quadrant partition of a rank-transformed sample.
///
/// Built with an explicit work stack over one index buffer: every pending cell owns
/// a contiguous range of `members`, and a split reorders that range into its four
/// quadrants. Leaves are stored in depth-first order (quadrant 0 first).
#[derive(Debug, Clone)]
pub struct AdaptivePartition {
    n: usize,
    leaves: Vec<Leaf>,
    members: Vec<usize>,
    splits: usize,
    max_depth: usize,
}

impl AdaptivePartition {
    /// Partition the full rank grid, forcing a split of the root cell.
    pub fn build(sample: &RankedSample) -> Self {
        let n = sample.n();
        let mut members: Vec<usize> = (0..n).collect();
        let mut scratch: Vec<usize> = Vec::with_capacity(n);
        let mut leaves = Vec::new();
        let mut splits = 0usize;
        let mut max_depth = 0usize;

        let mut stack: Vec<Frame> = Vec::new();
        if n > 0 {
            stack.push(Frame::Refine {
                cell: Cell::root(n),
                members: 0..n,
                depth: 0,
                force_split: true,
            });
        }

        while let Some(frame) = stack.pop() {
            let (cell, range, depth, force_split) = match frame {
                Frame::Direct {
                    cell,
                    members,
                    depth,
                } => {
                    max_depth = max_depth.max(depth);
                    leaves.push(Leaf {
                        cell,
                        count: members.len(),
                        depth,
                        members,
                    });
                    continue;
                }
                Frame::Refine {
                    cell,
                    members,
                    depth,
                    force_split,
                } => (cell, members, depth, force_split),
            };
            max_depth = max_depth.max(depth);

            let counts = split_members(
                sample.points(),
                &mut members[range.clone()],
                &mut scratch,
                cell.midpoints(),
            );
            let t = uniformity_statistic(&counts);

            if t <= SPLIT_THRESHOLD && !force_split {
                leaves.push(Leaf {
                    cell,
                    count: range.len(),
                    depth,
                    members: range,
                });
                continue;
            }

            trace!("splitting {cell:?}: counts {counts:?}, T = {t:.3}");
            splits += 1;

            let children = cell.quadrants();
            let mut offsets = [range.start; 4];
            for q in 1..4 {
                offsets[q] = offsets[q - 1] + counts[q - 1];
            }
            // Pushed in reverse so quadrant 0 is handled first.
            for q in Quadrant::ALL.into_iter().rev() {
                let count = counts[q.index()];
                let cell = children[q.index()];
                let members = offsets[q.index()]..offsets[q.index()] + count;
                let depth = depth + 1;
                if count >= MIN_RECURSE_COUNT {
                    stack.push(Frame::Refine {
                        cell,
                        members,
                        depth,
                        force_split: false,
                    });
                } else if count > 0 {
                    stack.push(Frame::Direct {
                        cell,
                        members,
                        depth,
                    });
                }
            }
        }

        debug!(
            "adaptive partition of {n} points: {} leaves, {splits} splits, max depth {max_depth}",
            leaves.len()
        );

        Self {
            n,
            leaves,
            members,
            splits,
            max_depth,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// Observation indices, grouped contiguously by leaf.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Observation indices belonging to `leaf`.
    pub fn leaf_members(&self, leaf: &Leaf) -> &[usize] {
        &self.members[leaf.members.clone()]
    }

    pub fn splits(&self) -> usize {
        self.splits
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Raw weighted log-frequency sum `S = sum_leaves n * ln(n / (Nx * Ny))`.
    pub fn log_frequency_sum(&self) -> f64 {
        self.leaves.iter().map(Leaf::log_frequency).sum()
    }
}

/// Reorder `members` into quadrant order `[LowLow | LowHigh | HighLow | HighHigh]`
/// and return the per-quadrant counts.
fn split_members(
    points: &[[usize; 2]],
    members: &mut [usize],
    scratch: &mut Vec<usize>,
    (x_mid, y_mid): (usize, usize),
) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for &i in members.iter() {
        counts[Quadrant::classify(points[i], x_mid, y_mid).index()] += 1;
    }

    let mut offsets = [0usize; 4];
    for q in 1..4 {
        offsets[q] = offsets[q - 1] + counts[q - 1];
    }

    scratch.clear();
    scratch.resize(members.len(), 0);
    for &i in members.iter() {
        let q = Quadrant::classify(points[i], x_mid, y_mid).index();
        scratch[offsets[q]] = i;
        offsets[q] += 1;
    }
    members.copy_from_slice(&scratch[..]);
    counts
}
