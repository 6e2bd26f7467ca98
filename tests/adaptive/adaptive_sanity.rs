// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use adaptive_mi::estimators::approaches::AdaptivePartitionMutualInformation;
use adaptive_mi::estimators::mutual_information::MutualInformation;
use adaptive_mi::estimators::{GlobalValue, LocalValues, OptionalLocalValues};
use adaptive_mi::{mutual_info, Error};
use approx::assert_abs_diff_eq;
use ndarray::{array, Array1, Array2};

use crate::test_helpers::{
    generate_correlated_gaussian, generate_identity_pair, generate_independent_uniform,
    generate_permuted_pair, init_logging,
};

#[test]
fn four_point_scenarios() {
    let diagonal = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
    let anti = array![[0.0, 3.0], [1.0, 2.0], [2.0, 1.0], [3.0, 0.0]];
    let shuffled = array![[0.0, 2.0], [1.0, 0.0], [2.0, 3.0], [3.0, 1.0]];

    let mi_diag = mutual_info(diagonal.view()).unwrap();
    let mi_anti = mutual_info(anti.view()).unwrap();
    let mi_shuffled = mutual_info(shuffled.view()).unwrap();

    // Two 2x2 diagonal cells holding two points each.
    assert_abs_diff_eq!(mi_diag, 2f64.ln(), epsilon = 1e-12);
    // Mirror image of the diagonal; the quadrant test does not see orientation.
    assert_abs_diff_eq!(mi_anti, mi_diag, epsilon = 1e-12);
    // One point per quadrant after the forced root split.
    assert_abs_diff_eq!(mi_shuffled, 0.0, epsilon = 1e-12);
    assert!(mi_diag > mi_shuffled + 0.5);
}

#[test]
fn single_and_three_point_samples() {
    assert_eq!(mutual_info(array![[7.0, -1.0]].view()).unwrap(), 0.0);

    // Root [0,2]: 2-point cell [0,1]x[0,1] and 1-point cell [2,2]x[2,2].
    let three = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
    let expected = (2.0 * (2.0f64 / 4.0).ln()) / 3.0 + 3f64.ln();
    assert_abs_diff_eq!(mutual_info(three.view()).unwrap(), expected, epsilon = 1e-12);
}

#[test]
fn identity_on_power_of_two_grid() {
    init_logging();
    for k in 3..=12 {
        let n = 1usize << k;
        let mi = mutual_info(generate_identity_pair(n).view()).unwrap();
        // Every leaf is a 4x4 diagonal block with 4 points: ln(4/16) + ln N.
        assert_abs_diff_eq!(mi, (n as f64 / 4.0).ln(), epsilon = 1e-9);
        assert!(mi <= (n as f64).ln());
    }
}

#[test]
fn independent_columns_are_close_to_zero() {
    init_logging();
    let n = 2000;
    let identity = mutual_info(generate_identity_pair(n).view()).unwrap();
    for seed in [1, 7, 42] {
        let permuted = mutual_info(generate_permuted_pair(n, seed).view()).unwrap();
        let uniform = mutual_info(generate_independent_uniform(n, seed).view()).unwrap();
        for mi in [permuted, uniform] {
            assert!(mi >= -1e-9, "estimate {mi} should not be negative");
            assert!(mi < 0.05, "estimate {mi} too large for independent columns");
            assert!(mi < identity);
        }
    }
}

#[test]
fn gaussian_dependence_is_ordered() {
    let n = 4000;
    let seed = 2024;
    let mi_0 = mutual_info(generate_correlated_gaussian(n, 0.0, seed).view()).unwrap();
    let mi_5 = mutual_info(generate_correlated_gaussian(n, 0.5, seed).view()).unwrap();
    let mi_9 = mutual_info(generate_correlated_gaussian(n, 0.9, seed).view()).unwrap();

    assert!(mi_0 < mi_5, "{mi_0} !< {mi_5}");
    assert!(mi_5 < mi_9, "{mi_5} !< {mi_9}");
    // True values: 0, 0.144, 0.830 nats.
    assert!(mi_0 < 0.05);
    assert!(mi_9 > 0.5 && mi_9 < 1.2, "rho = 0.9 estimate {mi_9}");
}

#[test]
fn local_values_average_to_global() {
    let data = generate_correlated_gaussian(500, 0.7, 3);
    let est = MutualInformation::new_adaptive(data.view()).unwrap();
    let locals = est.local_values();
    assert_eq!(locals.len(), 500);
    assert_abs_diff_eq!(locals.mean().unwrap(), est.global_value(), epsilon = 1e-10);
    assert_abs_diff_eq!(est.global_from_local(), est.global_value(), epsilon = 1e-10);

    assert!(est.supports_local());
    assert_eq!(est.local_values_opt().unwrap(), locals);
}

#[test]
fn local_values_follow_base() {
    let data = generate_correlated_gaussian(300, 0.4, 11);
    let nats = MutualInformation::new_adaptive(data.view()).unwrap();
    let bits = nats.clone().with_base(2.0).unwrap();
    let ratio = 2f64.ln();
    for (b, n) in bits.local_values().iter().zip(nats.local_values().iter()) {
        assert_abs_diff_eq!(b * ratio, *n, epsilon = 1e-12);
    }
    assert_abs_diff_eq!(bits.global_value() * ratio, nats.global_value(), epsilon = 1e-12);
}

#[test]
fn column_constructor_matches_matrix_constructor() {
    let data = generate_correlated_gaussian(256, 0.3, 5);
    let x: Array1<f64> = data.column(0).to_owned();
    let y: Array1<f64> = data.column(1).to_owned();
    let from_matrix = AdaptivePartitionMutualInformation::new(data.view()).unwrap();
    let from_columns = MutualInformation::new_adaptive_columns(x.view(), y.view()).unwrap();
    assert_eq!(from_matrix.global_value(), from_columns.global_value());
}

#[test]
fn partition_statistics_are_exposed() {
    let est = MutualInformation::new_adaptive(generate_identity_pair(64).view()).unwrap();
    let partition = est.partition();
    assert_eq!(partition.n(), 64);
    assert_eq!(partition.leaves().len(), 16);
    // Root, two 32-cells, four 16-cells, eight 8-cells.
    assert_eq!(partition.splits(), 1 + 2 + 4 + 8);
    assert_eq!(partition.max_depth(), 4);
    assert_abs_diff_eq!(
        partition.log_frequency_sum(),
        64.0 * (4.0f64 / 16.0).ln(),
        epsilon = 1e-9
    );
}

#[test]
fn constant_columns_rank_by_row_order() {
    // With every value tied, both columns rank by row index and look identical.
    let constant = Array2::from_elem((16, 2), 3.5);
    let a = mutual_info(constant.view()).unwrap();
    let b = mutual_info(constant.view()).unwrap();
    assert_eq!(a, b);
    assert_abs_diff_eq!(a, mutual_info(generate_identity_pair(16).view()).unwrap(), epsilon = 1e-12);
}

#[test]
fn invalid_samples_are_rejected() {
    let cases: Vec<(Array2<f64>, Error)> = vec![
        (Array2::zeros((3, 1)), Error::InvalidShape { rows: 3, cols: 1 }),
        (Array2::zeros((3, 3)), Error::InvalidShape { rows: 3, cols: 3 }),
        (Array2::zeros((0, 2)), Error::EmptySample),
    ];
    for (data, expected) in cases {
        let err = mutual_info(data.view()).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err, expected);
    }

    let nan = array![[0.0, 1.0], [f64::NAN, 2.0]];
    match mutual_info(nan.view()) {
        Err(Error::NonFinite { row, col, value }) => {
            assert_eq!((row, col), (1, 0));
            assert!(value.is_nan());
        }
        other => panic!("expected NonFinite, got {other:?}"),
    }

    let inf = array![[0.0, f64::NEG_INFINITY]];
    assert!(matches!(
        mutual_info(inf.view()),
        Err(Error::NonFinite { row: 0, col: 1, .. })
    ));

    let x = Array1::from(vec![0.0, 1.0, 2.0]);
    let y = Array1::from(vec![0.0, 1.0]);
    assert_eq!(
        MutualInformation::new_adaptive_columns(x.view(), y.view()).unwrap_err(),
        Error::LengthMismatch(3, 2)
    );
}
