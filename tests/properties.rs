//! Property-based tests for the container, products and norms

use proptest::prelude::*;
use sparse_algebra::{ColumnMajor, NormKind, RowMajor, SparseMatrix};

const TOLERANCE: f64 = 1e-9;

/// A random matrix as (rows, cols, triples)
fn matrix_strategy() -> impl Strategy<Value = (usize, usize, Vec<(usize, usize, f64)>)> {
    (1usize..8, 1usize..8).prop_flat_map(|(rows, cols)| {
        let triples = prop::collection::vec((0..rows, 0..cols, -10.0f64..10.0), 0..20);
        (Just(rows), Just(cols), triples)
    })
}

/// A matrix with two vectors of matching length and a scalar
fn product_strategy(
) -> impl Strategy<Value = ((usize, usize, Vec<(usize, usize, f64)>), Vec<f64>, Vec<f64>, f64)> {
    matrix_strategy().prop_flat_map(|m| {
        let cols = m.1;
        (
            Just(m),
            prop::collection::vec(-5.0f64..5.0, cols),
            prop::collection::vec(-5.0f64..5.0, cols),
            -3.0f64..3.0,
        )
    })
}

fn build<O: sparse_algebra::StorageOrder>(
    rows: usize,
    cols: usize,
    triples: &[(usize, usize, f64)],
) -> SparseMatrix<f64, O> {
    SparseMatrix::from_triplets_with_shape(rows, cols, triples.iter().copied()).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn write_then_read((rows, cols, _) in matrix_strategy(), value in -100.0f64..100.0, r in 0usize..8, c in 0usize..8) {
        let mut m = SparseMatrix::<f64, ColumnMajor>::new(rows, cols);
        let (r, c) = (r % rows, c % cols);
        *m.write(r, c).unwrap() = value;
        prop_assert_eq!(m.read(r, c).unwrap(), value);
    }

    #[test]
    fn compress_cycle_preserves_values((rows, cols, triples) in matrix_strategy()) {
        let mut rm = build::<RowMajor>(rows, cols, &triples);
        let mut cm = build::<ColumnMajor>(rows, cols, &triples);
        let dense = rm.to_dense();

        rm.compress();
        rm.uncompress().unwrap();
        cm.compress();
        cm.uncompress().unwrap();

        for r in 0..rows {
            for c in 0..cols {
                prop_assert_eq!(rm.read(r, c).unwrap(), dense[[r, c]]);
                prop_assert_eq!(cm.read(r, c).unwrap(), dense[[r, c]]);
            }
        }
    }

    #[test]
    fn norms_are_representation_independent((rows, cols, triples) in matrix_strategy()) {
        let rm = build::<RowMajor>(rows, cols, &triples);
        let cm = build::<ColumnMajor>(rows, cols, &triples);
        let mut rm_c = rm.clone();
        rm_c.compress();
        let mut cm_c = cm.clone();
        cm_c.compress();

        for kind in [NormKind::One, NormKind::Infinity, NormKind::Frobenius] {
            let reference = rm.norm(kind);
            prop_assert!(close(cm.norm(kind), reference));
            prop_assert!(close(rm_c.norm(kind), reference));
            prop_assert!(close(cm_c.norm(kind), reference));
        }
    }

    #[test]
    fn mul_vec_is_linear(((rows, cols, triples), x, y, alpha) in product_strategy()) {
        let mut a = build::<ColumnMajor>(rows, cols, &triples);
        a.compress();

        let sum: Vec<f64> = x.iter().zip(&y).map(|(p, q)| p + q).collect();
        let scaled: Vec<f64> = x.iter().map(|p| alpha * p).collect();

        let ax = a.mul_vec(&x).unwrap();
        let ay = a.mul_vec(&y).unwrap();
        let a_sum = a.mul_vec(&sum).unwrap();
        let a_scaled = a.mul_vec(&scaled).unwrap();

        for i in 0..rows {
            prop_assert!(close(a_sum[i], ax[i] + ay[i]));
            prop_assert!(close(a_scaled[i], alpha * ax[i]));
        }
    }

    #[test]
    fn mul_vec_agrees_across_orders(((rows, cols, triples), x, _y, _alpha) in product_strategy()) {
        let rm = build::<RowMajor>(rows, cols, &triples);
        let mut cm = build::<ColumnMajor>(rows, cols, &triples);
        cm.compress();

        let expected = rm.mul_vec(&x).unwrap();
        let got = cm.mul_vec(&x).unwrap();
        for i in 0..rows {
            prop_assert!(close(got[i], expected[i]));
        }
    }

    #[test]
    fn wrong_length_is_rejected((rows, cols, triples) in matrix_strategy(), extra in 1usize..4) {
        let a = build::<RowMajor>(rows, cols, &triples);
        let x = vec![1.0; cols + extra];
        prop_assert!(a.mul_vec(&x).is_err());
    }
}
