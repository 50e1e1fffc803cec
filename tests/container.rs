//! Integration tests for element access and the compressed/uncompressed cycle

use sparse_algebra::{ColumnMajor, RowMajor, SparseError, SparseMatrix, StorageOrder};

/// Build the 3×3 example matrix used throughout
fn example<O: StorageOrder>() -> SparseMatrix<f64, O> {
    SparseMatrix::from_triplets([(0, 0, 1.2), (1, 2, -3.4), (2, 1, 5.6)])
}

#[allow(clippy::approx_constant)]
fn walk_scenario<O: StorageOrder>() {
    let mut mat = example::<O>();
    assert_eq!(mat.shape(), (3, 3));
    assert_eq!(mat.read(0, 0).unwrap(), 1.2);
    assert_eq!(mat.read(0, 1).unwrap(), 0.0);

    *mat.write(1, 2).unwrap() = 10.0;
    *mat.write(2, 0).unwrap() = 7.8;
    mat.compress();
    assert!(mat.is_compressed());

    *mat.write(2, 1).unwrap() = -2.5;
    assert_eq!(mat.read(2, 1).unwrap(), -2.5);

    assert!(matches!(
        mat.write(0, 1),
        Err(SparseError::CannotInsertIntoCompressed { row: 0, col: 1 })
    ));

    mat.uncompress().unwrap();
    *mat.write(0, 1).unwrap() = 3.14;
    assert_eq!(mat.read(0, 1).unwrap(), 3.14);

    assert_eq!(mat.read(1, 2).unwrap(), 10.0);
    assert_eq!(mat.read(2, 0).unwrap(), 7.8);
    assert_eq!(mat.nnz(), 5);
}

#[test]
fn test_scenario_row_major() {
    walk_scenario::<RowMajor>();
}

#[test]
fn test_scenario_column_major() {
    walk_scenario::<ColumnMajor>();
}

#[test]
fn test_compress_round_trip_preserves_values() {
    let mut mat = SparseMatrix::<f64, ColumnMajor>::new(4, 5);
    mat.set(0, 4, 1.0).unwrap();
    mat.set(3, 0, -2.0).unwrap();
    mat.set(2, 2, 0.5).unwrap();
    mat.set(3, 4, 9.0).unwrap();

    let before: Vec<f64> = (0..4)
        .flat_map(|r| (0..5).map(move |c| (r, c)))
        .map(|(r, c)| mat.read(r, c).unwrap())
        .collect();

    mat.compress();
    let compressed: Vec<f64> = (0..4)
        .flat_map(|r| (0..5).map(move |c| (r, c)))
        .map(|(r, c)| mat.read(r, c).unwrap())
        .collect();

    mat.uncompress().unwrap();
    let after: Vec<f64> = (0..4)
        .flat_map(|r| (0..5).map(move |c| (r, c)))
        .map(|(r, c)| mat.read(r, c).unwrap())
        .collect();

    assert_eq!(before, compressed);
    assert_eq!(before, after);
}

#[test]
fn test_write_out_of_range_in_both_states() {
    let mut mat = example::<RowMajor>();
    assert!(matches!(
        mat.write(3, 0),
        Err(SparseError::IndexOutOfRange { rows: 3, cols: 3, .. })
    ));

    mat.compress();
    assert!(matches!(
        mat.write(0, 7),
        Err(SparseError::IndexOutOfRange { .. })
    ));
}

#[test]
fn test_empty_rows_and_columns_survive_compression() {
    let mut mat = SparseMatrix::<i32, RowMajor>::new(5, 5);
    mat.set(4, 4, 1).unwrap();
    mat.compress();

    assert_eq!(mat.read(4, 4).unwrap(), 1);
    assert_eq!(mat.read(0, 0).unwrap(), 0);
    assert_eq!(mat.nnz(), 1);
}

#[test]
fn test_order_conversion_keeps_logical_matrix() {
    let rm = example::<RowMajor>();
    let cm: SparseMatrix<f64, ColumnMajor> = rm.to_order();
    assert_eq!(cm.to_dense(), rm.to_dense());
}

#[test]
fn test_print_output() {
    let mut mat = SparseMatrix::<i32, RowMajor>::from_triplets([(0, 0, 1), (1, 1, 2)]);
    let uncompressed = mat.to_string();
    mat.compress();
    assert_eq!(mat.to_string(), uncompressed);
    assert_eq!(uncompressed, "1 0\n0 2\n");
}
