use std::env;
use std::process::ExitCode;

use log::{error, info};
use sparse_algebra::{load, NormKind, Result, RowMajor, SparseMatrix};

fn main() -> ExitCode {
    env_logger::init();

    println!("sparse-algebra {}", sparse_algebra::VERSION);

    let outcome = match env::args().nth(1) {
        Some(path) => summarize_file(&path),
        None => demo(),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Walks a small matrix through both representations
fn demo() -> Result<()> {
    let mut mat = SparseMatrix::<f64, RowMajor>::from_triplets([
        (0, 0, 1.2),
        (1, 2, -3.4),
        (2, 1, 5.6),
    ]);

    println!("\nInitial matrix (uncompressed):");
    mat.print();

    *mat.write(1, 2)? = 10.0; // existing entry
    *mat.write(2, 0)? = 7.8; // new entry
    println!("Modified matrix (uncompressed):");
    mat.print();

    mat.compress();
    *mat.write(2, 1)? = -2.5;
    match mat.write(0, 1) {
        Ok(_) => println!("unexpected: inserted into a compressed matrix"),
        Err(e) => println!("Rejected while compressed: {}", e),
    }
    println!("Modified matrix (compressed):");
    mat.print();

    mat.uncompress()?;
    *mat.write(0, 1)? = 3.25;
    println!("Final matrix (uncompressed):");
    mat.print();

    let vec = [1.0, 2.0, 3.0];
    let result = mat.mul_vec(&vec)?;
    println!("Matrix-vector product with {:?}:", vec);
    println!("{:?}", result);

    Ok(())
}

/// Loads a Matrix Market file and reports its shape and norms
fn summarize_file(path: &str) -> Result<()> {
    let mut mat: SparseMatrix<f64, RowMajor> = load(path)?;
    info!("loaded {}", path);

    println!("\n{}: {} × {}, {} stored entries", path, mat.rows(), mat.cols(), mat.nnz());
    mat.compress();

    println!("  one norm:       {}", mat.norm(NormKind::One));
    println!("  infinity norm:  {}", mat.norm(NormKind::Infinity));
    println!("  Frobenius norm: {}", mat.norm(NormKind::Frobenius));

    let ones = vec![1.0; mat.cols()];
    let row_sums = mat.mul_vec(&ones)?;
    let preview: Vec<_> = row_sums.iter().take(5).collect();
    println!("  A·1 (first rows): {:?}", preview);

    Ok(())
}
