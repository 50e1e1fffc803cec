//! Matrix Market coordinate format reader/writer
//!
//! Only the sparse coordinate layout is handled:
//!
//! ```text
//! %%MatrixMarket matrix coordinate real general
//! % any number of comment lines
//! <rows> <cols> <nnz>
//! <row> <col> <value>        (1-based indices)
//! ...
//! ```
//!
//! Files are always read into an uncompressed matrix, whichever storage order
//! is requested.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, trace};

use crate::config::{DuplicatePolicy, MatrixMarketConfig};
use crate::error::{Result, SparseError};
use crate::matrix::order::StorageOrder;
use crate::matrix::sparse::{SparseMatrix, Storage};
use crate::scalar::Scalar;

/// Prefix every Matrix Market file starts with
pub const BANNER: &str = "%%MatrixMarket";

/// Matrix Market format reader/writer
pub struct MatrixMarketIO;

impl MatrixMarketIO {
    /// Read a matrix with the default configuration
    pub fn read_matrix<T, O, P>(path: P) -> Result<SparseMatrix<T, O>>
    where
        T: Scalar,
        O: StorageOrder,
        P: AsRef<Path>,
    {
        Self::read_matrix_with(path, &MatrixMarketConfig::default())
    }

    /// Read a matrix from a file
    pub fn read_matrix_with<T, O, P>(path: P, config: &MatrixMarketConfig) -> Result<SparseMatrix<T, O>>
    where
        T: Scalar,
        O: StorageOrder,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        debug!("reading Matrix Market file {}", path.display());
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file), config)
    }

    /// Read a matrix from any buffered source
    pub fn read_from<T, O, R>(reader: R, config: &MatrixMarketConfig) -> Result<SparseMatrix<T, O>>
    where
        T: Scalar,
        O: StorageOrder,
        R: BufRead,
    {
        // Raw byte lines: comment lines are skipped without being decoded
        let mut lines = reader.split(b'\n').enumerate().map(|(i, line)| (i + 1, line));

        let header = match lines.next() {
            Some((_, line)) => line?,
            None => return Err(SparseError::BadFormat("empty input".to_string())),
        };
        if !header.starts_with(BANNER.as_bytes()) {
            return Err(SparseError::BadFormat(format!(
                "first line does not start with {}",
                BANNER
            )));
        }

        // Size line: first line that is neither a comment nor blank
        let mut size_line = None;
        for (line_no, line) in lines.by_ref() {
            let line = line?;
            if !is_skipped(&line) {
                size_line = Some((line_no, line));
                break;
            }
        }
        let (line_no, line) = size_line
            .ok_or_else(|| SparseError::BadFormat("missing size line".to_string()))?;
        let line = decode(&line, line_no)?;

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(SparseError::parse(line_no, "expected `rows cols nnz`"));
        }
        let n_rows = parse_count(parts[0], line_no, "number of rows")?;
        let n_cols = parse_count(parts[1], line_no, "number of columns")?;
        let nnz = parse_count(parts[2], line_no, "number of non-zeros")?;
        debug!("declared size {} × {} with {} entries", n_rows, n_cols, nnz);

        let mut elements: BTreeMap<(usize, usize), T> = BTreeMap::new();
        let mut n_entries = 0;
        let mut last_line = line_no;

        for (line_no, line) in lines {
            let line = line?;
            last_line = line_no;
            if is_skipped(&line) {
                continue;
            }
            let line = decode(&line, line_no)?;

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return Err(SparseError::parse(line_no, "expected `row col value`"));
            }

            let row = parse_index(parts[0], line_no, "row index")?;
            let col = parse_index(parts[1], line_no, "column index")?;
            if row >= n_rows || col >= n_cols {
                return Err(SparseError::IndexOutOfRange {
                    row,
                    col,
                    rows: n_rows,
                    cols: n_cols,
                });
            }

            let parsed: f64 = parts[2]
                .parse()
                .map_err(|_| SparseError::parse(line_no, format!("invalid value `{}`", parts[2])))?;
            let value = T::from_f64(parsed).ok_or_else(|| {
                SparseError::parse(line_no, format!("value {} not representable", parsed))
            })?;

            match elements.entry(O::key(row, col)) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(mut slot) => {
                    trace!("duplicate entry ({}, {}) on line {}", row, col, line_no);
                    match config.duplicates {
                        DuplicatePolicy::Overwrite => {
                            slot.insert(value);
                        }
                        DuplicatePolicy::Sum => *slot.get_mut() += value,
                    }
                }
            }
            n_entries += 1;
        }

        if config.check_entry_count && n_entries != nnz {
            return Err(SparseError::parse(
                last_line,
                format!("declared {} entries, found {}", nnz, n_entries),
            ));
        }

        debug!("read {} entries ({} stored)", n_entries, elements.len());
        Ok(SparseMatrix::from_storage(
            n_rows,
            n_cols,
            Storage::Uncompressed(elements),
        ))
    }

    /// Write a matrix in Matrix Market format
    ///
    /// Entries are written in storage order. Intended for real scalars, whose
    /// `Display` output the reader parses back.
    pub fn write_matrix<T, O, P>(path: P, matrix: &SparseMatrix<T, O>) -> Result<()>
    where
        T: Scalar + Display,
        O: StorageOrder,
        P: AsRef<Path>,
    {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(&mut writer, matrix)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a matrix to any sink
    pub fn write_to<T, O, W>(writer: &mut W, matrix: &SparseMatrix<T, O>) -> Result<()>
    where
        T: Scalar + Display,
        O: StorageOrder,
        W: Write,
    {
        writeln!(writer, "{} matrix coordinate real general", BANNER)?;
        writeln!(writer, "{} {} {}", matrix.rows(), matrix.cols(), matrix.nnz())?;

        for (row, col, value) in matrix.iter() {
            // Convert to 1-indexed
            writeln!(writer, "{} {} {}", row + 1, col + 1, value)?;
        }
        Ok(())
    }
}

/// Loads a Matrix Market file into a new uncompressed matrix
///
/// # Examples
///
/// ```no_run
/// use sparse_algebra::{load, SparseMatrix, ColumnMajor};
///
/// let m: SparseMatrix<f64, ColumnMajor> = load("matrix.mtx").unwrap();
/// println!("{} × {}", m.rows(), m.cols());
/// ```
pub fn load<T, O, P>(path: P) -> Result<SparseMatrix<T, O>>
where
    T: Scalar,
    O: StorageOrder,
    P: AsRef<Path>,
{
    MatrixMarketIO::read_matrix(path)
}

/// Replaces the contents of `matrix` with a Matrix Market file
///
/// The file is parsed completely before `matrix` is touched; on error the
/// matrix keeps its previous dimensions and contents.
pub fn load_into<T, O, P>(matrix: &mut SparseMatrix<T, O>, path: P) -> Result<()>
where
    T: Scalar,
    O: StorageOrder,
    P: AsRef<Path>,
{
    *matrix = MatrixMarketIO::read_matrix(path)?;
    Ok(())
}

/// Blank and `%` comment lines carry no data
fn is_skipped(line: &[u8]) -> bool {
    match line.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(&first) => first == b'%',
        None => true,
    }
}

fn decode(line: &[u8], line_no: usize) -> Result<&str> {
    std::str::from_utf8(line).map_err(|_| SparseError::parse(line_no, "line is not valid UTF-8"))
}

fn parse_count(token: &str, line: usize, what: &str) -> Result<usize> {
    token
        .parse()
        .map_err(|_| SparseError::parse(line, format!("invalid {} `{}`", what, token)))
}

/// Parses a 1-based index and returns it 0-based
fn parse_index(token: &str, line: usize, what: &str) -> Result<usize> {
    let index = parse_count(token, line, what)?;
    index
        .checked_sub(1)
        .ok_or_else(|| SparseError::parse(line, format!("{} must be at least 1", what)))
}
