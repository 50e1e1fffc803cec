//! Compressed lane storage (CSR for row-major, CSC for column-major)

use std::fmt;
use std::iter::Zip;
use std::slice;

/// Per-lane sorted `(secondary, value)` lists packed into three arrays
///
/// - `outer_ptr`: size n_outer + 1, `outer_ptr[p]..outer_ptr[p + 1]` is lane `p`
/// - `inner_idx`: size nnz, secondary index of every stored element
/// - `values`: size nnz, stored values
///
/// Within a lane, secondary indices are strictly increasing.
#[derive(Clone, PartialEq)]
pub struct CompressedStorage<T> {
    pub(crate) outer_ptr: Vec<usize>,
    pub(crate) inner_idx: Vec<usize>,
    pub(crate) values: Vec<T>,
}

/// Iterator over one compressed lane
pub type PackedLane<'a, T> = Zip<slice::Iter<'a, usize>, slice::Iter<'a, T>>;

impl<T> CompressedStorage<T> {
    /// Creates compressed storage from raw arrays
    ///
    /// # Panics
    ///
    /// Panics if the arrays are inconsistent:
    /// - outer_ptr must be non-empty and non-decreasing
    /// - inner_idx.len() must equal values.len()
    /// - the last outer pointer must equal inner_idx.len()
    pub fn new(outer_ptr: Vec<usize>, inner_idx: Vec<usize>, values: Vec<T>) -> Self {
        assert!(!outer_ptr.is_empty(), "outer_ptr must hold n_outer + 1 entries");
        assert_eq!(
            inner_idx.len(),
            values.len(),
            "inner_idx.len() must equal values.len()"
        );
        assert_eq!(
            outer_ptr[outer_ptr.len() - 1],
            inner_idx.len(),
            "last outer pointer must equal inner_idx.len()"
        );
        assert!(
            outer_ptr.windows(2).all(|w| w[0] <= w[1]),
            "outer_ptr must be non-decreasing"
        );

        Self {
            outer_ptr,
            inner_idx,
            values,
        }
    }

    /// Builds storage from `(primary, secondary, value)` entries already sorted
    /// by `(primary, secondary)`
    pub(crate) fn from_sorted<I>(n_outer: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut outer_ptr = Vec::with_capacity(n_outer + 1);
        let mut inner_idx = Vec::new();
        let mut values = Vec::new();

        outer_ptr.push(0);
        let mut current = 0;
        for (p, s, v) in entries {
            // Close every lane before p, including empty ones
            while current < p {
                outer_ptr.push(inner_idx.len());
                current += 1;
            }
            inner_idx.push(s);
            values.push(v);
        }
        while current < n_outer {
            outer_ptr.push(inner_idx.len());
            current += 1;
        }

        Self {
            outer_ptr,
            inner_idx,
            values,
        }
    }

    /// Number of lanes
    pub fn n_outer(&self) -> usize {
        self.outer_ptr.len() - 1
    }

    /// Number of stored elements
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterates lane `p` as `(secondary, &value)` pairs
    pub fn lane(&self, p: usize) -> PackedLane<'_, T> {
        let (start, end) = (self.outer_ptr[p], self.outer_ptr[p + 1]);
        self.inner_idx[start..end].iter().zip(&self.values[start..end])
    }

    /// Position of `(p, s)` in the packed arrays
    pub(crate) fn position(&self, p: usize, s: usize) -> Option<usize> {
        let (start, end) = (self.outer_ptr[p], self.outer_ptr[p + 1]);
        self.inner_idx[start..end]
            .binary_search(&s)
            .ok()
            .map(|offset| start + offset)
    }

    pub(crate) fn get(&self, p: usize, s: usize) -> Option<&T> {
        self.position(p, s).map(|pos| &self.values[pos])
    }

    pub(crate) fn get_mut(&mut self, p: usize, s: usize) -> Option<&mut T> {
        self.position(p, s).map(move |pos| &mut self.values[pos])
    }

    /// Consumes the storage, yielding `(primary, secondary, value)` in order
    pub(crate) fn into_entries(self) -> impl Iterator<Item = (usize, usize, T)> {
        let outer_ptr = self.outer_ptr;
        let lane_of = move |pos: usize| outer_ptr.partition_point(|&start| start <= pos) - 1;
        self.inner_idx
            .into_iter()
            .zip(self.values)
            .enumerate()
            .map(move |(pos, (s, v))| (lane_of(pos), s, v))
    }
}

impl<T: Copy> CompressedStorage<T> {
    /// Transposes lanes: lane `p` entry `s` becomes lane `s` entry `p`
    ///
    /// `n_inner` is the length of the secondary axis, which becomes the
    /// number of lanes of the result.
    pub fn transpose(&self, n_inner: usize) -> Self {
        // Count entries per new lane
        let mut counts = vec![0; n_inner];
        for &s in &self.inner_idx {
            counts[s] += 1;
        }

        // New pointers via prefix sum
        let mut outer_ptr = vec![0; n_inner + 1];
        let mut sum = 0;
        for (i, &count) in counts.iter().enumerate() {
            outer_ptr[i] = sum;
            sum += count;
        }
        outer_ptr[n_inner] = sum;

        let nnz = self.nnz();
        let mut inner_idx = vec![0; nnz];
        let mut values = Vec::with_capacity(nnz);
        let mut slots: Vec<Option<T>> = vec![None; nnz];

        // Lanes are visited in increasing order, so each new lane is filled
        // with increasing inner indices.
        let mut next = outer_ptr.clone();
        for p in 0..self.n_outer() {
            for (&s, &v) in self.lane(p) {
                let pos = next[s];
                inner_idx[pos] = p;
                slots[pos] = Some(v);
                next[s] += 1;
            }
        }
        values.extend(slots.into_iter().flatten());

        Self {
            outer_ptr,
            inner_idx,
            values,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CompressedStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CompressedStorage {{")?;
        writeln!(f, "  lanes: {}", self.n_outer())?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Print a sample of the content
        let max_lanes_to_print = 5.min(self.n_outer());

        for p in 0..max_lanes_to_print {
            write!(f, "    lane {}: ", p)?;
            let start = self.outer_ptr[p];
            let end = self.outer_ptr[p + 1];

            if start == end {
                writeln!(f, "(empty)")?;
                continue;
            }

            let max_elements = 5.min(end - start);
            for j in start..(start + max_elements) {
                write!(f, "({}, {:?}) ", self.inner_idx[j], self.values[j])?;
            }
            if end - start > max_elements {
                write!(f, "... ({} more)", end - start - max_elements)?;
            }
            writeln!(f)?;
        }

        if self.n_outer() > max_lanes_to_print {
            writeln!(f, "    ... ({} more lanes)", self.n_outer() - max_lanes_to_print)?;
        }

        write!(f, "}}")
    }
}
