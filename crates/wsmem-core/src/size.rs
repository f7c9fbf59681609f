//! Working-set size calculator

use core::fmt;

use crate::constants::BYTES_PER_MB;
use crate::working_set::WorkingSet;

/// Total, shared and private working-set bytes
///
/// `private == total - shared` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkingSetSize {
    pub total: u64,
    pub shared: u64,
    pub private: u64,
}

impl WorkingSetSize {
    /// Build from page counts
    pub fn from_counts(pages: u64, shared_pages: u64, page_size: u64) -> Self {
        debug_assert!(shared_pages <= pages);
        let total = pages * page_size;
        let shared = shared_pages * page_size;
        Self {
            total,
            shared,
            private: total - shared,
        }
    }

    /// Total in decimal megabytes
    pub fn total_mb(&self) -> f64 {
        self.total as f64 / BYTES_PER_MB
    }

    pub fn shared_mb(&self) -> f64 {
        self.shared as f64 / BYTES_PER_MB
    }

    pub fn private_mb(&self) -> f64 {
        self.private as f64 / BYTES_PER_MB
    }
}

impl fmt::Display for WorkingSetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} shared={} private={}",
            self.total, self.shared, self.private
        )
    }
}

/// Fold a working set and the page size into byte totals
pub fn compute_sizes(working_set: &WorkingSet, page_size_bytes: u64) -> WorkingSetSize {
    WorkingSetSize::from_counts(
        working_set.len() as u64,
        working_set.shared_count() as u64,
        page_size_bytes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageDescriptor;

    fn working_set(total: usize, shared: usize) -> WorkingSet {
        (0..total)
            .map(|i| PageDescriptor::new(4, 0, i < shared, i))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_empty_working_set() {
        let sizes = compute_sizes(&WorkingSet::new(), 4096);
        assert_eq!(sizes, WorkingSetSize { total: 0, shared: 0, private: 0 });
    }

    #[test]
    fn test_ten_pages_three_shared() {
        let sizes = compute_sizes(&working_set(10, 3), 4096);
        assert_eq!(sizes.total, 40960);
        assert_eq!(sizes.shared, 12288);
        assert_eq!(sizes.private, 28672);
    }

    #[test]
    fn test_totals_add_up() {
        for &(n, s, b) in &[(1, 0, 4096), (7, 7, 4096), (100, 33, 8192), (513, 1, 65536)] {
            let sizes = compute_sizes(&working_set(n, s), b);
            assert_eq!(sizes.total, n as u64 * b);
            assert_eq!(sizes.shared, s as u64 * b);
            assert_eq!(sizes.private, (n - s) as u64 * b);
            assert_eq!(sizes.total, sizes.shared + sizes.private);
        }
    }

    #[test]
    fn test_large_counts_use_wide_arithmetic() {
        // 2^32 pages of 64 KB would overflow a 32-bit product
        let sizes = WorkingSetSize::from_counts(1 << 32, 1 << 31, 65536);
        assert_eq!(sizes.total, 1 << 48);
        assert_eq!(sizes.private, 1 << 47);
    }

    #[test]
    fn test_megabytes() {
        let sizes = WorkingSetSize::from_counts(1000, 250, 1000);
        assert!((sizes.total_mb() - 1.0).abs() < f64::EPSILON);
        assert!((sizes.shared_mb() - 0.25).abs() < f64::EPSILON);
        assert!((sizes.private_mb() - 0.75).abs() < f64::EPSILON);
    }
}
