//! System-wide performance counters
//!
//! Mirrors the OS `PERFORMANCE_INFORMATION` record. Memory counters are in
//! pages; `page_size` converts them to bytes.

/// One reading of the system performance counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerformanceSnapshot {
    /// Pages currently committed by the system
    pub commit_total: u64,
    /// Commit limit (RAM plus page files), in pages
    pub commit_limit: u64,
    /// Peak committed pages since boot
    pub commit_peak: u64,
    /// Physical memory, in pages
    pub physical_total: u64,
    /// Available physical memory, in pages
    pub physical_available: u64,
    /// System cache, in pages
    pub system_cache: u64,
    /// Paged plus nonpaged kernel pools, in pages
    pub kernel_total: u64,
    pub kernel_paged: u64,
    pub kernel_nonpaged: u64,
    /// Size of a page in bytes
    pub page_size: u64,
    pub handle_count: u32,
    pub process_count: u32,
    pub thread_count: u32,
}

impl PerformanceSnapshot {
    /// Snapshot carrying only a page size
    pub fn with_page_size(page_size: u64) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }

    #[inline]
    pub fn pages_to_bytes(&self, pages: u64) -> u64 {
        pages.saturating_mul(self.page_size)
    }

    pub fn physical_total_bytes(&self) -> u64 {
        self.pages_to_bytes(self.physical_total)
    }

    pub fn physical_available_bytes(&self) -> u64 {
        self.pages_to_bytes(self.physical_available)
    }

    pub fn commit_total_bytes(&self) -> u64 {
        self.pages_to_bytes(self.commit_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_conversions() {
        let snap = PerformanceSnapshot {
            physical_total: 1024,
            physical_available: 256,
            commit_total: 10,
            page_size: 4096,
            ..Default::default()
        };
        assert_eq!(snap.physical_total_bytes(), 4 * 1024 * 1024);
        assert_eq!(snap.physical_available_bytes(), 1024 * 1024);
        assert_eq!(snap.commit_total_bytes(), 40960);
    }

    #[test]
    fn test_with_page_size() {
        let snap = PerformanceSnapshot::with_page_size(8192);
        assert_eq!(snap.page_size, 8192);
        assert_eq!(snap.pages_to_bytes(3), 24576);
        assert_eq!(snap.physical_total, 0);
    }
}
