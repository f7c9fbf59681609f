//! Resident page list of one process

use crate::page::PageDescriptor;

/// Ordered page descriptors, one per resident page at query time
///
/// Always produced by a fresh query; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingSet {
    pages: Vec<PageDescriptor>,
}

impl WorkingSet {
    /// Create an empty working set
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Decode raw OS words into a working set
    pub fn from_raw(words: &[usize]) -> Self {
        Self {
            pages: words.iter().copied().map(PageDescriptor::from_raw).collect(),
        }
    }

    /// Number of resident pages
    #[inline]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageDescriptor> {
        self.pages.iter()
    }

    pub fn as_slice(&self) -> &[PageDescriptor] {
        &self.pages
    }

    /// Pages mapped into more than one working set
    pub fn shared_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_shared()).count()
    }

    /// Pages private to this process
    pub fn private_count(&self) -> usize {
        self.len() - self.shared_count()
    }

    pub fn into_vec(self) -> Vec<PageDescriptor> {
        self.pages
    }
}

impl From<Vec<PageDescriptor>> for WorkingSet {
    fn from(pages: Vec<PageDescriptor>) -> Self {
        Self { pages }
    }
}

impl IntoIterator for WorkingSet {
    type Item = PageDescriptor;
    type IntoIter = std::vec::IntoIter<PageDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

impl<'a> IntoIterator for &'a WorkingSet {
    type Item = &'a PageDescriptor;
    type IntoIter = std::slice::Iter<'a, PageDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
