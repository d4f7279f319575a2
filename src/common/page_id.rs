//! Page numbers.

use std::fmt;

use crate::common::config::PAGE_SIZE;

/// Number of a page in the table file.
///
/// Page N lives at file offset `N × PAGE_SIZE`, and page 0 is always the root.
/// Internal nodes store child pointers as the raw `u32`.
///
/// # Example
/// ```
/// use leafdb::PageId;
///
/// let page_id = PageId::new(3);
/// assert_eq!(page_id.offset(), 3 * 4096);
/// assert_eq!(page_id.to_string(), "Page(3)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u32);

impl PageId {
    #[inline]
    pub fn new(id: u32) -> Self {
        PageId(id)
    }

    /// Byte offset of the page within the table file.
    #[inline]
    pub fn offset(&self) -> u64 {
        u64::from(self.0) * PAGE_SIZE as u64
    }

    /// Slot of the page in the pager's directory.
    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_page_aligned() {
        assert_eq!(PageId::new(0).offset(), 0);
        assert_eq!(PageId::new(1).offset(), PAGE_SIZE as u64);
        assert_eq!(PageId::new(99).offset(), 99 * PAGE_SIZE as u64);
    }

    #[test]
    fn test_offset_does_not_overflow() {
        let last = PageId::new(u32::MAX);
        assert_eq!(last.offset(), u64::from(u32::MAX) * 4096);
    }

    #[test]
    fn test_ordering_follows_page_number() {
        let mut ids = vec![PageId::new(2), PageId::new(0), PageId::new(1)];
        ids.sort();
        assert_eq!(ids, vec![PageId::new(0), PageId::new(1), PageId::new(2)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PageId::new(42)), "Page(42)");
    }
}
