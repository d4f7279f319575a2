//! Page - one B-tree node's worth of bytes.
//!
//! The [`Pager`](crate::Pager) owns every page of a table, boxed, for the
//! table's lifetime. Interpreting the bytes is left to the node accessors in
//! [`index::btree`](crate::index::btree).

use crate::common::config::PAGE_SIZE;

/// A page of data (4KB, 4KB-aligned).
///
/// The bytes are exactly what is stored at the page's offset in the table
/// file, slack included. A page that was never written is all zeros.
///
/// `Page` is not `Clone` outside tests; duplicating one goes through
/// [`Page::from_bytes`] or [`Page::copy_from`] so every 4KB copy is visible.
///
/// # Example
/// ```
/// use leafdb::storage::page::Page;
///
/// let mut page = Page::new();
/// page.as_mut_slice()[0] = 0xFF;
///
/// let copy = Page::from_bytes(page.as_slice());
/// assert_eq!(copy.as_slice()[0], 0xFF);
/// ```
#[repr(align(4096))]
pub struct Page {
    data: [u8; PAGE_SIZE],
}

impl Page {
    /// A zeroed page.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [0u8; PAGE_SIZE],
        }
    }

    /// A page holding a copy of `bytes`.
    ///
    /// # Panics
    /// Panics if `bytes.len() != PAGE_SIZE`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut page = Self::new();
        page.copy_from(bytes);
        page
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Replace the whole page with `bytes`.
    ///
    /// # Panics
    /// Panics if `bytes.len() != PAGE_SIZE`.
    pub fn copy_from(&mut self, bytes: &[u8]) {
        self.data.copy_from_slice(bytes);
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Clone for Page {
    fn clone(&self) -> Self {
        Page::from_bytes(&self.data)
    }
}
