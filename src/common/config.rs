//! Configuration for leafdb.
//!
//! Layout constants are fixed at compile time; the only runtime knob is the
//! capacity of the page table, carried by [`Config`].

/// Size of a page in bytes (4KB).
///
/// Every node occupies exactly one page and the backing file is a plain
/// concatenation of pages, so this value is part of the on-disk format.
/// Files written with one page size cannot be opened by a build using another.
pub const PAGE_SIZE: usize = 4096;

/// Default capacity of the page table.
pub const TABLE_MAX_PAGES: u32 = 100;

/// Runtime options for opening a [`Table`](crate::Table).
///
/// # Example
/// ```
/// use leafdb::Config;
///
/// let config = Config::default().with_max_pages(8);
/// assert_eq!(config.max_pages, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of pages the table may hold, in memory and on disk.
    pub max_pages: u32,
}

impl Config {
    /// Set the page table capacity.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_pages: TABLE_MAX_PAGES,
        }
    }
}
