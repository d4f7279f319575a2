//! Table - the B-tree, its pages and its backing file.
//!
//! [`Table`] is the engine's entry point: open a file, insert and scan rows,
//! close to persist.

mod rows;

use std::path::Path;

use log::info;

use crate::common::{Config, PageId, Result};
use crate::index::btree::{self, leaf, node, Cursor};
use crate::row::Row;
use crate::storage::Pager;

pub use rows::Rows;

/// A single table of [`Row`]s keyed by id.
///
/// # Root Page
/// The root always lives in page 0. When the root leaf splits, its contents
/// move to a new page and page 0 is rewritten in place as an internal node.
///
/// # Example
/// ```no_run
/// use leafdb::{Row, Table};
///
/// let mut table = Table::open("users.db")?;
/// table.insert_row(&Row::new(1, "alice", "alice@example.com")?)?;
///
/// for row in table.select_all()? {
///     println!("{}", row?);
/// }
///
/// table.close()?;
/// # Ok::<(), leafdb::Error>(())
/// ```
pub struct Table {
    pager: Pager,
    root_page_id: PageId,
}

impl Table {
    /// Open the table stored at `path` with default settings.
    ///
    /// See [`Table::open_with`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, Config::default())
    }

    /// Open the table stored at `path`, creating the file if needed.
    ///
    /// An empty file yields a table whose root is an empty leaf.
    ///
    /// # Errors
    /// - `Error::Corrupt` if the file size is not a whole number of pages
    /// - `Error::TableFull` if the file has more pages than `config.max_pages`
    /// - I/O errors from reading the file
    pub fn open_with<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let mut pager = Pager::open(path, config)?;
        let root_page_id = PageId::new(0);

        if pager.num_pages() == 0 {
            let root = pager.get_page(root_page_id)?.as_mut_slice();
            leaf::init_leaf(root);
            node::set_is_root(root, true);
            info!("initialized empty table");
        }

        Ok(Self {
            pager,
            root_page_id,
        })
    }

    /// Write every page back to the file and release it.
    pub fn close(mut self) -> Result<()> {
        self.pager.flush()?;
        info!(
            "closed table with {} pages ({} bytes)",
            self.pager.num_pages(),
            self.pager.file_size()
        );
        Ok(())
    }

    /// Insert a row keyed by its id.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if a row with the same id exists
    /// - `Error::TableFull` if the page table has no room for a split
    /// - `Error::Unsupported` if the insert would split a non-root leaf
    ///
    /// On any error the table is unchanged.
    pub fn insert_row(&mut self, row: &Row) -> Result<()> {
        btree::insert(&mut self.pager, self.root_page_id, row)
    }

    /// Iterate over all rows in ascending id order.
    pub fn select_all(&self) -> Result<Rows<'_>> {
        Rows::new(&self.pager, self.root_page_id)
    }

    /// Look up a single row by id.
    pub fn get(&self, id: u32) -> Result<Option<Row>> {
        let cursor = Cursor::find(&self.pager, self.root_page_id, id)?;
        if cursor.key(&self.pager)? != Some(id) {
            return Ok(None);
        }
        cursor.row(&self.pager)
    }

    /// Indented dump of the tree's nodes and keys.
    pub fn render_tree(&self) -> Result<String> {
        btree::render_tree(&self.pager, self.root_page_id)
    }

    #[inline]
    pub fn root_page_id(&self) -> PageId {
        self.root_page_id
    }

    /// Number of pages the table occupies.
    #[inline]
    pub fn num_pages(&self) -> u32 {
        self.pager.num_pages()
    }

    /// Read access to the underlying pages.
    #[inline]
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}
