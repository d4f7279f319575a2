//! Cursor - a position inside the tree.
//!
//! A [`Cursor`] is a plain `(page, cell)` pair. It borrows nothing, so it stays
//! `Copy` and can be kept across calls, but any insert may move cells between
//! pages: re-derive cursors after every mutation.

use log::warn;

use crate::common::{Error, PageId, Result};
use crate::row::Row;
use crate::storage::page::NodeType;
use crate::storage::Pager;

use super::{internal, leaf, node};

/// Position of one cell in a leaf node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Leaf page the cursor points into.
    pub page_id: PageId,
    /// Cell index within that leaf.
    pub cell_num: u32,
    /// Set once `cell_num` has moved past the leaf's last cell.
    pub end_of_table: bool,
}

impl Cursor {
    /// Cursor on the first cell of the leftmost leaf under `root`.
    ///
    /// `end_of_table` is set when that leaf is empty, which for a single-leaf
    /// tree means the table is empty.
    pub fn start(pager: &Pager, root: PageId) -> Result<Self> {
        let mut page_id = root;

        for _ in 0..=pager.num_pages() {
            let page = pager.page(page_id)?.as_slice();
            match node::node_type(page)? {
                NodeType::Leaf => return Self::at_leaf(pager, page_id),
                NodeType::Internal => page_id = internal::child(page, 0)?,
            }
        }

        Err(cycle_error(root))
    }

    /// Cursor on the first cell of a specific leaf.
    ///
    /// # Errors
    /// Returns `Error::Corrupt` if `page_id` is not a leaf.
    pub fn at_leaf(pager: &Pager, page_id: PageId) -> Result<Self> {
        let page = pager.page(page_id)?.as_slice();
        if node::node_type(page)? != NodeType::Leaf {
            warn!("expected a leaf at {}", page_id);
            return Err(Error::Corrupt(format!("{} is not a leaf", page_id)));
        }

        Ok(Self {
            page_id,
            cell_num: 0,
            end_of_table: leaf::checked_num_cells(page)? == 0,
        })
    }

    /// Descend from `root` to the leaf that holds, or would hold, `key`.
    ///
    /// The returned cell is the exact match if present, otherwise the index
    /// the key would be inserted at. `end_of_table` is set when that index is
    /// past the leaf's last cell.
    pub fn find(pager: &Pager, root: PageId, key: u32) -> Result<Self> {
        let mut page_id = root;

        for _ in 0..=pager.num_pages() {
            let page = pager.page(page_id)?.as_slice();
            match node::node_type(page)? {
                NodeType::Leaf => {
                    let num_cells = leaf::checked_num_cells(page)?;
                    let cell_num = leaf_find(page, num_cells, key);
                    return Ok(Self {
                        page_id,
                        cell_num,
                        end_of_table: cell_num >= num_cells,
                    });
                }
                NodeType::Internal => {
                    let num_keys = internal::checked_num_keys(page)?;
                    page_id = internal::child(page, internal_find_child(page, num_keys, key))?;
                }
            }
        }

        Err(cycle_error(root))
    }

    /// Move to the next cell of the current leaf.
    ///
    /// Sets `end_of_table` on reaching the end of the leaf; the cursor never
    /// moves on to a sibling leaf.
    pub fn advance(&mut self, pager: &Pager) -> Result<()> {
        let page = pager.page(self.page_id)?.as_slice();
        self.cell_num += 1;
        if self.cell_num >= leaf::checked_num_cells(page)? {
            self.end_of_table = true;
        }
        Ok(())
    }

    /// Key under the cursor, or `None` past the last cell.
    pub fn key(&self, pager: &Pager) -> Result<Option<u32>> {
        let page = pager.page(self.page_id)?.as_slice();
        if self.cell_num >= leaf::checked_num_cells(page)? {
            return Ok(None);
        }
        Ok(Some(leaf::key(page, self.cell_num)))
    }

    /// Row under the cursor, or `None` past the last cell.
    pub fn row(&self, pager: &Pager) -> Result<Option<Row>> {
        let page = pager.page(self.page_id)?.as_slice();
        if self.cell_num >= leaf::checked_num_cells(page)? {
            return Ok(None);
        }
        Ok(Some(leaf::value(page, self.cell_num)))
    }
}

/// Index of `key` among the first `num_cells` cells, or the first index
/// whose key is greater.
fn leaf_find(page: &[u8], num_cells: u32, key: u32) -> u32 {
    let mut min_index = 0;
    let mut one_past_max_index = num_cells;

    while one_past_max_index != min_index {
        let index = min_index + (one_past_max_index - min_index) / 2;
        let key_at_index = leaf::key(page, index);
        if key == key_at_index {
            return index;
        }
        if key < key_at_index {
            one_past_max_index = index;
        } else {
            min_index = index + 1;
        }
    }

    min_index
}

/// Least child index whose key is `>= key`; `num_keys` selects the right child.
fn internal_find_child(page: &[u8], num_keys: u32, key: u32) -> u32 {
    let mut min_index = 0;
    let mut max_index = num_keys;

    while min_index != max_index {
        let index = min_index + (max_index - min_index) / 2;
        if internal::key(page, index) >= key {
            max_index = index;
        } else {
            min_index = index + 1;
        }
    }

    min_index
}

fn cycle_error(root: PageId) -> Error {
    warn!("descent from {} did not reach a leaf", root);
    Error::Corrupt(format!("descent from {} did not reach a leaf", root))
}
