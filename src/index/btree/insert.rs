//! Insertion - leaf insert, leaf split and root promotion.
//!
//! ```text
//! find ──▶ duplicate? ──yes──▶ Err(DuplicateKey)
//!              │ no
//!              ▼
//!          leaf full? ──no──▶ shift + write cell
//!              │ yes
//!              ▼
//!          leaf is root? ──no──▶ Err(Unsupported)
//!              │ yes
//!              ▼
//!          split leaf ──▶ promote root
//! ```
//!
//! Every check runs before the first byte is written, so a failed insert
//! leaves the tree untouched.

use log::{debug, warn};

use crate::common::{Error, PageId, Result};
use crate::row::Row;
use crate::storage::page::Page;
use crate::storage::Pager;

use super::cursor::Cursor;
use super::layout::{
    LEAF_NODE_CELL_SIZE, LEAF_NODE_LEFT_SPLIT_COUNT, LEAF_NODE_MAX_CELLS,
    LEAF_NODE_RIGHT_SPLIT_COUNT,
};
use super::{internal, leaf, node};

/// Pages a root split allocates: the new right leaf and the moved left leaf.
const ROOT_SPLIT_PAGES: u32 = 2;

/// Insert `row` keyed by its id into the tree rooted at `root`.
///
/// # Errors
/// - `Error::DuplicateKey` if the id is already present
/// - `Error::TableFull` if a split needs more pages than the pager has left
/// - `Error::Unsupported` if a non-root leaf is full
pub fn insert(pager: &mut Pager, root: PageId, row: &Row) -> Result<()> {
    let key = row.id();
    let cursor = Cursor::find(pager, root, key)?;

    if cursor.key(pager)? == Some(key) {
        return Err(Error::DuplicateKey(key));
    }

    let num_cells = leaf::checked_num_cells(pager.page(cursor.page_id)?.as_slice())?;
    if num_cells as usize >= LEAF_NODE_MAX_CELLS {
        return split_and_insert(pager, root, cursor, key, row);
    }

    let page = pager.get_page(cursor.page_id)?.as_mut_slice();
    insert_into_leaf(page, num_cells, cursor.cell_num, key, row);
    Ok(())
}

/// Shift cells at and after `cell_num` right by one and write the new cell.
fn insert_into_leaf(page: &mut [u8], num_cells: u32, cell_num: u32, key: u32, row: &Row) {
    debug_assert!((num_cells as usize) < LEAF_NODE_MAX_CELLS);

    if cell_num < num_cells {
        let start = leaf::cell_offset(cell_num);
        let end = leaf::cell_offset(num_cells);
        page.copy_within(start..end, start + LEAF_NODE_CELL_SIZE);
    }

    leaf::set_key(page, cell_num, key);
    leaf::set_value(page, cell_num, row);
    leaf::set_num_cells(page, num_cells + 1);
}

/// Split a full leaf in two while inserting the new cell, then promote a new
/// root above both halves.
fn split_and_insert(
    pager: &mut Pager,
    root: PageId,
    cursor: Cursor,
    key: u32,
    row: &Row,
) -> Result<()> {
    let old_page_id = cursor.page_id;

    let old_is_root = node::is_root(pager.page(old_page_id)?.as_slice());
    if old_page_id != root || !old_is_root {
        warn!("leaf {} is full and is not the root", old_page_id);
        return Err(Error::Unsupported(format!(
            "splitting non-root leaf {} requires updating its parent",
            old_page_id
        )));
    }

    if !pager.has_room_for(ROOT_SPLIT_PAGES) {
        return Err(Error::TableFull {
            max_pages: pager.max_pages(),
        });
    }

    // All MAX + 1 cells in key order, the new one included.
    let mut cells = Vec::with_capacity((LEAF_NODE_MAX_CELLS + 1) * LEAF_NODE_CELL_SIZE);
    {
        let old = pager.page(old_page_id)?.as_slice();
        let new_cell = leaf::encode_cell(key, row);
        for i in 0..LEAF_NODE_MAX_CELLS as u32 {
            if i == cursor.cell_num {
                cells.extend_from_slice(&new_cell);
            }
            cells.extend_from_slice(leaf::cell(old, i));
        }
        if cursor.cell_num as usize == LEAF_NODE_MAX_CELLS {
            cells.extend_from_slice(&new_cell);
        }
    }
    let (left_cells, right_cells) = cells.split_at(LEAF_NODE_LEFT_SPLIT_COUNT * LEAF_NODE_CELL_SIZE);

    let new_page_id = pager.next_unused_page_id();
    {
        let new_page = pager.get_page(new_page_id)?.as_mut_slice();
        leaf::init_leaf(new_page);
        write_cells(new_page, right_cells);
        leaf::set_num_cells(new_page, LEAF_NODE_RIGHT_SPLIT_COUNT as u32);
    }
    {
        let old_page = pager.get_page(old_page_id)?.as_mut_slice();
        write_cells(old_page, left_cells);
        leaf::set_num_cells(old_page, LEAF_NODE_LEFT_SPLIT_COUNT as u32);
    }

    debug!(
        "split leaf {} into {} + {} cells, new leaf {}",
        old_page_id, LEAF_NODE_LEFT_SPLIT_COUNT, LEAF_NODE_RIGHT_SPLIT_COUNT, new_page_id
    );

    create_new_root(pager, root, new_page_id)
}

/// Write consecutive cells starting at cell 0.
fn write_cells(page: &mut [u8], cells: &[u8]) {
    debug_assert_eq!(cells.len() % LEAF_NODE_CELL_SIZE, 0);
    let start = leaf::cell_offset(0);
    page[start..start + cells.len()].copy_from_slice(cells);
}

/// Turn the root into an internal node over a copy of itself and `right_child`.
///
/// The root keeps its page number. Its old contents move to a freshly
/// allocated left child.
fn create_new_root(pager: &mut Pager, root: PageId, right_child: PageId) -> Result<()> {
    let left_child = pager.next_unused_page_id();

    let root_copy = Page::from_bytes(pager.page(root)?.as_slice());
    {
        let left_page = pager.get_page(left_child)?;
        left_page.copy_from(root_copy.as_slice());
        node::set_is_root(left_page.as_mut_slice(), false);
    }

    let left_max = node::max_key(pager.page(left_child)?.as_slice())?
        .ok_or_else(|| Error::Corrupt(format!("split left child {} is empty", left_child)))?;

    let root_page = pager.get_page(root)?.as_mut_slice();
    internal::init_internal(root_page);
    node::set_is_root(root_page, true);
    internal::set_num_keys(root_page, 1);
    internal::set_child(root_page, 0, left_child);
    internal::set_key(root_page, 0, left_max);
    internal::set_right_child(root_page, right_child);

    debug!(
        "promoted new root {}: left {} (max key {}), right {}",
        root, left_child, left_max, right_child
    );

    Ok(())
}
