//! Leaf node accessors.
//!
//! A leaf holds `num_cells` cells of `key | row`, sorted ascending by key.

use log::warn;

use crate::common::{Error, Result};
use crate::row::Row;
use crate::storage::page::{NodeHeader, NodeType};

use super::layout::{
    LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_KEY_OFFSET, LEAF_NODE_MAX_CELLS,
    LEAF_NODE_NUM_CELLS_OFFSET, LEAF_NODE_VALUE_OFFSET, LEAF_NODE_VALUE_SIZE,
};
use super::node::{read_u32, write_u32};

/// Format `node` as an empty, non-root leaf.
pub fn init_leaf(node: &mut [u8]) {
    NodeHeader::new(NodeType::Leaf).write_to(node);
    set_num_cells(node, 0);
}

pub fn num_cells(node: &[u8]) -> u32 {
    read_u32(node, LEAF_NODE_NUM_CELLS_OFFSET)
}

/// Cell count, checked against leaf capacity.
///
/// Page bytes come straight from the file, so every traversal bounds its
/// loops with this rather than [`num_cells`].
///
/// # Errors
/// Returns `Error::Corrupt` if the stored count exceeds `LEAF_NODE_MAX_CELLS`.
pub fn checked_num_cells(node: &[u8]) -> Result<u32> {
    let num_cells = num_cells(node);
    if num_cells as usize > LEAF_NODE_MAX_CELLS {
        warn!("leaf claims {} cells", num_cells);
        return Err(Error::Corrupt(format!(
            "leaf holds {} cells, capacity is {}",
            num_cells, LEAF_NODE_MAX_CELLS
        )));
    }
    Ok(num_cells)
}

pub fn set_num_cells(node: &mut [u8], num_cells: u32) {
    debug_assert!(num_cells as usize <= LEAF_NODE_MAX_CELLS);
    write_u32(node, LEAF_NODE_NUM_CELLS_OFFSET, num_cells);
}

/// Byte offset of cell `cell_num`. One past the last slot is allowed so the
/// result can close a range.
#[inline]
pub(crate) fn cell_offset(cell_num: u32) -> usize {
    debug_assert!(cell_num as usize <= LEAF_NODE_MAX_CELLS);
    LEAF_NODE_HEADER_SIZE + (cell_num as usize) * LEAF_NODE_CELL_SIZE
}

pub fn cell(node: &[u8], cell_num: u32) -> &[u8] {
    debug_assert!((cell_num as usize) < LEAF_NODE_MAX_CELLS);
    let start = cell_offset(cell_num);
    &node[start..start + LEAF_NODE_CELL_SIZE]
}

pub fn cell_mut(node: &mut [u8], cell_num: u32) -> &mut [u8] {
    debug_assert!((cell_num as usize) < LEAF_NODE_MAX_CELLS);
    let start = cell_offset(cell_num);
    &mut node[start..start + LEAF_NODE_CELL_SIZE]
}

pub fn key(node: &[u8], cell_num: u32) -> u32 {
    read_u32(cell(node, cell_num), LEAF_NODE_KEY_OFFSET)
}

pub fn set_key(node: &mut [u8], cell_num: u32, key: u32) {
    write_u32(cell_mut(node, cell_num), LEAF_NODE_KEY_OFFSET, key);
}

pub fn value(node: &[u8], cell_num: u32) -> Row {
    let cell = cell(node, cell_num);
    Row::from_bytes(&cell[LEAF_NODE_VALUE_OFFSET..LEAF_NODE_VALUE_OFFSET + LEAF_NODE_VALUE_SIZE])
}

pub fn set_value(node: &mut [u8], cell_num: u32, row: &Row) {
    let cell = cell_mut(node, cell_num);
    row.write_to(&mut cell[LEAF_NODE_VALUE_OFFSET..LEAF_NODE_VALUE_OFFSET + LEAF_NODE_VALUE_SIZE]);
}

/// Encode a standalone `key | row` cell.
pub fn encode_cell(key: u32, row: &Row) -> [u8; LEAF_NODE_CELL_SIZE] {
    let mut cell = [0u8; LEAF_NODE_CELL_SIZE];
    write_u32(&mut cell, LEAF_NODE_KEY_OFFSET, key);
    row.write_to(&mut cell[LEAF_NODE_VALUE_OFFSET..]);
    cell
}
