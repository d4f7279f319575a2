//! Internal node accessors.
//!
//! An internal node holds `num_keys` cells of `child | key` plus a trailing
//! `right_child`. Key `i` bounds the keys under child `i` from above
//! (inclusive); everything greater lives under `right_child`.

use log::warn;

use crate::common::{Error, PageId, Result};
use crate::storage::page::{NodeHeader, NodeType};

use super::layout::{
    INTERNAL_NODE_CELL_SIZE, INTERNAL_NODE_HEADER_SIZE, INTERNAL_NODE_KEY_OFFSET,
    INTERNAL_NODE_MAX_CELLS, INTERNAL_NODE_NUM_KEYS_OFFSET, INTERNAL_NODE_RIGHT_CHILD_OFFSET,
};
use super::node::{read_u32, write_u32};

/// Format the header of `node` as a non-root internal node with no keys.
///
/// `right_child` and the cell area are left as they were; the caller fills
/// them in.
pub fn init_internal(node: &mut [u8]) {
    NodeHeader::new(NodeType::Internal).write_to(node);
    set_num_keys(node, 0);
}

pub fn num_keys(node: &[u8]) -> u32 {
    read_u32(node, INTERNAL_NODE_NUM_KEYS_OFFSET)
}

/// Key count, checked against internal node capacity.
///
/// # Errors
/// Returns `Error::Corrupt` if the stored count exceeds `INTERNAL_NODE_MAX_CELLS`.
pub fn checked_num_keys(node: &[u8]) -> Result<u32> {
    let num_keys = num_keys(node);
    if num_keys as usize > INTERNAL_NODE_MAX_CELLS {
        warn!("internal node claims {} keys", num_keys);
        return Err(Error::Corrupt(format!(
            "internal node holds {} keys, capacity is {}",
            num_keys, INTERNAL_NODE_MAX_CELLS
        )));
    }
    Ok(num_keys)
}

pub fn set_num_keys(node: &mut [u8], num_keys: u32) {
    debug_assert!(num_keys as usize <= INTERNAL_NODE_MAX_CELLS);
    write_u32(node, INTERNAL_NODE_NUM_KEYS_OFFSET, num_keys);
}

pub fn right_child(node: &[u8]) -> PageId {
    PageId::new(read_u32(node, INTERNAL_NODE_RIGHT_CHILD_OFFSET))
}

pub fn set_right_child(node: &mut [u8], page_id: PageId) {
    write_u32(node, INTERNAL_NODE_RIGHT_CHILD_OFFSET, page_id.0);
}

#[inline]
fn cell_offset(cell_num: u32) -> usize {
    debug_assert!((cell_num as usize) < INTERNAL_NODE_MAX_CELLS);
    INTERNAL_NODE_HEADER_SIZE + (cell_num as usize) * INTERNAL_NODE_CELL_SIZE
}

/// Page number of child `child_num`; `num_keys` names the right child.
///
/// # Errors
/// Returns `Error::Corrupt` if `child_num > num_keys` or the key count is
/// out of range.
pub fn child(node: &[u8], child_num: u32) -> Result<PageId> {
    let num_keys = checked_num_keys(node)?;
    if child_num > num_keys {
        warn!("child {} requested from node with {} keys", child_num, num_keys);
        return Err(Error::Corrupt(format!(
            "tried to access child {} > num_keys {}",
            child_num, num_keys
        )));
    }

    if child_num == num_keys {
        Ok(right_child(node))
    } else {
        Ok(PageId::new(read_u32(node, cell_offset(child_num))))
    }
}

/// Store the child pointer of cell `cell_num`. Use [`set_right_child`] for
/// the trailing child.
pub fn set_child(node: &mut [u8], cell_num: u32, page_id: PageId) {
    write_u32(node, cell_offset(cell_num), page_id.0);
}

pub fn key(node: &[u8], key_num: u32) -> u32 {
    read_u32(node, cell_offset(key_num) + INTERNAL_NODE_KEY_OFFSET)
}

pub fn set_key(node: &mut [u8], key_num: u32, key: u32) {
    write_u32(node, cell_offset(key_num) + INTERNAL_NODE_KEY_OFFSET, key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::PAGE_SIZE;
    use crate::index::btree::node;

    fn one_key_node() -> [u8; PAGE_SIZE] {
        let mut page = [0u8; PAGE_SIZE];
        init_internal(&mut page);
        set_num_keys(&mut page, 1);
        set_child(&mut page, 0, PageId::new(2));
        set_key(&mut page, 0, 7);
        set_right_child(&mut page, PageId::new(1));
        page
    }

    #[test]
    fn test_init_internal() {
        let mut page = [0xFFu8; PAGE_SIZE];
        init_internal(&mut page);

        assert_eq!(node::node_type(&page).unwrap(), NodeType::Internal);
        assert!(!node::is_root(&page));
        assert_eq!(num_keys(&page), 0);
    }

    #[test]
    fn test_child_and_right_child() {
        let page = one_key_node();

        assert_eq!(child(&page, 0).unwrap(), PageId::new(2));
        assert_eq!(child(&page, 1).unwrap(), PageId::new(1));
        assert_eq!(key(&page, 0), 7);
    }

    #[test]
    fn test_child_beyond_num_keys() {
        let page = one_key_node();

        match child(&page, 2) {
            Err(Error::Corrupt(_)) => {}
            other => panic!("Expected Corrupt, got {:?}", other),
        }
    }

    #[test]
    fn test_cell_byte_layout() {
        let page = one_key_node();

        assert_eq!(&page[10..14], &[1, 0, 0, 0]); // right_child
        let start = INTERNAL_NODE_HEADER_SIZE;
        assert_eq!(
            &page[start..start + INTERNAL_NODE_CELL_SIZE],
            &[2, 0, 0, 0, 7, 0, 0, 0]
        );
    }

    #[test]
    fn test_child_with_oversized_key_count() {
        let mut page = one_key_node();
        node::write_u32(&mut page, INTERNAL_NODE_NUM_KEYS_OFFSET, 100_000);

        assert!(matches!(checked_num_keys(&page), Err(Error::Corrupt(_))));
        assert!(matches!(child(&page, 0), Err(Error::Corrupt(_))));
    }
}
