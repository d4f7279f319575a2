//! Accessors shared by both node kinds.
//!
//! Everything here is a pure function over a page's bytes. Offsets come from
//! [`NodeHeader`] and [`layout`](super::layout); callers pass in-range indices.

use log::warn;

use crate::common::Result;
use crate::storage::page::{NodeHeader, NodeType};

use super::{internal, leaf};

/// Read a little-endian u32 at `offset`.
#[inline]
pub(crate) fn read_u32(node: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        node[offset],
        node[offset + 1],
        node[offset + 2],
        node[offset + 3],
    ])
}

/// Write a little-endian u32 at `offset`.
#[inline]
pub(crate) fn write_u32(node: &mut [u8], offset: usize, value: u32) {
    node[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Kind of node stored in `node`.
///
/// # Errors
/// Returns `Error::Corrupt` if the type byte is unknown.
pub fn node_type(node: &[u8]) -> Result<NodeType> {
    match NodeHeader::from_bytes(node) {
        Ok(header) => Ok(header.node_type),
        Err(e) => {
            warn!("bad node header: {}", e);
            Err(e)
        }
    }
}

pub fn set_node_type(node: &mut [u8], node_type: NodeType) {
    node[NodeHeader::OFFSET_NODE_TYPE] = node_type as u8;
}

pub fn is_root(node: &[u8]) -> bool {
    node[NodeHeader::OFFSET_IS_ROOT] != 0
}

pub fn set_is_root(node: &mut [u8], is_root: bool) {
    node[NodeHeader::OFFSET_IS_ROOT] = is_root as u8;
}

/// Largest key stored in the node itself, or `None` if it holds no cells.
///
/// For an internal node this is the key of its last cell. Keys living under
/// `right_child` are not consulted, so the result is a lower bound on the
/// subtree's true maximum.
///
/// # Errors
/// Returns `Error::Corrupt` if the node type or its cell count is invalid.
pub fn max_key(node: &[u8]) -> Result<Option<u32>> {
    let key = match node_type(node)? {
        NodeType::Leaf => match leaf::checked_num_cells(node)? {
            0 => None,
            n => Some(leaf::key(node, n - 1)),
        },
        NodeType::Internal => match internal::checked_num_keys(node)? {
            0 => None,
            n => Some(internal::key(node, n - 1)),
        },
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::PAGE_SIZE;
    use crate::common::PageId;
    use crate::row::Row;

    #[test]
    fn test_u32_roundtrip() {
        let mut buf = [0u8; 8];
        write_u32(&mut buf, 2, 0xDEADBEEF);
        assert_eq!(&buf[2..6], &[0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(read_u32(&buf, 2), 0xDEADBEEF);
    }

    #[test]
    fn test_node_type_and_root_flag() {
        let mut node = [0u8; PAGE_SIZE];

        set_node_type(&mut node, NodeType::Leaf);
        assert_eq!(node_type(&node).unwrap(), NodeType::Leaf);

        assert!(!is_root(&node));
        set_is_root(&mut node, true);
        assert!(is_root(&node));
        assert_eq!(node[1], 1);
    }

    #[test]
    fn test_max_key_leaf() {
        let mut node = [0u8; PAGE_SIZE];
        leaf::init_leaf(&mut node);
        assert_eq!(max_key(&node).unwrap(), None);

        for (i, key) in [3u32, 8, 21].iter().enumerate() {
            let row = Row::new(*key, "u", "e").unwrap();
            leaf::set_key(&mut node, i as u32, *key);
            leaf::set_value(&mut node, i as u32, &row);
        }
        leaf::set_num_cells(&mut node, 3);

        assert_eq!(max_key(&node).unwrap(), Some(21));
    }

    #[test]
    fn test_max_key_internal_ignores_right_child() {
        let mut node = [0u8; PAGE_SIZE];
        internal::init_internal(&mut node);
        internal::set_num_keys(&mut node, 2);
        internal::set_child(&mut node, 0, PageId::new(1));
        internal::set_key(&mut node, 0, 10);
        internal::set_child(&mut node, 1, PageId::new(2));
        internal::set_key(&mut node, 1, 20);
        internal::set_right_child(&mut node, PageId::new(3));

        assert_eq!(max_key(&node).unwrap(), Some(20));
    }
}
