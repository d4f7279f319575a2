//! Node header and type definitions.
//!
//! Every page starts with a [`NodeHeader`] describing the B-tree node it holds:
//! - [`NodeType`] discriminator
//! - root flag
//! - parent pointer

use crate::common::{Error, Result};

/// Kind of B-tree node stored in a page.
///
/// Uses `#[repr(u8)]` to guarantee a 1-byte representation on disk.
/// A zeroed page decodes as `Internal`; pages are always initialized as one
/// kind or the other before they are linked into the tree.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Routing node holding child pointers and separator keys.
    Internal = 0,
    /// Node holding key/row cells.
    Leaf = 1,
}

impl NodeType {
    /// Convert from u8, returning `None` for unknown values.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(NodeType::Internal),
            1 => Some(NodeType::Leaf),
            _ => None,
        }
    }
}

/// Header shared by leaf and internal nodes.
///
/// # Layout (6 bytes)
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       1     node_type (NodeType as u8)
/// 1       1     is_root (0 or 1)
/// 2       4     parent (page number, little-endian)
/// ```
///
/// The parent pointer is part of the format but nothing reads it yet;
/// pages carry whatever value they were written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHeader {
    /// Kind of node in this page.
    pub node_type: NodeType,
    /// Whether this node is the root of the tree.
    pub is_root: bool,
    /// Page number of the parent node.
    pub parent: u32,
}

impl NodeHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 6;

    /// Offset of each field within the header.
    pub const OFFSET_NODE_TYPE: usize = 0;
    pub const OFFSET_IS_ROOT: usize = 1;
    pub const OFFSET_PARENT: usize = 2;

    /// Create a non-root header with a zero parent pointer.
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            is_root: false,
            parent: 0,
        }
    }

    /// Read a header from the beginning of a byte slice.
    ///
    /// # Errors
    /// Returns `Error::Corrupt` if the node type byte is unknown.
    ///
    /// # Panics
    /// Panics if `data.len() < NodeHeader::SIZE`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        assert!(data.len() >= Self::SIZE, "buffer too small for NodeHeader");

        let raw_type = data[Self::OFFSET_NODE_TYPE];
        let node_type = NodeType::from_u8(raw_type)
            .ok_or_else(|| Error::Corrupt(format!("unknown node type {}", raw_type)))?;

        let is_root = data[Self::OFFSET_IS_ROOT] != 0;

        let parent = u32::from_le_bytes([
            data[Self::OFFSET_PARENT],
            data[Self::OFFSET_PARENT + 1],
            data[Self::OFFSET_PARENT + 2],
            data[Self::OFFSET_PARENT + 3],
        ]);

        Ok(Self {
            node_type,
            is_root,
            parent,
        })
    }

    /// Write this header to the beginning of a byte slice.
    ///
    /// # Panics
    /// Panics if `data.len() < NodeHeader::SIZE`.
    pub fn write_to(&self, data: &mut [u8]) {
        assert!(data.len() >= Self::SIZE, "buffer too small for NodeHeader");

        data[Self::OFFSET_NODE_TYPE] = self.node_type as u8;
        data[Self::OFFSET_IS_ROOT] = self.is_root as u8;

        let parent_bytes = self.parent.to_le_bytes();
        data[Self::OFFSET_PARENT..Self::OFFSET_PARENT + 4].copy_from_slice(&parent_bytes);
    }
}

// ============================================================================
// TESTS
// ============================================================================
