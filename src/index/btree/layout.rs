//! Byte layout of B-tree nodes.
//!
//! # Leaf node
//! ```text
//! ┌──────────────┬───────────┬────────────────────┬─────┬────────────────────┐
//! │ common (6)   │ num_cells │ cell 0             │ ... │ cell N-1           │
//! │ type|root|pp │ (4)       │ key (4) | row(291) │     │ key (4) | row(291) │
//! └──────────────┴───────────┴────────────────────┴─────┴────────────────────┘
//! ```
//!
//! # Internal node
//! ```text
//! ┌──────────────┬──────────┬─────────────┬───────────────────┬─────┐
//! │ common (6)   │ num_keys │ right_child │ cell 0            │ ... │
//! │ type|root|pp │ (4)      │ (4)         │ child (4)|key (4) │     │
//! └──────────────┴──────────┴─────────────┴───────────────────┴─────┘
//! ```
//!
//! All integers are little-endian.

use std::fmt;

use crate::common::config::PAGE_SIZE;
use crate::row::ROW_SIZE;
use crate::storage::page::NodeHeader;

const U32_SIZE: usize = std::mem::size_of::<u32>();

pub const COMMON_NODE_HEADER_SIZE: usize = NodeHeader::SIZE;

// Leaf header
pub const LEAF_NODE_NUM_CELLS_SIZE: usize = U32_SIZE;
pub const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

// Leaf body
pub const LEAF_NODE_KEY_SIZE: usize = U32_SIZE;
pub const LEAF_NODE_KEY_OFFSET: usize = 0;
pub const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

// Split shares. The left node keeps the larger half when the total is odd.
pub const LEAF_NODE_LEFT_SPLIT_COUNT: usize = (LEAF_NODE_MAX_CELLS + 1).div_ceil(2);
pub const LEAF_NODE_RIGHT_SPLIT_COUNT: usize = (LEAF_NODE_MAX_CELLS + 1) - LEAF_NODE_LEFT_SPLIT_COUNT;

// Internal header
pub const INTERNAL_NODE_NUM_KEYS_SIZE: usize = U32_SIZE;
pub const INTERNAL_NODE_NUM_KEYS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const INTERNAL_NODE_RIGHT_CHILD_SIZE: usize = U32_SIZE;
pub const INTERNAL_NODE_RIGHT_CHILD_OFFSET: usize =
    INTERNAL_NODE_NUM_KEYS_OFFSET + INTERNAL_NODE_NUM_KEYS_SIZE;
pub const INTERNAL_NODE_HEADER_SIZE: usize =
    COMMON_NODE_HEADER_SIZE + INTERNAL_NODE_NUM_KEYS_SIZE + INTERNAL_NODE_RIGHT_CHILD_SIZE;

// Internal body
pub const INTERNAL_NODE_CHILD_SIZE: usize = U32_SIZE;
pub const INTERNAL_NODE_KEY_SIZE: usize = U32_SIZE;
pub const INTERNAL_NODE_KEY_OFFSET: usize = INTERNAL_NODE_CHILD_SIZE;
pub const INTERNAL_NODE_CELL_SIZE: usize = INTERNAL_NODE_CHILD_SIZE + INTERNAL_NODE_KEY_SIZE;
pub const INTERNAL_NODE_MAX_CELLS: usize =
    (PAGE_SIZE - INTERNAL_NODE_HEADER_SIZE) / INTERNAL_NODE_CELL_SIZE;

/// Snapshot of the layout constants, printable as a report.
///
/// # Example
/// ```
/// use leafdb::Constants;
///
/// let constants = Constants::current();
/// assert_eq!(constants.leaf_node_max_cells, 13);
/// assert!(constants.to_string().starts_with("ROW_SIZE: 291\n"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constants {
    pub row_size: usize,
    pub common_node_header_size: usize,
    pub leaf_node_header_size: usize,
    pub leaf_node_cell_size: usize,
    pub leaf_node_space_for_cells: usize,
    pub leaf_node_max_cells: usize,
}

impl Constants {
    /// The constants this build was compiled with.
    pub const fn current() -> Self {
        Self {
            row_size: ROW_SIZE,
            common_node_header_size: COMMON_NODE_HEADER_SIZE,
            leaf_node_header_size: LEAF_NODE_HEADER_SIZE,
            leaf_node_cell_size: LEAF_NODE_CELL_SIZE,
            leaf_node_space_for_cells: LEAF_NODE_SPACE_FOR_CELLS,
            leaf_node_max_cells: LEAF_NODE_MAX_CELLS,
        }
    }
}

impl fmt::Display for Constants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ROW_SIZE: {}", self.row_size)?;
        writeln!(f, "COMMON_NODE_HEADER_SIZE: {}", self.common_node_header_size)?;
        writeln!(f, "LEAF_NODE_HEADER_SIZE: {}", self.leaf_node_header_size)?;
        writeln!(f, "LEAF_NODE_CELL_SIZE: {}", self.leaf_node_cell_size)?;
        writeln!(f, "LEAF_NODE_SPACE_FOR_CELLS: {}", self.leaf_node_space_for_cells)?;
        writeln!(f, "LEAF_NODE_MAX_CELLS: {}", self.leaf_node_max_cells)
    }
}
