//! B-tree index over the table's pages.
//!
//! Each page holds one node. Leaves store `key | row` cells sorted by key;
//! internal nodes store `child | key` separators plus a right child.
//!
//! # Components
//! - [`layout`] - Byte offsets and capacities of both node kinds
//! - [`node`], [`leaf`], [`internal`] - Pure accessors over page bytes
//! - [`Cursor`] - Search and in-leaf iteration
//! - [`insert`] - Insertion with leaf split and root promotion
//! - [`render_tree`] - Textual dump of the tree
//!
//! # Limits
//! Only a root leaf can split. Once the root is internal, filling either
//! child returns `Error::Unsupported`: there is no internal node split.

mod cursor;
mod dump;
mod insert;
pub mod internal;
pub mod layout;
pub mod leaf;
pub mod node;

pub use cursor::Cursor;
pub use dump::render_tree;
pub use insert::insert;
pub use layout::Constants;
