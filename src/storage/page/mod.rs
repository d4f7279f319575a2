//! Page types and layout.
//!
//! This module contains:
//! - [`Page`] - The raw 4KB data container
//! - [`NodeHeader`] - Metadata at the start of every page
//! - [`NodeType`] - Discriminator between leaf and internal nodes

mod node_header;
#[allow(clippy::module_inception)]
mod page;

pub use node_header::{NodeHeader, NodeType};
pub use page::Page;
