//! Index structures.
//!
//! - [`btree`] - Paged B-tree keyed by row id

pub mod btree;
