//! leafdb - A single-table storage engine backed by an on-disk paged B-tree.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             leafdb                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                  Table Layer (table/)                    │   │
//! │  │      open / close · insert_row · select_all · get        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Index Layer (index/btree/)                │   │
//! │  │   Cursor (find, advance) · insert (split, new root)      │   │
//! │  │   node / leaf / internal accessors over page bytes       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               Storage Layer (storage/)                   │   │
//! │  │        Pager (page directory + file) · Page · NodeHeader │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, Error, config)
//! - [`row`] - The fixed-width row format
//! - [`storage`] - Page directory, file I/O and page formats
//! - [`index`] - The B-tree
//! - [`table`] - The table API
//!
//! # Quick Start
//! ```no_run
//! use leafdb::{Row, Table};
//!
//! let mut table = Table::open("my_database.db").unwrap();
//! table.insert_row(&Row::new(1, "alice", "alice@example.com").unwrap()).unwrap();
//! table.close().unwrap();
//! ```

pub mod common;
pub mod index;
pub mod row;
pub mod storage;
pub mod table;

// Re-export commonly used items at crate root for convenience
pub use common::config::PAGE_SIZE;
pub use common::{Config, Error, PageId, Result};

pub use index::btree::{Constants, Cursor};
pub use row::Row;
pub use storage::page::{NodeHeader, NodeType, Page};
pub use storage::Pager;
pub use table::{Rows, Table};
