//! Storage layer - the page directory and page formats.
//!
//! This module handles persistent storage:
//! - [`Pager`] - Page directory and file I/O
//! - [`page`] - Page types and node headers

pub mod page;
mod pager;

pub use pager::Pager;
