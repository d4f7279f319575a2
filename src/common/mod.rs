//! Common types and utilities shared across leafdb.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Page identifiers

pub mod config;
pub mod error;
mod page_id;

pub use config::Config;
pub use error::{Error, Result};
pub use page_id::PageId;
