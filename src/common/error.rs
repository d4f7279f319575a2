//! Error types for leafdb.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in leafdb.
///
/// `DuplicateKey`, `TableFull` and `FieldTooLong` are per-operation failures:
/// the table is left exactly as it was and the caller may carry on.
/// `Corrupt` and `Unsupported` mean the file or the requested operation is
/// outside what the engine can handle; callers should stop using the table.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from reading or writing the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row with this id is already stored.
    #[error("Duplicate key: {0}")]
    DuplicateKey(u32),

    /// The page table has no room for the pages an operation needs.
    #[error("Table full: page table holds at most {max_pages} pages")]
    TableFull { max_pages: u32 },

    /// A string does not fit its fixed-width column.
    #[error("Field {field} is too long (max {max} bytes)")]
    FieldTooLong { field: &'static str, max: usize },

    /// The backing file or a page's contents are inconsistent.
    #[error("Corrupt database: {0}")]
    Corrupt(String),

    /// The tree would need a structural change the engine does not implement.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}
