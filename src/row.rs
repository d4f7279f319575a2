//! Fixed-width table rows.
//!
//! A [`Row`] is never stored on its own; its bytes are embedded in the value
//! half of a leaf cell.
//!
//! # Layout (291 bytes)
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       4     id (little-endian)
//! 4       32    username (NUL-padded)
//! 36      255   email (NUL-padded)
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::common::{Error, Result};

pub const ID_SIZE: usize = std::mem::size_of::<u32>();
pub const USERNAME_SIZE: usize = 32;
pub const EMAIL_SIZE: usize = 255;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Serialized size of a row.
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

/// One record of the table: a unique id plus two fixed-width text columns.
///
/// # Example
/// ```
/// use leafdb::Row;
///
/// let row = Row::new(1, "alice", "alice@example.com").unwrap();
/// assert_eq!(row.id(), 1);
/// assert_eq!(row.username(), "alice");
/// assert_eq!(row.to_string(), "(1, alice, alice@example.com)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: [u8; USERNAME_SIZE],
    email: [u8; EMAIL_SIZE],
}

impl Row {
    /// Build a row, checking that both strings fit their columns.
    ///
    /// # Errors
    /// Returns `Error::FieldTooLong` if `username` is longer than 32 bytes or
    /// `email` is longer than 255 bytes.
    pub fn new(id: u32, username: &str, email: &str) -> Result<Self> {
        Ok(Self {
            id,
            username: fixed_field("username", username)?,
            email: fixed_field("email", email)?,
        })
    }

    /// Decode a row from the first `ROW_SIZE` bytes of `src`.
    ///
    /// # Panics
    /// Panics if `src.len() < ROW_SIZE`.
    pub fn from_bytes(src: &[u8]) -> Self {
        assert!(src.len() >= ROW_SIZE, "buffer too small for Row");

        let mut username = [0u8; USERNAME_SIZE];
        username.copy_from_slice(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]);

        let mut email = [0u8; EMAIL_SIZE];
        email.copy_from_slice(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]);

        Self {
            id: u32::from_le_bytes([
                src[ID_OFFSET],
                src[ID_OFFSET + 1],
                src[ID_OFFSET + 2],
                src[ID_OFFSET + 3],
            ]),
            username,
            email,
        }
    }

    /// Encode this row into the first `ROW_SIZE` bytes of `dst`.
    ///
    /// # Panics
    /// Panics if `dst.len() < ROW_SIZE`.
    pub fn write_to(&self, dst: &mut [u8]) {
        assert!(dst.len() >= ROW_SIZE, "buffer too small for Row");

        dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        dst[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE].copy_from_slice(&self.username);
        dst[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE].copy_from_slice(&self.email);
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Username up to the first NUL.
    pub fn username(&self) -> Cow<'_, str> {
        until_nul(&self.username)
    }

    /// Email up to the first NUL.
    pub fn email(&self) -> Cow<'_, str> {
        until_nul(&self.email)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username(), self.email())
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("id", &self.id)
            .field("username", &self.username())
            .field("email", &self.email())
            .finish()
    }
}

fn fixed_field<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N]> {
    let bytes = value.as_bytes();
    if bytes.len() > N {
        return Err(Error::FieldTooLong { field, max: N });
    }

    let mut buf = [0u8; N];
    buf[..bytes.len()].copy_from_slice(bytes);
    Ok(buf)
}

fn until_nul(bytes: &[u8]) -> Cow<'_, str> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_size() {
        assert_eq!(ROW_SIZE, 291);
        assert_eq!(EMAIL_OFFSET, 36);
    }

    #[test]
    fn test_row_accessors() {
        let row = Row::new(7, "bob", "bob@example.com").unwrap();
        assert_eq!(row.id(), 7);
        assert_eq!(row.username(), "bob");
        assert_eq!(row.email(), "bob@example.com");

        let mut buffer = [0xFFu8; ROW_SIZE];
        row.write_to(&mut buffer);
        assert_eq!(&buffer[USERNAME_OFFSET..USERNAME_OFFSET + 4], b"bob\0");
    }

    #[test]
    fn test_row_full_width_fields() {
        let username = "u".repeat(USERNAME_SIZE);
        let email = "e".repeat(EMAIL_SIZE);

        let row = Row::new(1, &username, &email).unwrap();
        assert_eq!(row.username(), username);
        assert_eq!(row.email(), email);
    }

    #[test]
    fn test_row_rejects_long_username() {
        let username = "u".repeat(USERNAME_SIZE + 1);
        match Row::new(1, &username, "a@b") {
            Err(Error::FieldTooLong { field, max }) => {
                assert_eq!(field, "username");
                assert_eq!(max, USERNAME_SIZE);
            }
            other => panic!("Expected FieldTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_row_rejects_long_email() {
        let email = "e".repeat(EMAIL_SIZE + 1);
        assert!(matches!(
            Row::new(1, "user", &email),
            Err(Error::FieldTooLong { field: "email", .. })
        ));
    }

    #[test]
    fn test_row_byte_layout() {
        let row = Row::new(0x04030201, "ab", "c").unwrap();

        let mut buffer = [0xFFu8; ROW_SIZE];
        row.write_to(&mut buffer);

        assert_eq!(&buffer[0..4], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&buffer[4..7], b"ab\0");
        assert_eq!(buffer[USERNAME_OFFSET + USERNAME_SIZE - 1], 0);
        assert_eq!(&buffer[36..38], b"c\0");
        assert_eq!(buffer[ROW_SIZE - 1], 0);

        assert_eq!(Row::from_bytes(&buffer), row);
    }

    #[test]
    fn test_row_display() {
        let row = Row::new(3, "carol", "carol@example.com").unwrap();
        assert_eq!(format!("{}", row), "(3, carol, carol@example.com)");
    }
}
