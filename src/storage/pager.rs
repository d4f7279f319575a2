//! Pager - the table's page directory and its bridge to the backing file.
//!
//! The [`Pager`] handles:
//! - Loading every page of the backing file on open
//! - Handing out pages by number, allocating zeroed pages on first use
//! - Writing all pages back to the file on flush

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::common::config::PAGE_SIZE;
use crate::common::{Config, Error, PageId, Result};
use crate::storage::page::Page;

/// Owns the pages of a single table file.
///
/// # File Layout
/// The table is stored as a single file with pages laid out sequentially:
/// ```text
/// ┌─────────┬─────────┬─────────┬─────────┬─────────┐
/// │ Page 0  │ Page 1  │ Page 2  │  ...    │ Page N  │
/// │ (root)  │ (4KB)   │ (4KB)   │         │ (4KB)   │
/// └─────────┴─────────┴─────────┴─────────┴─────────┘
/// Offset:  0      4096     8192    ...    N×4096
/// ```
///
/// There is no file header. The only integrity check on open is that the
/// file size is a whole number of pages.
///
/// # Allocation
/// Pages are never freed. [`next_unused_page_id`](Pager::next_unused_page_id)
/// always returns the current high-water mark, and the directory can hold at
/// most `max_pages` pages.
///
/// # Durability
/// Nothing reaches the file until [`flush`](Pager::flush), which rewrites every
/// page and calls `fsync()`.
pub struct Pager {
    file: File,
    /// Page directory, indexed by page number. `None` = not yet referenced.
    pages: Vec<Option<Box<Page>>>,
    /// High-water mark: one past the highest page number referenced.
    num_pages: u32,
    /// Capacity of the page directory.
    max_pages: u32,
}

impl Pager {
    /// Open a table file, creating it if it doesn't exist, and load its pages.
    ///
    /// # Errors
    /// - `Error::Corrupt` if the file size is not a multiple of `PAGE_SIZE`
    /// - `Error::TableFull` if the file holds more than `config.max_pages` pages
    /// - I/O errors from opening or reading the file
    pub fn open<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        if bytes.len() % PAGE_SIZE != 0 {
            warn!(
                "{} is {} bytes, not a whole number of pages",
                path.display(),
                bytes.len()
            );
            return Err(Error::Corrupt(format!(
                "file size {} is not a whole number of {}-byte pages",
                bytes.len(),
                PAGE_SIZE
            )));
        }

        let file_pages = bytes.len() / PAGE_SIZE;
        if file_pages > config.max_pages as usize {
            return Err(Error::TableFull {
                max_pages: config.max_pages,
            });
        }

        let pages: Vec<Option<Box<Page>>> = bytes
            .chunks_exact(PAGE_SIZE)
            .map(|chunk| Some(Box::new(Page::from_bytes(chunk))))
            .collect();

        info!("opened {} with {} pages", path.display(), file_pages);

        Ok(Self {
            file,
            pages,
            num_pages: file_pages as u32,
            max_pages: config.max_pages,
        })
    }

    /// Get a page for writing, allocating a zeroed page on first reference.
    ///
    /// Referencing a page at or beyond the high-water mark raises it.
    ///
    /// # Errors
    /// Returns `Error::TableFull` if `page_id` is outside the page directory.
    pub fn get_page(&mut self, page_id: PageId) -> Result<&mut Page> {
        if page_id.0 >= self.max_pages {
            return Err(Error::TableFull {
                max_pages: self.max_pages,
            });
        }

        let idx = page_id.index();
        if idx >= self.pages.len() {
            self.pages.resize_with(idx + 1, || None);
        }
        if page_id.0 >= self.num_pages {
            debug!("allocating {}", page_id);
            self.num_pages = page_id.0 + 1;
        }

        let slot = &mut self.pages[idx];
        Ok(slot.get_or_insert_with(|| Box::new(Page::new())).as_mut())
    }

    /// Get an already allocated page for reading.
    ///
    /// # Errors
    /// Returns `Error::Corrupt` if the page was never allocated, which means
    /// some node points at a page that does not exist.
    pub fn page(&self, page_id: PageId) -> Result<&Page> {
        self.pages
            .get(page_id.index())
            .and_then(|slot| slot.as_deref())
            .ok_or_else(|| {
                warn!("reference to unallocated {}", page_id);
                Error::Corrupt(format!("reference to unallocated {}", page_id))
            })
    }

    /// Page number the next allocation should use.
    #[inline]
    pub fn next_unused_page_id(&self) -> PageId {
        PageId::new(self.num_pages)
    }

    /// Whether `count` more pages fit in the page directory.
    #[inline]
    pub fn has_room_for(&self, count: u32) -> bool {
        (self.num_pages as u64) + (count as u64) <= self.max_pages as u64
    }

    /// Number of pages referenced so far.
    #[inline]
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// Capacity of the page directory.
    #[inline]
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Size the backing file will have after the next flush.
    #[inline]
    pub fn file_size(&self) -> u64 {
        (self.num_pages as u64) * (PAGE_SIZE as u64)
    }

    /// Write every page up to the high-water mark back to the file.
    ///
    /// Full page images are written, slack bytes included. A page number
    /// below the high-water mark that was never referenced is written as zeros.
    pub fn flush(&mut self) -> Result<()> {
        let zeros = Page::new();

        for page_num in 0..self.num_pages {
            let page_id = PageId::new(page_num);
            let page = self
                .pages
                .get(page_id.index())
                .and_then(|slot| slot.as_deref())
                .unwrap_or(&zeros);

            self.file.seek(SeekFrom::Start(page_id.offset()))?;
            self.file.write_all(page.as_slice())?;
        }

        self.file.sync_all()?; // fsync for durability
        debug!("flushed {} pages", self.num_pages);

        Ok(())
    }
}
