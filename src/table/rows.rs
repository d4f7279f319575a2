//! Full-table scan.

use crate::common::{PageId, Result};
use crate::index::btree::{internal, node, Cursor};
use crate::row::Row;
use crate::storage::page::NodeType;
use crate::storage::Pager;

/// Iterator over every row in ascending id order.
///
/// The cursor only walks one leaf at a time. When it runs off the end of a
/// leaf under an internal root, the scan restarts it on the root's next child.
/// After the first error the iterator yields nothing more.
pub struct Rows<'a> {
    pager: &'a Pager,
    cursor: Cursor,
    /// Leaves still to visit after the cursor's current one, in key order.
    remaining_leaves: std::vec::IntoIter<PageId>,
    failed: bool,
}

impl<'a> Rows<'a> {
    pub(crate) fn new(pager: &'a Pager, root: PageId) -> Result<Self> {
        let cursor = Cursor::start(pager, root)?;

        let root_page = pager.page(root)?.as_slice();
        let siblings = match node::node_type(root_page)? {
            NodeType::Leaf => Vec::new(),
            NodeType::Internal => (1..=internal::checked_num_keys(root_page)?)
                .map(|i| internal::child(root_page, i))
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(Self {
            pager,
            cursor,
            remaining_leaves: siblings.into_iter(),
            failed: false,
        })
    }

    fn fail<T>(&mut self, err: crate::common::Error) -> Option<Result<T>> {
        self.failed = true;
        Some(Err(err))
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }

            if !self.cursor.end_of_table {
                let row = match self.cursor.row(self.pager) {
                    Ok(Some(row)) => row,
                    Ok(None) => {
                        self.cursor.end_of_table = true;
                        continue;
                    }
                    Err(e) => return self.fail(e),
                };
                if let Err(e) = self.cursor.advance(self.pager) {
                    return self.fail(e);
                }
                return Some(Ok(row));
            }

            let next_leaf = self.remaining_leaves.next()?;
            match Cursor::at_leaf(self.pager, next_leaf) {
                Ok(cursor) => self.cursor = cursor,
                Err(e) => return self.fail(e),
            }
        }
    }
}
