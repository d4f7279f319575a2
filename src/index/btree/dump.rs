//! Human-readable rendering of the tree structure.
//!
//! ```text
//! - internal (size 1)
//!   - leaf (size 7)
//!     - 1
//!     ...
//!   - key 7
//!   - leaf (size 7)
//!     - 8
//!     ...
//! ```

use log::warn;

use crate::common::{Error, PageId, Result};
use crate::storage::page::NodeType;
use crate::storage::Pager;

use super::{internal, leaf, node};

/// Render the tree under `root`, one line per node, key and separator.
pub fn render_tree(pager: &Pager, root: PageId) -> Result<String> {
    let mut out = String::new();
    render_node(pager, root, 0, &mut out)?;
    Ok(out)
}

fn render_node(pager: &Pager, page_id: PageId, depth: u32, out: &mut String) -> Result<()> {
    if depth > pager.num_pages() {
        warn!("tree below {} does not terminate", page_id);
        return Err(Error::Corrupt(format!("tree below {} does not terminate", page_id)));
    }

    let page = pager.page(page_id)?.as_slice();
    let indent = "  ".repeat(depth as usize);

    match node::node_type(page)? {
        NodeType::Leaf => {
            let num_cells = leaf::checked_num_cells(page)?;
            out.push_str(&format!("{}- leaf (size {})\n", indent, num_cells));
            for i in 0..num_cells {
                out.push_str(&format!("{}  - {}\n", indent, leaf::key(page, i)));
            }
        }
        NodeType::Internal => {
            let num_keys = internal::checked_num_keys(page)?;
            out.push_str(&format!("{}- internal (size {})\n", indent, num_keys));
            for i in 0..num_keys {
                render_node(pager, internal::child(page, i)?, depth + 1, out)?;
                out.push_str(&format!("{}  - key {}\n", indent, internal::key(page, i)));
            }
            render_node(pager, internal::right_child(page), depth + 1, out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Config;
    use crate::index::btree::insert;
    use crate::row::Row;
    use tempfile::tempdir;

    #[test]
    fn test_render_leaf_and_split_tree() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("test.db"), Config::default()).unwrap();
        let root = PageId::new(0);
        {
            let page = pager.get_page(root).unwrap().as_mut_slice();
            leaf::init_leaf(page);
            node::set_is_root(page, true);
        }

        for id in [3, 1, 2] {
            insert(&mut pager, root, &Row::new(id, "u", "e").unwrap()).unwrap();
        }
        assert_eq!(
            render_tree(&pager, root).unwrap(),
            "- leaf (size 3)\n  - 1\n  - 2\n  - 3\n"
        );

        for id in 4..=14 {
            insert(&mut pager, root, &Row::new(id, "u", "e").unwrap()).unwrap();
        }

        let mut expected = String::from("- internal (size 1)\n  - leaf (size 7)\n");
        for id in 1..=7 {
            expected.push_str(&format!("    - {}\n", id));
        }
        expected.push_str("  - key 7\n  - leaf (size 7)\n");
        for id in 8..=14 {
            expected.push_str(&format!("    - {}\n", id));
        }

        assert_eq!(render_tree(&pager, root).unwrap(), expected);
    }
}
